// ==========================================
// 充电台账合并系统 - 配置错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    ParseError(String),

    #[error("配置值非法: {key}={value} ({message})")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
