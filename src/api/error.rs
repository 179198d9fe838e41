// ==========================================
// 充电台账合并系统 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，统一提供面向用户的原因说明
// ==========================================

use crate::config::ConfigError;
use crate::domain::uploaded_file::FileId;
use crate::exporter::ExportError;
use crate::i18n;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("资源未找到: file_id={0}")]
    NotFound(FileId),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("文件已被重新选择或改写，结果未写回: file_id={0}")]
    Superseded(FileId),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 面向用户的原因说明（不含内部错误细节）
    pub fn user_message(&self, locale: &str) -> String {
        match self {
            ApiError::NotFound(id) => {
                i18n::t_with_args_in(locale, "api.file_not_found", &[("id", &id.to_string())])
            }
            ApiError::Superseded(_) => i18n::t_in(locale, "api.superseded"),
            ApiError::InvalidInput(reason) => {
                i18n::t_with_args_in(locale, "api.invalid_input", &[("reason", reason)])
            }
            ApiError::Import(err) => err.user_message(locale),
            ApiError::Export(err) => err.user_message(locale),
            ApiError::Config(_) | ApiError::InternalError(_) => i18n::t_in(locale, "api.internal"),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InternalError(format!("序列化失败: {}", err))
    }
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
