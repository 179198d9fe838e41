// ==========================================
// 充电台账合并系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: 内存 key-value（来源: 平铺 JSON 文件 / 默认值）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::merge_config_trait::MergeConfigReader;
use crate::i18n;
use crate::registry::VendorFormat;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// 显式指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "EV_LEDGER_CONFIG";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 全部使用默认值
    pub fn new() -> Self {
        Self::default()
    }

    /// 从平铺 JSON 对象加载
    ///
    /// 字符串/数值/布尔值按文本保存；数组与对象保存其 JSON 文本；null 忽略
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let parsed: JsonValue = serde_json::from_str(raw)?;
        let object = parsed
            .as_object()
            .ok_or_else(|| ConfigError::ParseError("配置根节点必须是 JSON 对象".to_string()))?;

        let mut values = HashMap::new();
        for (key, value) in object {
            let text = match value {
                JsonValue::Null => continue,
                JsonValue::String(s) => s.clone(),
                JsonValue::Bool(b) => b.to_string(),
                JsonValue::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            values.insert(key.clone(), text);
        }

        Ok(Self { values })
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;

        let manager = Self::from_json_str(&raw)?;
        info!(path = %path.display(), keys = manager.values.len(), "配置文件已加载");
        Ok(manager)
    }

    /// 按优先级加载: 环境变量指定文件 → 用户配置目录 → 默认值
    pub fn load_default() -> ConfigResult<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::from_json_file(trimmed);
            }
        }

        match get_default_config_path() {
            Some(path) if path.exists() => Self::from_json_file(path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::new())
            }
        }
    }

    /// 覆写单个配置
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    fn parse_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key).map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(default),
            Some(raw) => raw.parse::<T>().map_err(|e| invalid(key, raw, e.to_string())),
        }
    }
}

fn invalid(key: &str, value: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValueError {
        key: key.to_string(),
        value: value.to_string(),
        message: message.into(),
    }
}

/// 默认配置文件路径: <用户配置目录>/ev-charge-ledger/config.json
pub fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ev-charge-ledger").join("config.json"))
}

impl MergeConfigReader for ConfigManager {
    // ===== 会话 =====

    fn get_locale(&self) -> ConfigResult<String> {
        let value = self.get_or_default(config_keys::LOCALE, i18n::DEFAULT_LOCALE);
        if i18n::is_supported_locale(&value) {
            Ok(value)
        } else {
            Err(invalid(config_keys::LOCALE, &value, "不支持的语言"))
        }
    }

    fn get_accepted_extensions(&self) -> ConfigResult<Vec<String>> {
        let raw = self.get_or_default(config_keys::ACCEPTED_EXTENSIONS, "xlsx,xls,csv");
        let extensions: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        if extensions.is_empty() {
            Err(invalid(config_keys::ACCEPTED_EXTENSIONS, &raw, "扩展名列表为空"))
        } else {
            Ok(extensions)
        }
    }

    // ===== 导出 =====

    fn get_export_sheet_name(&self) -> ConfigResult<String> {
        Ok(self.get_or_default(config_keys::EXPORT_SHEET_NAME, "충전 데이터"))
    }

    fn get_export_file_prefix(&self) -> ConfigResult<String> {
        Ok(self.get_or_default(config_keys::EXPORT_FILE_PREFIX, "충전데이터"))
    }

    fn get_min_column_width(&self) -> ConfigResult<usize> {
        self.parse_or_default(config_keys::EXPORT_MIN_COLUMN_WIDTH, 10)
    }

    fn get_max_column_width(&self) -> ConfigResult<usize> {
        self.parse_or_default(config_keys::EXPORT_MAX_COLUMN_WIDTH, 30)
    }

    fn get_empty_cell_width(&self) -> ConfigResult<usize> {
        self.parse_or_default(config_keys::EXPORT_EMPTY_CELL_WIDTH, 10)
    }

    fn get_header_row_height(&self) -> ConfigResult<f64> {
        self.parse_or_default(config_keys::EXPORT_HEADER_ROW_HEIGHT, 25.0)
    }

    fn get_data_row_height(&self) -> ConfigResult<f64> {
        self.parse_or_default(config_keys::EXPORT_DATA_ROW_HEIGHT, 20.0)
    }

    fn get_header_fill_argb(&self) -> ConfigResult<String> {
        let value = self.get_or_default(config_keys::EXPORT_HEADER_FILL_ARGB, "FFE0E0E0");
        if value.len() == 8 && value.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(value.to_uppercase())
        } else {
            Err(invalid(
                config_keys::EXPORT_HEADER_FILL_ARGB,
                &value,
                "需要 8 位 ARGB 十六进制",
            ))
        }
    }

    // ===== 格式注册表 =====

    fn get_extra_vendor_formats(&self) -> ConfigResult<Vec<VendorFormat>> {
        let raw = self.get_or_default(config_keys::EXTRA_VENDOR_FORMATS, "[]");
        let formats: Vec<VendorFormat> =
            serde_json::from_str(&raw).map_err(|e| invalid(config_keys::EXTRA_VENDOR_FORMATS, &raw, e.to_string()))?;

        if let Some(bad) = formats
            .iter()
            .find(|f| f.required_headers.is_empty() || f.header_row == 0)
        {
            return Err(invalid(
                config_keys::EXTRA_VENDOR_FORMATS,
                &bad.id,
                "必填表头不能为空且表头行从 1 开始",
            ));
        }

        Ok(formats)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 会话
    pub const LOCALE: &str = "locale";
    pub const ACCEPTED_EXTENSIONS: &str = "accepted_extensions";

    // 导出
    pub const EXPORT_SHEET_NAME: &str = "export.sheet_name";
    pub const EXPORT_FILE_PREFIX: &str = "export.file_prefix";
    pub const EXPORT_MIN_COLUMN_WIDTH: &str = "export.min_column_width";
    pub const EXPORT_MAX_COLUMN_WIDTH: &str = "export.max_column_width";
    pub const EXPORT_EMPTY_CELL_WIDTH: &str = "export.empty_cell_width";
    pub const EXPORT_HEADER_ROW_HEIGHT: &str = "export.header_row_height";
    pub const EXPORT_DATA_ROW_HEIGHT: &str = "export.data_row_height";
    pub const EXPORT_HEADER_FILL_ARGB: &str = "export.header_fill_argb";

    // 格式注册表
    pub const EXTRA_VENDOR_FORMATS: &str = "registry.extra_vendor_formats";
}
