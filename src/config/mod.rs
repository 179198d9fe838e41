// ==========================================
// 充电台账合并系统 - 配置层
// ==========================================
// 职责: 会话配置加载与类型化读取
// 来源: EV_LEDGER_CONFIG 指定文件 / 用户配置目录 / 默认值
// ==========================================

pub mod config_manager;
pub mod error;
pub mod merge_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, get_default_config_path, ConfigManager, CONFIG_PATH_ENV};
pub use error::{ConfigError, ConfigResult};
pub use merge_config_trait::MergeConfigReader;
