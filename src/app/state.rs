// ==========================================
// 充电台账合并系统 - 应用状态
// ==========================================
// 职责: 按配置组装一个会话的全部组件
// 说明: 每个会话一个 AppState，不做进程级单例
// ==========================================

use crate::api::{ApiResult, MergeApi};
use crate::config::{ConfigManager, MergeConfigReader};
use crate::exporter::{ExportSettings, LedgerExporter};
use crate::importer::FileIngestor;
use crate::registry::FormRegistry;
use std::sync::Arc;
use tracing::info;

/// 应用状态
pub struct AppState {
    /// 格式注册表（内置 + 配置追加）
    pub registry: Arc<FormRegistry>,

    /// 合并API
    pub merge_api: Arc<MergeApi>,
}

impl AppState {
    /// 按配置创建
    pub fn new<C: MergeConfigReader + ?Sized>(config: &C) -> ApiResult<Self> {
        let locale = config.get_locale()?;
        let registry = Arc::new(FormRegistry::extended(config.get_extra_vendor_formats()?));

        let ingestor = FileIngestor::with_locale(registry.clone(), &locale);
        let exporter = LedgerExporter::new(ExportSettings::from_config(config)?);

        let merge_api = MergeApi::new(
            registry.clone(),
            Arc::new(ingestor),
            exporter,
            config.get_accepted_extensions()?,
            &locale,
        );

        info!(
            locale = %locale,
            formats = registry.formats().len(),
            "会话已初始化"
        );

        Ok(Self {
            registry,
            merge_api: Arc::new(merge_api),
        })
    }

    /// 使用默认配置来源（环境变量 / 用户配置目录 / 默认值）
    pub fn from_default_config() -> ApiResult<Self> {
        let config = ConfigManager::load_default()?;
        Self::new(&config)
    }
}
