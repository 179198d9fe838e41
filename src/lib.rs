// ==========================================
// 充电台账合并系统 - 核心库
// ==========================================
// 职责: 充电桩厂商结算表的格式识别、字段归一、合并排序与导出
// 系统定位: 单会话内存工作集 (无持久化)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ko");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 厂商格式注册表
pub mod registry;

// 导入层 - 解析 / 表头匹配 / 归一
pub mod importer;

// 引擎层 - 手动映射 / 合并排序
pub mod engine;

// 导出层 - 台账写出
pub mod exporter;

// 配置层 - 会话配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 应用层 - 会话状态
pub mod app;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CanonicalField, FileStatus, FormMatch};

// 领域实体
pub use domain::{CellValue, FileId, LedgerRow, NormalizedRecord, RawRecord, UploadedFile};

// 解析产物
pub use importer::SheetGrid;

// 注册表
pub use registry::{FormRegistry, VendorFormat};

// 引擎
pub use engine::{DateRange, HeaderRowChoice, LedgerBuilder, MergeSorter, RemapCommit, RemapSession};

// 导出
pub use exporter::{ExportSettings, LedgerExporter};

// 配置
pub use config::{ConfigManager, MergeConfigReader};

// API
pub use api::{ApiError, ApiResult, LedgerExport, LedgerView, MergeApi};

// 应用状态
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "충전 데이터 병합";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
