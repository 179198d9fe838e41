// ==========================================
// 充电台账合并系统 - API 层
// ==========================================
// 职责: 提供面向界面的业务接口
// ==========================================

pub mod error;
pub mod merge_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use merge_api::{LedgerExport, LedgerView, MergeApi};
