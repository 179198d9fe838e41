// ==========================================
// 充电台账合并系统 - 应用层
// ==========================================
// 职责: 会话状态与组件组装
// ==========================================

pub mod session_store;
pub mod state;

// 重导出
pub use session_store::{SessionStore, WriteOutcome};
pub use state::AppState;
