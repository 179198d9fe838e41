// ==========================================
// 充电台账合并系统 - 引擎层
// ==========================================
// 职责: 手动映射 / 合并排序 / 台账重算
// 红线: 台账是重算投影，任何状态变化后从头生成
// ==========================================

pub mod ledger_builder;
pub mod manual_remapper;
pub mod merge_sorter;

// 重导出核心引擎
pub use ledger_builder::LedgerBuilder;
pub use manual_remapper::{HeaderRowChoice, RemapCommit, RemapSession, RemapView};
pub use merge_sorter::{parse_timestamp, DateRange, MergeSorter};
