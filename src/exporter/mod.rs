// ==========================================
// 充电台账合并系统 - 导出层
// ==========================================

pub mod error;
pub mod ledger_exporter;

pub use error::{ExportError, ExportResult};
pub use ledger_exporter::{ExportSettings, LedgerExporter};
