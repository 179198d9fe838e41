// ==========================================
// 充电台账合并系统 - 领域层
// ==========================================
// 职责: 实体与值类型，不含流程逻辑
// ==========================================

pub mod ledger;
pub mod sheet;
pub mod types;
pub mod uploaded_file;

// 重导出
pub use ledger::{LedgerRow, NormalizedRecord};
pub use sheet::{CellValue, RawRecord};
pub use types::{CanonicalField, FileStatus, FormMatch, CUSTOM_FORM_ID, USER_MODIFIED_FORM_NAME};
pub use uploaded_file::{FileId, UploadedFile};
