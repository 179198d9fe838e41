// ==========================================
// 充电台账合并系统 - 导入层
// ==========================================
// 职责: 文件字节 → 网格 → 格式识别 → 标准字段记录
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod file_ingestor;
pub mod file_parser;
pub mod header_matcher;
pub mod importer_trait;
pub mod normalizer;
pub mod sheet_grid;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_ingestor::FileIngestor;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use header_matcher::HeaderMatcher;
pub use normalizer::Normalizer;
pub use sheet_grid::SheetGrid;

// 重导出 Trait 接口
pub use importer_trait::{LedgerImporter, SheetDecoder};
