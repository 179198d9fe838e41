// ==========================================
// 充电台账合并系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: Display 面向日志；界面文案走 user_message（i18n）
// ==========================================

use crate::domain::types::CanonicalField;
use crate::domain::uploaded_file::FileId;
use crate::i18n;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedExtension(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("工作簿无工作表")]
    EmptyWorkbook,

    // ===== 表头匹配错误 =====
    #[error("表头行设置错误 (行 {header_row})")]
    MalformedHeader { header_row: usize },

    #[error("未登记的厂商格式")]
    UnsupportedFormat,

    // ===== 手动映射错误 =====
    #[error("文件无可映射数据: file_id={0}")]
    NoRawData(FileId),

    #[error("表头行越界: index={index}, 数据行数={len}")]
    HeaderRowOutOfRange { index: usize, len: usize },

    #[error("表头行列数不一致 (行 {row}): 期望 {expected} 列，实际 {actual} 列")]
    UnevenHeaderRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("源列不存在: {0}")]
    ColumnNotFound(String),

    #[error("字段映射不完整，未指定: {}", join_fields(.fields))]
    IncompleteMapping { fields: Vec<CanonicalField> },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn join_fields(fields: &[CanonicalField]) -> String {
    fields
        .iter()
        .map(|f| f.header())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ImportError {
    /// 损坏/不可读的文件字节
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ImportError::FileReadError(_)
                | ImportError::ExcelParseError(_)
                | ImportError::CsvParseError(_)
                | ImportError::EmptyWorkbook
                | ImportError::Other(_)
        )
    }

    /// 面向用户的原因说明
    pub fn user_message(&self, locale: &str) -> String {
        match self {
            ImportError::UnsupportedExtension(_) => i18n::t_in(locale, "ingest.excel_only"),
            ImportError::MalformedHeader { .. } => i18n::t_in(locale, "ingest.malformed_header"),
            ImportError::UnsupportedFormat => i18n::t_in(locale, "ingest.unsupported_format"),
            ImportError::NoRawData(_) => i18n::t_in(locale, "remap.no_data"),
            ImportError::HeaderRowOutOfRange { index, .. } => i18n::t_with_args_in(
                locale,
                "remap.header_row_out_of_range",
                &[("row", &(index + 1).to_string())],
            ),
            ImportError::UnevenHeaderRow {
                row,
                expected,
                actual,
            } => i18n::t_with_args_in(
                locale,
                "remap.uneven_header",
                &[
                    ("row", &row.to_string()),
                    ("expected", &expected.to_string()),
                    ("actual", &actual.to_string()),
                ],
            ),
            ImportError::ColumnNotFound(column) => {
                i18n::t_with_args_in(locale, "remap.column_not_found", &[("column", column)])
            }
            ImportError::IncompleteMapping { fields } => i18n::t_with_args_in(
                locale,
                "remap.incomplete",
                &[("fields", &join_fields(fields))],
            ),
            _ => i18n::t_in(locale, "ingest.processing_failed"),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
