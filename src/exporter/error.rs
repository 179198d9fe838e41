// ==========================================
// 充电台账合并系统 - 导出模块错误类型
// ==========================================

use crate::i18n;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("无可导出的数据")]
    EmptyExport,

    #[error("工作簿生成失败: {0}")]
    WriteError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExportError {
    pub fn user_message(&self, locale: &str) -> String {
        match self {
            ExportError::EmptyExport => i18n::t_in(locale, "export.empty"),
            _ => i18n::t_in(locale, "export.failed"),
        }
    }
}

impl From<umya_spreadsheet::writer::xlsx::XlsxError> for ExportError {
    fn from(err: umya_spreadsheet::writer::xlsx::XlsxError) -> Self {
        ExportError::WriteError(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
