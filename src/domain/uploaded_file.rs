// ==========================================
// 充电台账合并系统 - 上传文件实体
// ==========================================
// 职责: 单个上传文件的生命周期记录
// 状态流转: pending → success | error；error → success（手动映射）
// 红线: 数据只会被重新标记，不会被清空（解析失败除外）
// ==========================================

use crate::domain::sheet::RawRecord;
use crate::domain::types::{FileStatus, FormMatch, CUSTOM_FORM_ID, USER_MODIFIED_FORM_NAME};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// FileId - 上传标识（按上传时间单调递增）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// UploadedFile
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
    /// 命中的表头行（1 起）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RawRecord>>,
    pub selected: bool,
    /// 槽位版本：每次重新选择文件或写回映射结果时递增，由会话存储维护
    #[serde(skip)]
    pub revision: u64,
}

impl UploadedFile {
    /// 选择文件时创建（无数据）
    pub fn pending<S: Into<String>>(id: FileId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            status: FileStatus::Pending,
            error_message: None,
            form_id: None,
            form_name: None,
            header_row: None,
            data: None,
            selected: false,
            revision: 0,
        }
    }

    /// 空的占位输入框
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty() && self.status == FileStatus::Pending && self.data.is_none()
    }

    pub fn is_success(&self) -> bool {
        self.status == FileStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == FileStatus::Error
    }

    pub fn row_count(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    /// 解析完成：写入首行表头的原始数据（无论格式是否命中）
    pub fn attach_raw_data(&mut self, data: Vec<RawRecord>) {
        self.data = Some(data);
    }

    /// 格式命中
    pub fn mark_matched(&mut self, form: FormMatch, data: Vec<RawRecord>) {
        self.status = FileStatus::Success;
        self.error_message = None;
        self.form_id = Some(form.form_id);
        self.form_name = Some(form.form_name);
        self.header_row = Some(form.header_row);
        self.data = Some(data);
    }

    /// 格式未命中：保留原始数据以便手动映射
    pub fn mark_unsupported<S: Into<String>>(&mut self, message: S) {
        self.status = FileStatus::Error;
        self.error_message = Some(message.into());
        self.form_id = None;
        self.form_name = None;
        self.header_row = None;
    }

    /// 解析失败：无可用数据
    pub fn mark_failed<S: Into<String>>(&mut self, message: S) {
        self.status = FileStatus::Error;
        self.error_message = Some(message.into());
        self.form_id = None;
        self.form_name = None;
        self.header_row = None;
        self.data = None;
    }

    /// 手动映射提交：数据替换为归一后的记录
    pub fn mark_user_modified(&mut self, data: Vec<RawRecord>) {
        self.status = FileStatus::Success;
        self.error_message = None;
        self.form_id = Some(CUSTOM_FORM_ID.to_string());
        self.form_name = Some(USER_MODIFIED_FORM_NAME.to_string());
        self.data = Some(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheet::CellValue;

    fn one_row() -> Vec<RawRecord> {
        vec![RawRecord::from_cells(vec![(
            "Foo".to_string(),
            CellValue::text("1"),
        )])]
    }

    #[test]
    fn test_unsupported_keeps_data() {
        let mut file = UploadedFile::pending(FileId(1), "a.xlsx");
        file.attach_raw_data(one_row());
        file.mark_unsupported("unsupported");

        assert!(file.is_error());
        assert_eq!(file.row_count(), 1);
    }

    #[test]
    fn test_user_modified_marker() {
        let mut file = UploadedFile::pending(FileId(1), "a.xlsx");
        file.attach_raw_data(one_row());
        file.mark_unsupported("unsupported");
        file.mark_user_modified(one_row());

        assert!(file.is_success());
        assert_eq!(file.form_id.as_deref(), Some(CUSTOM_FORM_ID));
        assert_eq!(file.form_name.as_deref(), Some(USER_MODIFIED_FORM_NAME));
        assert_eq!(file.error_message, None);
    }

    #[test]
    fn test_placeholder() {
        assert!(UploadedFile::pending(FileId(1), "").is_placeholder());
        assert!(!UploadedFile::pending(FileId(1), "a.xlsx").is_placeholder());
    }
}
