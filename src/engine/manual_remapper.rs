// ==========================================
// 充电台账合并系统 - 手动映射会话
// ==========================================
// 职责: 未识别文件的人工列映射（选表头行 → 源列指派 → 预览 → 提交）
// 红线: 一个源列同一时刻只能指派给一个标准字段
// 红线: 映射不完整时拒绝提交，并列出全部未指派字段
// ==========================================

use crate::domain::ledger::NormalizedRecord;
use crate::domain::sheet::{CellValue, RawRecord};
use crate::domain::types::CanonicalField;
use crate::domain::uploaded_file::{FileId, UploadedFile};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::registry::FormRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// 表头来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum HeaderRowChoice {
    /// 沿用文件原有列名
    Original,
    /// 以第 index 行（0 起）数据作为新表头
    Row(usize),
}

/// 选定表头后的可映射视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemapView {
    pub header: HeaderRowChoice,
    pub columns: Vec<String>,
    pub rows: Vec<RawRecord>,
}

/// 提交结果：调用方据此把文件标记为“사용자 수정”并替换数据
#[derive(Debug, Clone, PartialEq)]
pub struct RemapCommit {
    pub file_id: FileId,
    /// 开启会话时的文件版本
    pub revision: u64,
    pub records: Vec<NormalizedRecord>,
}

// ==========================================
// RemapSession
// ==========================================
#[derive(Debug, Clone)]
pub struct RemapSession {
    file_id: FileId,
    revision: u64,
    fields: Vec<CanonicalField>,
    /// 文件原始数据（会话内只读）
    source: Vec<RawRecord>,
    header: HeaderRowChoice,
    rows: Vec<RawRecord>,
    columns: Vec<String>,
    assignments: BTreeMap<CanonicalField, String>,
}

impl RemapSession {
    /// 针对一个文件开启会话
    ///
    /// # 错误
    /// - NoRawData: 文件没有可用的原始数据（如解码失败）
    pub fn new(file: &UploadedFile, registry: &FormRegistry) -> ImportResult<Self> {
        let source = file.data.clone().ok_or(ImportError::NoRawData(file.id))?;
        let columns = Self::columns_of(&source);

        debug!(file_id = %file.id, rows = source.len(), columns = columns.len(), "开启手动映射会话");

        Ok(Self {
            file_id: file.id,
            revision: file.revision,
            fields: registry.canonical_fields(),
            rows: source.clone(),
            source,
            header: HeaderRowChoice::Original,
            columns,
            assignments: BTreeMap::new(),
        })
    }

    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn fields(&self) -> &[CanonicalField] {
        &self.fields
    }

    pub fn header(&self) -> HeaderRowChoice {
        self.header
    }

    pub fn rows(&self) -> &[RawRecord] {
        &self.rows
    }

    pub fn available_columns(&self) -> &[String] {
        &self.columns
    }

    pub fn assignments(&self) -> &BTreeMap<CanonicalField, String> {
        &self.assignments
    }

    pub fn view(&self) -> RemapView {
        RemapView {
            header: self.header,
            columns: self.columns.clone(),
            rows: self.rows.clone(),
        }
    }

    // ==========================================
    // 表头行选择
    // ==========================================

    /// 选择表头来源
    ///
    /// `Row(i)`: 第 i 行的值按位置成为新列名，只保留其后的行；空列名的位置被丢弃。
    /// 已有指派中引用了不再存在的列的会被清除。
    ///
    /// # 错误
    /// - HeaderRowOutOfRange: i 超出数据行数
    /// - UnevenHeaderRow: 第 i 行列数与数据列数不一致
    pub fn select_header_row(&mut self, choice: HeaderRowChoice) -> ImportResult<RemapView> {
        let (rows, columns) = match choice {
            HeaderRowChoice::Original => (self.source.clone(), Self::columns_of(&self.source)),
            HeaderRowChoice::Row(index) => self.rekey_from_row(index)?,
        };

        self.header = choice;
        self.rows = rows;
        self.columns = columns;

        let columns = &self.columns;
        self.assignments.retain(|_, column| columns.contains(column));

        debug!(file_id = %self.file_id, header = ?choice, columns = self.columns.len(), "表头行已切换");
        Ok(self.view())
    }

    fn rekey_from_row(&self, index: usize) -> ImportResult<(Vec<RawRecord>, Vec<String>)> {
        let header_row = self.source.get(index).ok_or(ImportError::HeaderRowOutOfRange {
            index,
            len: self.source.len(),
        })?;

        let expected = Self::columns_of(&self.source).len();
        if header_row.len() != expected {
            return Err(ImportError::UnevenHeaderRow {
                row: index + 1,
                expected,
                actual: header_row.len(),
            });
        }

        let cleaner = DataCleaner;
        let raw_names: Vec<String> = header_row
            .values()
            .map(|v| cleaner.clean_text(&v.as_text()))
            .collect();

        // 非空列名的位置 + 去重后的名字
        let positions: Vec<usize> = raw_names
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .map(|(pos, _)| pos)
            .collect();
        let kept: Vec<String> = positions.iter().map(|&p| raw_names[p].clone()).collect();
        let names = cleaner.unique_header_names(&kept);

        let rows = self
            .source
            .iter()
            .skip(index + 1)
            .map(|row| {
                let values: Vec<&CellValue> = row.values().collect();
                let cells = positions
                    .iter()
                    .zip(names.iter())
                    .filter_map(|(&pos, name)| values.get(pos).map(|v| (name.clone(), (*v).clone())))
                    .collect();
                RawRecord::from_cells(cells)
            })
            .collect();

        Ok((rows, names))
    }

    /// 可用列名：首行的列顺序
    fn columns_of(rows: &[RawRecord]) -> Vec<String> {
        rows.first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    // ==========================================
    // 列指派
    // ==========================================

    /// 把源列指派给标准字段
    ///
    /// 若该列已被其他字段占用，旧字段的指派被撤销并返回该字段。
    ///
    /// # 错误
    /// - ColumnNotFound: 当前表头下不存在该列
    pub fn assign_column(
        &mut self,
        field: CanonicalField,
        column: &str,
    ) -> ImportResult<Option<CanonicalField>> {
        if !self.columns.iter().any(|c| c == column) {
            return Err(ImportError::ColumnNotFound(column.to_string()));
        }

        let displaced = self
            .assignments
            .iter()
            .find(|(other, used)| **other != field && used.as_str() == column)
            .map(|(other, _)| *other);

        if let Some(other) = displaced {
            self.assignments.remove(&other);
        }
        self.assignments.insert(field, column.to_string());

        Ok(displaced)
    }

    /// 某字段下拉框可选的列（排除已被其他字段占用的列）
    pub fn candidate_columns(&self, field: CanonicalField) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| {
                !self
                    .assignments
                    .iter()
                    .any(|(other, used)| *other != field && used == *column)
            })
            .cloned()
            .collect()
    }

    /// 未指派字段（按标准字段顺序）
    pub fn unassigned_fields(&self) -> Vec<CanonicalField> {
        self.fields
            .iter()
            .filter(|f| !self.assignments.contains_key(f))
            .copied()
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unassigned_fields().is_empty()
    }

    // ==========================================
    // 预览 / 提交 / 重置
    // ==========================================

    /// 按当前指派投影全部行（行缺列时为空值）
    ///
    /// # 错误
    /// - IncompleteMapping: 仍有字段未指派
    pub fn preview(&self) -> ImportResult<Vec<NormalizedRecord>> {
        let missing = self.unassigned_fields();
        if !missing.is_empty() {
            return Err(ImportError::IncompleteMapping { fields: missing });
        }

        let records = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let mut record = NormalizedRecord::new(index + 1);
                for (field, column) in &self.assignments {
                    let value = row.get(column).cloned().unwrap_or_default();
                    record.set(*field, value);
                }
                record
            })
            .collect();

        Ok(records)
    }

    /// 确认提交；会话本身不修改文件
    pub fn commit(&self) -> ImportResult<RemapCommit> {
        let records = self.preview()?;
        info!(file_id = %self.file_id, rows = records.len(), "手动映射已确认");
        Ok(RemapCommit {
            file_id: self.file_id,
            revision: self.revision,
            records,
        })
    }

    /// 清空全部指派（表头选择保持不变）
    pub fn reset(&mut self) {
        self.assignments.clear();
    }
}
