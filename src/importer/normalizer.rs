// ==========================================
// 充电台账合并系统 - 归一器
// ==========================================
// 职责: 已识别文件的原始行 → 标准字段记录
// 顺序: 按 FileId 降序处理（新上传的在前），行号在全部文件处理完后统一分配
// ==========================================

use crate::domain::ledger::NormalizedRecord;
use crate::domain::sheet::{CellValue, RawRecord};
use crate::domain::uploaded_file::UploadedFile;
use crate::registry::{CanonicalAlias, FormRegistry};
use std::sync::Arc;

pub struct Normalizer {
    registry: Arc<FormRegistry>,
}

impl Normalizer {
    pub fn new(registry: Arc<FormRegistry>) -> Self {
        Self { registry }
    }

    /// 归一全部成功文件（非 success 或无数据的文件被忽略）
    pub fn normalize(&self, files: &[UploadedFile]) -> Vec<NormalizedRecord> {
        let mut sources: Vec<&UploadedFile> = files
            .iter()
            .filter(|f| f.is_success() && f.data.is_some())
            .collect();
        sources.sort_by(|a, b| b.id.cmp(&a.id));

        sources
            .into_iter()
            .flat_map(|f| f.data.iter().flatten())
            .enumerate()
            .map(|(index, row)| self.normalize_row(row, index + 1))
            .collect()
    }

    /// 单行投影：每个标准字段取行内首个出现且非空的别名列
    pub fn normalize_row(&self, row: &RawRecord, row_number: usize) -> NormalizedRecord {
        let mut record = NormalizedRecord::new(row_number);
        for alias in self.registry.aliases() {
            if let Some(value) = Self::pick(row, alias) {
                record.set(alias.field, value.clone());
            }
        }
        record
    }

    fn pick<'a>(row: &'a RawRecord, alias: &CanonicalAlias) -> Option<&'a CellValue> {
        row.iter()
            .find(|(key, value)| alias.matches(key) && !value.is_empty())
            .map(|(_, value)| value)
    }
}
