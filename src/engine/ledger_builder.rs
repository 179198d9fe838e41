// ==========================================
// 充电台账合并系统 - 台账重算
// ==========================================
// 职责: (文件集合, 日期区间) → 台账行；每次从头重算，不做增量修补
// 流程: 归一 → 投影为台账行 → 过滤/排序/重排序号
// ==========================================

use crate::domain::ledger::LedgerRow;
use crate::domain::uploaded_file::UploadedFile;
use crate::engine::merge_sorter::{DateRange, MergeSorter};
use crate::importer::normalizer::Normalizer;
use crate::registry::FormRegistry;
use std::sync::Arc;
use tracing::debug;

pub struct LedgerBuilder {
    normalizer: Normalizer,
    sorter: MergeSorter,
}

impl LedgerBuilder {
    pub fn new(registry: Arc<FormRegistry>) -> Self {
        Self {
            normalizer: Normalizer::new(registry),
            sorter: MergeSorter::new(),
        }
    }

    /// 全量台账（不过滤）
    pub fn recompute(&self, files: &[UploadedFile]) -> Vec<LedgerRow> {
        self.recompute_in(files, &DateRange::all())
    }

    /// 指定日期区间的台账
    pub fn recompute_in(&self, files: &[UploadedFile], range: &DateRange) -> Vec<LedgerRow> {
        let rows: Vec<LedgerRow> = self
            .normalizer
            .normalize(files)
            .iter()
            .map(LedgerRow::from_normalized)
            .collect();

        let total = rows.len();
        let view = self.sorter.filter_by_date_range(rows, range);
        debug!(total, visible = view.len(), bounded = range.is_bounded(), "台账已重算");
        view
    }
}
