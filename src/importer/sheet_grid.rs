// ==========================================
// 充电台账合并系统 - 工作表网格
// ==========================================
// 职责: 解析结果的矩形网格（A1 对齐），可按任意表头行重新取键
// 说明: 同一网格可反复按不同表头行取数，无需重新读取文件
// ==========================================

use crate::domain::sheet::{CellValue, RawRecord};
use crate::importer::data_cleaner::DataCleaner;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl SheetGrid {
    /// 由行列表构建，短行以空值补齐
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 取第 `index` 行（0 起）
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// 取表头行文本（`header_row` 为 1 起行号；越界返回 None）
    pub fn header_at(&self, header_row: usize) -> Option<Vec<String>> {
        if header_row == 0 {
            return None;
        }
        let cleaner = DataCleaner;
        self.row(header_row - 1).map(|cells| {
            cells
                .iter()
                .map(|c| cleaner.clean_text(&c.as_text()))
                .collect()
        })
    }

    /// 以 `header_row` 为表头，取其后的数据行（跳过全空行）
    pub fn records_at(&self, header_row: usize) -> Vec<RawRecord> {
        let headers = match self.header_at(header_row) {
            Some(headers) => DataCleaner.unique_header_names(&headers),
            None => return Vec::new(),
        };

        self.rows
            .iter()
            .skip(header_row)
            .map(|cells| {
                let pairs = headers
                    .iter()
                    .cloned()
                    .zip(cells.iter().cloned())
                    .collect();
                RawRecord::from_cells(pairs)
            })
            .filter(|record| !record.is_blank())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    fn sample_grid() -> SheetGrid {
        SheetGrid::from_rows(vec![
            text_row(&["충전 이력"]),
            text_row(&[]),
            text_row(&["No", "충전기 ID", "충전량"]),
            text_row(&["1", "CH-01", "12.5"]),
            text_row(&["", "", ""]),
            text_row(&["2", "CH-02"]),
        ])
    }

    #[test]
    fn test_grid_is_rectangular() {
        let grid = sample_grid();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.row(0).map(<[CellValue]>::len), Some(3));
    }

    #[test]
    fn test_header_at_offsets() {
        let grid = sample_grid();
        assert_eq!(
            grid.header_at(3),
            Some(vec!["No".to_string(), "충전기 ID".to_string(), "충전량".to_string()])
        );
        assert_eq!(grid.header_at(0), None);
        assert_eq!(grid.header_at(10), None);
    }

    #[test]
    fn test_records_at_skips_blank_rows() {
        let grid = sample_grid();
        let records = grid.records_at(3);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("충전기 ID"), Some(&CellValue::text("CH-01")));
        assert_eq!(records[1].get("충전량"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_records_at_first_row_uses_placeholder_names() {
        let grid = sample_grid();
        let records = grid.records_at(1);
        let keys: Vec<&str> = records[0].keys().collect();
        assert_eq!(keys, vec!["충전 이력", "__EMPTY", "__EMPTY_1"]);
        // 第 2 行全空被跳过，第 3 行起为数据
        assert_eq!(records.len(), 3);
    }
}
