// ==========================================
// 充电台账合并系统 - 台账导出器
// ==========================================
// 职责: 台账行 → 带样式的 .xlsx 字节流（内存中生成）
// 样式: 表头加粗/底色/边框/居中；数据行全边框，数值右对齐其余居中
// 列宽: clamp(最长渲染宽度 + 2, 下限, 上限)，空单元格按固定宽度计
// ==========================================

use crate::config::{ConfigError, ConfigResult, MergeConfigReader};
use crate::domain::ledger::LedgerRow;
use crate::domain::sheet::CellValue;
use crate::domain::types::CanonicalField;
use crate::engine::merge_sorter::MergeSorter;
use crate::exporter::error::{ExportError, ExportResult};
use crate::importer::data_cleaner::DataCleaner;
use chrono::NaiveDate;
use std::io::Cursor;
use tracing::{info, instrument};
use umya_spreadsheet::{Border, HorizontalAlignmentValues, Style, VerticalAlignmentValues, Worksheet};

/// 序号列表头
pub const NO_HEADER: &str = "No";

// ==========================================
// ExportSettings - 导出参数
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub sheet_name: String,
    pub file_prefix: String,
    pub min_column_width: usize,
    pub max_column_width: usize,
    pub empty_cell_width: usize,
    pub header_row_height: f64,
    pub data_row_height: f64,
    pub header_fill_argb: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            sheet_name: "충전 데이터".to_string(),
            file_prefix: "충전데이터".to_string(),
            min_column_width: 10,
            max_column_width: 30,
            empty_cell_width: 10,
            header_row_height: 25.0,
            data_row_height: 20.0,
            header_fill_argb: "FFE0E0E0".to_string(),
        }
    }
}

impl ExportSettings {
    pub fn from_config<C: MergeConfigReader + ?Sized>(config: &C) -> ConfigResult<Self> {
        let settings = Self {
            sheet_name: config.get_export_sheet_name()?,
            file_prefix: config.get_export_file_prefix()?,
            min_column_width: config.get_min_column_width()?,
            max_column_width: config.get_max_column_width()?,
            empty_cell_width: config.get_empty_cell_width()?,
            header_row_height: config.get_header_row_height()?,
            data_row_height: config.get_data_row_height()?,
            header_fill_argb: config.get_header_fill_argb()?,
        };

        if settings.min_column_width > settings.max_column_width {
            return Err(ConfigError::ValueError {
                key: "export.min_column_width".to_string(),
                value: settings.min_column_width.to_string(),
                message: format!("大于列宽上限 {}", settings.max_column_width),
            });
        }

        Ok(settings)
    }
}

// ==========================================
// LedgerExporter
// ==========================================
pub struct LedgerExporter {
    settings: ExportSettings,
    sorter: MergeSorter,
}

impl Default for LedgerExporter {
    fn default() -> Self {
        Self::new(ExportSettings::default())
    }
}

impl LedgerExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            sorter: MergeSorter::new(),
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// 导出文件名: `<prefix>_<YYYY-MM-DD>.xlsx`
    pub fn file_name_for(&self, date: NaiveDate) -> String {
        format!("{}_{}.xlsx", self.settings.file_prefix, date.format("%Y-%m-%d"))
    }

    /// 导出表头（序号列 + 标准字段）
    pub fn headers() -> Vec<&'static str> {
        std::iter::once(NO_HEADER)
            .chain(CanonicalField::ALL.iter().map(|f| f.header()))
            .collect()
    }

    /// 生成 .xlsx 字节
    ///
    /// 导出前按充电开始时间重新排序并重排序号。
    ///
    /// # 错误
    /// - EmptyExport: 没有数据行（不会生成任何字节）
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn export(&self, rows: &[LedgerRow]) -> ExportResult<Vec<u8>> {
        if rows.is_empty() {
            return Err(ExportError::EmptyExport);
        }

        let sorted = self.sorter.sort(rows.to_vec());
        let table = Self::to_table(&sorted);

        let mut book = umya_spreadsheet::new_file_empty_worksheet();
        let sheet = book
            .new_sheet(self.settings.sheet_name.as_str())
            .map_err(|e| ExportError::WriteError(e.to_string()))?;

        self.write_header(sheet);
        for (index, values) in table.iter().enumerate() {
            self.write_data_row(sheet, index as u32 + 2, values);
        }

        for (index, width) in self.column_widths(&sorted).into_iter().enumerate() {
            let col = index as u32 + 1;
            sheet
                .get_column_dimension_by_number_mut(&col)
                .set_width(width as f64);
        }

        let mut buffer = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buffer)?;
        let bytes = buffer.into_inner();

        info!(rows = sorted.len(), size = bytes.len(), "台账导出完成");
        Ok(bytes)
    }

    /// 每列宽度（含表头）
    pub fn column_widths(&self, rows: &[LedgerRow]) -> Vec<usize> {
        let cleaner = DataCleaner;
        let table = Self::to_table(rows);

        Self::headers()
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let longest = std::iter::once(cleaner.rendered_width(header))
                    .chain(table.iter().map(|values| match &values[col] {
                        v if v.is_empty() => self.settings.empty_cell_width,
                        v => cleaner.rendered_width(&v.as_text()),
                    }))
                    .max()
                    .unwrap_or(0);

                (longest + 2).clamp(self.settings.min_column_width, self.settings.max_column_width)
            })
            .collect()
    }

    fn to_table(rows: &[LedgerRow]) -> Vec<Vec<CellValue>> {
        rows.iter()
            .map(|row| {
                std::iter::once(CellValue::Number(row.no as f64))
                    .chain(CanonicalField::ALL.iter().map(|f| row.value(*f).clone()))
                    .collect()
            })
            .collect()
    }

    fn write_header(&self, sheet: &mut Worksheet) {
        for (index, header) in Self::headers().into_iter().enumerate() {
            let coordinate = (index as u32 + 1, 1u32);
            sheet.get_cell_mut(coordinate).set_value_string(header);

            let style = sheet.get_style_mut(coordinate);
            style.get_font_mut().set_bold(true).set_size(12.0);
            style.set_background_color(self.settings.header_fill_argb.as_str());
            Self::apply_borders(style);
            Self::apply_alignment(style, HorizontalAlignmentValues::Center);
        }

        sheet
            .get_row_dimension_mut(&1)
            .set_height(self.settings.header_row_height);
    }

    fn write_data_row(&self, sheet: &mut Worksheet, row: u32, values: &[CellValue]) {
        let cleaner = DataCleaner;

        for (index, value) in values.iter().enumerate() {
            let coordinate = (index as u32 + 1, row);
            let numeric = match value {
                CellValue::Empty => false,
                CellValue::Number(n) => {
                    sheet.get_cell_mut(coordinate).set_value_number(*n);
                    true
                }
                CellValue::Text(text) => {
                    sheet.get_cell_mut(coordinate).set_value_string(text.as_str());
                    cleaner.is_numeric(text)
                }
            };

            let horizontal = if numeric {
                HorizontalAlignmentValues::Right
            } else {
                HorizontalAlignmentValues::Center
            };

            let style = sheet.get_style_mut(coordinate);
            Self::apply_borders(style);
            Self::apply_alignment(style, horizontal);
        }

        sheet
            .get_row_dimension_mut(&row)
            .set_height(self.settings.data_row_height);
    }

    fn apply_borders(style: &mut Style) {
        let borders = style.get_borders_mut();
        borders.get_top_mut().set_border_style(Border::BORDER_THIN);
        borders.get_left_mut().set_border_style(Border::BORDER_THIN);
        borders.get_bottom_mut().set_border_style(Border::BORDER_THIN);
        borders.get_right_mut().set_border_style(Border::BORDER_THIN);
    }

    fn apply_alignment(style: &mut Style, horizontal: HorizontalAlignmentValues) {
        let alignment = style.get_alignment_mut();
        alignment.set_horizontal(horizontal);
        alignment.set_vertical(VerticalAlignmentValues::Center);
    }
}
