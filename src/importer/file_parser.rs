// ==========================================
// 充电台账合并系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输入: 内存字节（不落盘）
// ==========================================

use crate::domain::sheet::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::SheetDecoder;
use crate::importer::sheet_grid::SheetGrid;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;

/// 日期单元格的文本格式
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl SheetDecoder for CsvParser {
    fn decode(&self, bytes: &[u8]) -> ImportResult<SheetGrid> {
        let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(false) // 表头行由匹配阶段决定
            .flexible(true) // 允许行长度不一致
            .from_reader(content);

        // csv 会跳过空行；按记录起始行号补回空行，保持表头行号与表格一致
        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        let mut next_line: u64 = 1;
        for result in reader.records() {
            let record = result?;
            if let Some(position) = record.position() {
                while next_line < position.line() {
                    rows.push(Vec::new());
                    next_line += 1;
                }
            }

            // 引号内的换行使一条记录跨多行
            let embedded = record.iter().map(|v| v.matches('\n').count() as u64).sum::<u64>();
            next_line += 1 + embedded;
            rows.push(record.iter().map(|v| CellValue::from(v.trim())).collect());
        }

        Ok(SheetGrid::from_rows(rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl SheetDecoder for ExcelParser {
    fn decode(&self, bytes: &[u8]) -> ImportResult<SheetGrid> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(ImportError::EmptyWorkbook)??;

        // calamine 的 range 从首个非空单元格开始，补齐到 A1
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];

        for data_row in range.rows() {
            let mut cells = vec![CellValue::Empty; start_col as usize];
            cells.extend(data_row.iter().map(excel_cell_value));
            rows.push(cells);
        }

        Ok(SheetGrid::from_rows(rows))
    }
}

/// calamine 单元格 → CellValue
fn excel_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.trim()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Text(ndt.format(DATETIME_FORMAT).to_string()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.trim()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        #[allow(unreachable_patterns)]
        other => CellValue::from(other.to_string().trim()),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 取小写扩展名
    pub fn extension_of(file_name: &str) -> String {
        Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }

    pub fn parse(&self, bytes: &[u8], file_name: &str) -> ImportResult<SheetGrid> {
        let ext = Self::extension_of(file_name);

        match ext.as_str() {
            "csv" => CsvParser.decode(bytes),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => ExcelParser.decode(bytes),
            _ => Err(ImportError::UnsupportedExtension(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_parser_valid_bytes() {
        let bytes = "충전기 ID,충전량\nCH-01,12.5\nCH-02,3\n".as_bytes();
        let grid = CsvParser.decode(bytes).unwrap();

        assert_eq!(grid.height(), 3);
        let records = grid.records_at(1);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("충전기 ID"), Some(&CellValue::text("CH-01")));
        assert_eq!(records[1].get("충전량"), Some(&CellValue::text("3")));
    }

    #[test]
    fn test_csv_parser_strips_bom_and_pads_rows() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("A,B,C\n1\n".as_bytes());
        let grid = CsvParser.decode(&bytes).unwrap();

        assert_eq!(grid.header_at(1), Some(vec!["A".into(), "B".into(), "C".into()]));
        assert_eq!(grid.width(), 3);
    }

    #[test]
    fn test_csv_parser_keeps_blank_lines_as_rows() {
        let bytes = "충전 이력 조회\n\nNo,충전기 ID\n1,CH-01\n".as_bytes();
        let grid = CsvParser.decode(bytes).unwrap();

        assert_eq!(grid.height(), 4);
        assert_eq!(grid.header_at(2), Some(vec![String::new(), String::new()]));
        assert_eq!(grid.header_at(3), Some(vec!["No".into(), "충전기 ID".into()]));
        assert_eq!(grid.records_at(3)[0].get("충전기 ID"), Some(&CellValue::text("CH-01")));
    }

    #[test]
    fn test_csv_parser_multiline_field_does_not_add_rows() {
        let bytes = "A,B\n\"x\ny\",2\n3,4\n".as_bytes();
        let grid = CsvParser.decode(bytes).unwrap();

        assert_eq!(grid.height(), 3);
        assert_eq!(grid.row(2), Some(&[CellValue::text("3"), CellValue::text("4")][..]));
    }

    #[test]
    fn test_csv_parser_invalid_utf8() {
        let bytes = [b'A', b',', 0xFF, 0xFE, b'\n'];
        let result = CsvParser.decode(&bytes);
        assert!(matches!(result, Err(ImportError::CsvParseError(_))));
    }

    #[test]
    fn test_excel_parser_corrupt_bytes() {
        let result = ExcelParser.decode(b"definitely not a workbook");
        let err = result.unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse(b"", "notes.txt");
        assert!(matches!(result, Err(ImportError::UnsupportedExtension(ext)) if ext == "txt"));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(UniversalFileParser::extension_of("정산.XLSX"), "xlsx");
        assert_eq!(UniversalFileParser::extension_of("noext"), "");
    }
}
