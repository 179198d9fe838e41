// ==========================================
// 摄入流水线集成测试
// ==========================================
// 测试目标: 真实 .xlsx/.csv 字节 → 格式识别 → 文件状态
// ==========================================


use ev_charge_ledger::importer::{FileIngestor, LedgerImporter};
use ev_charge_ledger::logging;
use ev_charge_ledger::registry::vendor_format::CHARGEIN_HEADERS;
use ev_charge_ledger::{CellValue, FileId, FileStatus, FormRegistry};
use std::sync::Arc;
use test_helpers::*;

fn ingestor() -> FileIngestor {
    FileIngestor::new(Arc::new(FormRegistry::builtin()))
}

#[tokio::test]
async fn test_chargein_matches_at_header_row_three() {
    logging::init_test();

    let bytes = chargein_xlsx(&[
        charge("CH-01", "2024-05-01 09:00:00"),
        charge("CH-02", "2024-05-01 10:00:00"),
    ])
    .unwrap();

    let file = ingestor().ingest(FileId(1), bytes, "차지인_5월.xlsx").await;

    assert_eq!(file.status, FileStatus::Success);
    assert_eq!(file.name, "차지인_5월.xlsx");
    assert_eq!(file.form_id.as_deref(), Some("chargin"));
    assert_eq!(file.form_name.as_deref(), Some("차지인"));
    assert_eq!(file.header_row, Some(3));
    assert_eq!(file.row_count(), 2);

    let first = &file.data.as_ref().unwrap()[0];
    assert_eq!(first.get("충전기 ID"), Some(&CellValue::text("CH-01")));
    assert_eq!(first.get("사용금액"), Some(&CellValue::text("4500")));
}

#[tokio::test]
async fn test_evsis_matches_at_header_row_one() {
    let bytes = evsis_xlsx(&[charge("EV-9", "2024-05-03 12:00:00")]).unwrap();
    let file = ingestor().ingest(FileId(2), bytes, "evsis.xlsx").await;

    assert!(file.is_success());
    assert_eq!(file.form_id.as_deref(), Some("evsis"));
    assert_eq!(file.header_row, Some(1));
    assert_eq!(file.row_count(), 1);
}

#[tokio::test]
async fn test_unknown_headers_keep_raw_data() {
    let file = ingestor().ingest(FileId(3), foo_bar_xlsx().unwrap(), "foo.xlsx").await;

    assert_eq!(file.status, FileStatus::Error);
    assert_eq!(file.error_message.as_deref(), Some("지원하지 않는 엑셀 형식입니다."));
    assert!(file.form_id.is_none());

    let data = file.data.as_ref().expect("raw data retained");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].get("Foo"), Some(&CellValue::text("1")));
}

#[tokio::test]
async fn test_leading_blank_rows_keep_absolute_offsets() {
    // 前两行完全为空，表头仍在第 3 行
    let mut rows = chargein_rows(&[charge("CH-07", "2024-05-01 09:00:00")]);
    rows[0] = Vec::new();
    let bytes = xlsx_bytes(&rows).unwrap();

    let file = ingestor().ingest(FileId(4), bytes, "blank_top.xlsx").await;
    assert!(file.is_success());
    assert_eq!(file.header_row, Some(3));
    assert_eq!(file.row_count(), 1);
}

#[tokio::test]
async fn test_csv_in_registered_format() {
    let bytes = csv_bytes(&chargein_rows(&[charge("CSV-1", "2024-05-01 09:00:00")])).unwrap();
    let file = ingestor().ingest(FileId(5), bytes, "차지인.csv").await;

    assert!(file.is_success());
    assert_eq!(file.form_id.as_deref(), Some("chargin"));
    assert_eq!(file.header_row, Some(3));
    assert_eq!(file.row_count(), 1);
}

#[tokio::test]
async fn test_csv_blank_line_keeps_header_offset() {
    // 第 2 行是真正的空行
    let csv = format!(
        "충전 이력 조회\n\n{}\n1,버스차고지,A-충전기,CSV-2,회원카드,2024-05-01 09:00:00,,Y,30,12.5,4500\n",
        CHARGEIN_HEADERS.join(",")
    );
    let file = ingestor().ingest(FileId(8), csv.into_bytes(), "차지인.csv").await;

    assert!(file.is_success(), "{:?}", file.error_message);
    assert_eq!(file.header_row, Some(3));
    let first = &file.data.as_ref().unwrap()[0];
    assert_eq!(first.get("충전기 ID"), Some(&CellValue::text("CSV-2")));
}

#[tokio::test]
async fn test_corrupt_workbook_is_processing_failure() {
    let file = ingestor()
        .ingest(FileId(6), vec![0x50, 0x4b, 0x00, 0x01, 0x02], "corrupt.xlsx")
        .await;

    assert!(file.is_error());
    assert!(file.data.is_none());
    assert_eq!(file.error_message.as_deref(), Some("파일 검증 중 오류가 발생했습니다."));
}

#[tokio::test]
async fn test_english_locale_messages() {
    let ingestor = FileIngestor::with_locale(Arc::new(FormRegistry::builtin()), "en");
    let file = ingestor.ingest(FileId(7), foo_bar_xlsx().unwrap(), "foo.xlsx").await;
    assert_eq!(file.error_message.as_deref(), Some("Unsupported spreadsheet format."));
}
