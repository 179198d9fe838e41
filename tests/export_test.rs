// ==========================================
// 台账导出集成测试
// ==========================================
// 测试目标: 台账视图 → .xlsx 字节 → 读回校验
// ==========================================


use chrono::NaiveDate;
use ev_charge_ledger::exporter::ExportError;
use ev_charge_ledger::importer::{ExcelParser, SheetDecoder};
use ev_charge_ledger::logging;
use ev_charge_ledger::{ApiError, CellValue, DateRange};
use test_helpers::*;

fn may_12() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 12).unwrap()
}

#[tokio::test]
async fn test_export_without_rows_is_rejected() {
    logging::init_test();

    let state = new_state();
    let err = state.merge_api.export_at(&DateRange::all(), may_12()).await.unwrap_err();

    assert!(matches!(err, ApiError::Export(ExportError::EmptyExport)));
    assert_eq!(err.user_message("ko"), "다운로드할 데이터가 없습니다.");
}

#[tokio::test]
async fn test_export_writes_sorted_ledger() {
    let state = new_state();
    let api = &state.merge_api;

    api.submit_file(
        None,
        "a.xlsx",
        chargein_xlsx(&[
            charge("CH-2", "2024-05-03 09:00:00"),
            charge("CH-1", "2024-05-01 09:00:00"),
        ])
        .unwrap(),
    )
    .await
    .unwrap();

    let export = api.export_at(&DateRange::all(), may_12()).await.unwrap();
    assert_eq!(export.file_name, "충전데이터_2024-05-12.xlsx");

    let grid = ExcelParser.decode(&export.bytes).unwrap();
    assert_eq!(grid.height(), 3);
    assert_eq!(
        grid.header_at(1),
        Some(strings(&["No", "충전기ID", "충전시작", "충전종료", "충전시간", "충전량", "충전금액"]))
    );

    let records = grid.records_at(1);
    assert_eq!(records[0].get("No"), Some(&CellValue::Number(1.0)));
    assert_eq!(records[0].get("충전기ID"), Some(&CellValue::text("CH-1")));
    assert_eq!(records[1].get("충전기ID"), Some(&CellValue::text("CH-2")));
    assert_eq!(records[1].get("충전종료"), Some(&CellValue::Empty));
}

#[tokio::test]
async fn test_export_respects_date_filter() {
    let state = new_state();
    let api = &state.merge_api;

    api.submit_file(
        None,
        "a.xlsx",
        evsis_xlsx(&[
            charge("APR", "2024-04-20 09:00:00"),
            charge("MAY", "2024-05-20 09:00:00"),
        ])
        .unwrap(),
    )
    .await
    .unwrap();

    let may = DateRange::from_dates(
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
    );
    let export = api.export_at(&may, may_12()).await.unwrap();

    let records = ExcelParser.decode(&export.bytes).unwrap().records_at(1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("충전기ID"), Some(&CellValue::text("MAY")));

    // 区间外无数据时同样拒绝导出
    let june = DateRange::from_dates(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
    );
    assert!(matches!(
        api.export_at(&june, may_12()).await,
        Err(ApiError::Export(ExportError::EmptyExport))
    ));
}
