// ==========================================
// 合并 API 集成测试
// ==========================================
// 测试目标: 上传 → 台账重算 → 删除/勾选 → 批量拖入
// ==========================================


use chrono::NaiveDate;
use ev_charge_ledger::{ApiError, CellValue, DateRange, FileStatus};
use test_helpers::*;

#[tokio::test]
async fn test_three_and_five_rows_merge_into_sorted_ledger() {
    let state = new_state();
    let api = &state.merge_api;

    let first = chargein_xlsx(&[
        charge("A-3", "2024-05-06 09:00:00"),
        charge("A-1", "2024-05-01 09:00:00"),
        charge("A-2", "2024-05-04 09:00:00"),
    ])
    .unwrap();
    let second = evsis_xlsx(&[
        charge("B-5", "2024-05-08 09:00:00"),
        charge("B-1", "2024-05-02 09:00:00"),
        charge("B-2", "2024-05-03 09:00:00"),
        charge("B-4", "2024-05-07 09:00:00"),
        charge("B-3", "2024-05-05 09:00:00"),
    ])
    .unwrap();

    api.submit_file(None, "a.xlsx", first).await.unwrap();
    api.submit_file(None, "b.xlsx", second).await.unwrap();

    let view = api.ledger(&DateRange::all()).await;
    assert_eq!(view.rows.len(), 8);
    assert!(!view.needs_confirmation());
    assert_eq!(view.rows.iter().map(|r| r.no).collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());

    let ids: Vec<String> = view.rows.iter().map(|r| r.charger_id.as_text()).collect();
    assert_eq!(ids, vec!["A-1", "B-1", "B-2", "A-2", "B-3", "A-3", "B-4", "B-5"]);
}

#[tokio::test]
async fn test_delete_removes_ledger_contribution() {
    let state = new_state();
    let api = &state.merge_api;

    let a = api
        .submit_file(None, "a.xlsx", chargein_xlsx(&[charge("A", "2024-05-01 09:00:00")]).unwrap())
        .await
        .unwrap();
    api.submit_file(None, "b.xlsx", evsis_xlsx(&[charge("B", "2024-05-02 09:00:00")]).unwrap())
        .await
        .unwrap();
    assert_eq!(api.ledger(&DateRange::all()).await.rows.len(), 2);

    api.delete_file(a.id).await.unwrap();
    let view = api.ledger(&DateRange::all()).await;
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].charger_id, CellValue::text("B"));

    assert!(matches!(api.delete_file(a.id).await, Err(ApiError::NotFound(id)) if id == a.id));
}

#[tokio::test]
async fn test_error_files_are_reported_but_excluded() {
    let state = new_state();
    let api = &state.merge_api;

    api.submit_file(None, "a.xlsx", chargein_xlsx(&[charge("A", "2024-05-01 09:00:00")]).unwrap())
        .await
        .unwrap();
    let bad = api.submit_file(None, "foo.xlsx", foo_bar_xlsx().unwrap()).await.unwrap();
    assert_eq!(bad.status, FileStatus::Error);

    let view = api.ledger(&DateRange::all()).await;
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.excluded_error_files, vec![bad.id]);
    assert!(view.needs_confirmation());
}

#[tokio::test]
async fn test_date_filter_and_clear() {
    let state = new_state();
    let api = &state.merge_api;

    api.submit_file(
        None,
        "a.xlsx",
        chargein_xlsx(&[
            charge("EARLY", "2024-04-30 23:59:59"),
            charge("MID", "2024-05-10 08:00:00"),
            charge("BAD", "확인불가"),
            charge("LATE", "2024-05-31 23:59:59"),
        ])
        .unwrap(),
    )
    .await
    .unwrap();

    let may = DateRange::from_dates(
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
    );
    let filtered = api.ledger(&may).await;
    let ids: Vec<String> = filtered.rows.iter().map(|r| r.charger_id.as_text()).collect();
    assert_eq!(ids, vec!["MID", "LATE"]);

    let cleared = api.ledger(&DateRange::all()).await;
    let ids: Vec<String> = cleared.rows.iter().map(|r| r.charger_id.as_text()).collect();
    assert_eq!(ids, vec!["EARLY", "MID", "LATE", "BAD"]);
}

#[tokio::test]
async fn test_missing_charger_id_falls_back_to_row_label() {
    let state = new_state();
    let api = &state.merge_api;

    api.submit_file(None, "a.xlsx", chargein_xlsx(&[charge("", "2024-05-01 09:00:00")]).unwrap())
        .await
        .unwrap();

    let view = api.ledger(&DateRange::all()).await;
    assert_eq!(view.rows[0].charger_id, CellValue::text("Row-1"));
}

#[tokio::test]
async fn test_selection_and_bulk_delete() {
    let state = new_state();
    let api = &state.merge_api;

    let a = api.add_placeholder().await;
    let b = api.add_placeholder().await;
    let c = api.add_placeholder().await;

    assert!(api.toggle_selected(a.id).await.unwrap());
    api.set_selected(c.id, true).await.unwrap();
    assert!(api.toggle_selected(b.id).await.unwrap());
    assert!(!api.toggle_selected(b.id).await.unwrap());

    assert_eq!(api.delete_selected().await, 2);
    let remaining = api.list_files().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, b.id);
}

#[tokio::test]
async fn test_batch_reuses_trailing_placeholder_and_filters_extensions() {
    let state = new_state();
    let api = &state.merge_api;

    let slot = api.add_placeholder().await;
    let results = api
        .submit_batch(vec![
            ("notes.txt".to_string(), b"hello".to_vec()),
            ("a.xlsx".to_string(), chargein_xlsx(&[charge("A", "2024-05-01 09:00:00")]).unwrap()),
            ("b.xlsx".to_string(), foo_bar_xlsx().unwrap()),
        ])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, slot.id);
    assert_eq!(results[0].name, "a.xlsx");
    assert!(results[0].is_success());
    assert!(results[1].is_error());
    assert!(results[0].id < results[1].id);

    let files = api.list_files().await;
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.name != "notes.txt"));
}

#[tokio::test]
async fn test_batch_without_spreadsheets_is_rejected() {
    let state = new_state();
    let err = state
        .merge_api
        .submit_batch(vec![("photo.png".to_string(), vec![1, 2, 3])])
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(err.user_message("ko").contains("엑셀 파일만 업로드 가능합니다."));
    assert!(state.merge_api.list_files().await.is_empty());
}

#[tokio::test]
async fn test_single_unaccepted_file_becomes_error() {
    let state = new_state();
    let file = state
        .merge_api
        .submit_file(None, "notes.txt", b"hello".to_vec())
        .await
        .unwrap();

    assert!(file.is_error());
    assert_eq!(file.error_message.as_deref(), Some("엑셀 파일만 업로드 가능합니다."));
}

#[tokio::test]
async fn test_resubmit_into_unknown_slot() {
    let state = new_state();
    let err = state
        .merge_api
        .submit_file(Some(ev_charge_ledger::FileId(1)), "a.xlsx", Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_snapshot_json_and_vendor_catalogue() {
    let state = new_state();
    let api = &state.merge_api;
    api.submit_file(None, "foo.xlsx", foo_bar_xlsx().unwrap()).await.unwrap();

    let json: serde_json::Value = serde_json::from_str(&api.files_snapshot_json().await.unwrap()).unwrap();
    assert_eq!(json[0]["name"], "foo.xlsx");
    assert_eq!(json[0]["status"], "error");

    let formats = api.vendor_formats();
    assert_eq!(
        formats.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(),
        vec!["evsis", "chargin"]
    );
}
