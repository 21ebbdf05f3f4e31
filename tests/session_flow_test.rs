//! 読み込みから絞り込みまでの統合テスト
//!
//! テスト用のxlsxは rust_xlsxwriter で生成する。

use rust_xlsxwriter::Workbook;
use sheet_filter::filter_arg::{apply_filter_args, select_column_args, FilterArg};
use sheet_filter::loader::load_session;
use sheet_filter_common::{CellValue, ColumnDescriptor, Error, Row};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// ヘッダー行 + データ行のブックを作成（None は空セル）
fn write_fixture(path: &Path, headers: &[&str], rows: &[Vec<Option<CellValue>>]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (c, header) in headers.iter().enumerate() {
        sheet.write_string(0, c as u16, *header).expect("ヘッダー書き込み失敗");
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32 + 1, c as u16);
            match cell {
                Some(CellValue::Text(s)) => {
                    sheet.write_string(r, c, s).expect("書き込み失敗");
                }
                Some(CellValue::Number(n)) => {
                    sheet.write_number(r, c, *n).expect("書き込み失敗");
                }
                Some(CellValue::Bool(b)) => {
                    sheet.write_boolean(r, c, *b).expect("書き込み失敗");
                }
                Some(CellValue::Empty) | None => {}
            }
        }
    }

    workbook.save(path).expect("保存失敗");
}

fn city_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("cities.xlsx");
    write_fixture(
        &path,
        &["city", "age"],
        &[
            vec![Some("NYC".into()), Some(30i64.into())],
            vec![Some("NYC".into()), Some(40i64.into())],
            vec![Some("LA".into()), Some(30i64.into())],
        ],
    );
    path
}

fn filters(args: &[&str]) -> Vec<FilterArg> {
    args.iter().map(|a| a.parse().expect("パース失敗")).collect()
}

#[tokio::test]
async fn test_columns_from_first_row() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sparse.xlsx");
    write_fixture(
        &path,
        &["A", "B", "C"],
        &[
            vec![Some(1i64.into()), Some(2i64.into()), Some(3i64.into())],
            vec![Some(4i64.into()), None, Some(6i64.into())],
        ],
    );

    let state = load_session(&path).await.expect("読み込み失敗");
    let names: Vec<&str> = state.columns().iter().map(|c| c.value.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    // 空セルは行に含まれない
    assert_eq!(state.original_rows()[1].get("B"), None);
}

#[tokio::test]
async fn test_first_row_sparse_hides_later_columns() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("late.xlsx");
    write_fixture(
        &path,
        &["A", "B"],
        &[
            vec![Some(1i64.into()), None],
            vec![Some(2i64.into()), Some(5i64.into())],
        ],
    );

    let state = load_session(&path).await.expect("読み込み失敗");
    assert_eq!(state.columns(), &[ColumnDescriptor::new("A")]);
}

#[tokio::test]
async fn test_blank_rows_are_skipped() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("gaps.xlsx");
    write_fixture(
        &path,
        &["name"],
        &[
            vec![Some("a".into())],
            vec![None],
            vec![Some("b".into())],
        ],
    );

    let state = load_session(&path).await.expect("読み込み失敗");
    assert_eq!(state.original_rows().len(), 2);
}

#[tokio::test]
async fn test_filter_and_across_or_within() {
    let dir = tempdir().expect("Failed to create temp dir");
    let state = load_session(&city_fixture(dir.path())).await.expect("読み込み失敗");

    let narrowed = apply_filter_args(&state, &filters(&["city=NYC", "age=30"])).expect("絞り込み失敗");
    let rows: Vec<&Row> = narrowed.filtered_rows().collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value("city"), &CellValue::from("NYC"));
    assert_eq!(rows[0].value("age"), &CellValue::Number(30.0));

    let either = apply_filter_args(&state, &filters(&["city=NYC,LA"])).expect("絞り込み失敗");
    assert_eq!(either.filtered_positions(), &[0, 1, 2]);
}

#[tokio::test]
async fn test_reset_after_filters() {
    let dir = tempdir().expect("Failed to create temp dir");
    let state = load_session(&city_fixture(dir.path())).await.expect("読み込み失敗");

    let filtered = apply_filter_args(&state, &filters(&["city=LA"])).expect("絞り込み失敗");
    let filtered = select_column_args(&filtered, &[], true).expect("選択失敗");
    let reset = filtered.reset_filters();

    let rows: Vec<Row> = reset.filtered_rows().cloned().collect();
    assert_eq!(rows, state.original_rows().to_vec());
    assert!(reset.selected_columns().is_empty());
}

#[tokio::test]
async fn test_header_only_file_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("header_only.xlsx");
    write_fixture(&path, &["A", "B"], &[]);

    let result = load_session(&path).await;
    assert!(matches!(
        result,
        Err(sheet_filter::error::SheetFilterError::Common(Error::EmptySheet))
    ));
}

#[tokio::test]
async fn test_second_file_replaces_first() {
    let dir = tempdir().expect("Failed to create temp dir");
    let first = load_session(&city_fixture(dir.path())).await.expect("読み込み失敗");
    let first = select_column_args(&first, &[], true).expect("選択失敗");
    let first = apply_filter_args(&first, &filters(&["city=NYC"])).expect("絞り込み失敗");

    let second_path = dir.path().join("products.xlsx");
    write_fixture(&second_path, &["sku"], &[vec![Some("X1".into())]]);
    let bytes = std::fs::read(&second_path).expect("読み込み失敗");
    let second = sheet_filter_common::import::load_bytes(&first, &bytes).expect("読み込み失敗");

    assert_eq!(second.columns(), &[ColumnDescriptor::new("sku")]);
    assert!(second.selected_columns().is_empty());
    assert!(second.active_filters().is_empty());
    assert_eq!(second.filtered_len(), 1);
}
