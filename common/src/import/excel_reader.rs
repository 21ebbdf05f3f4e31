//! Excel読み込み（共通ライブラリ）
//!
//! 先頭シートのみを読み込み、1行目をヘッダーとして行データに変換する。
//!
//! - 空のヘッダーは `__EMPTY`, `__EMPTY_1`, ... と命名
//! - 重複したヘッダーには `_1`, `_2`, ... を付与
//! - 空セルは行に含めない
//! - 空セルしかない行は読み飛ばす

use crate::error::{Error, Result};
use crate::session::SessionState;
use crate::types::{CellValue, Row};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::collections::HashMap;
use std::io::Cursor;

const EMPTY_HEADER: &str = "__EMPTY";

/// ブックのバイト列を行データに変換
///
/// 形式（xlsx / xls / xlsb / ods）は内容から自動判定する。
pub fn decode_workbook(bytes: &[u8]) -> Result<Vec<Row>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| Error::Decode(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(Error::NoSheets)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Decode(e.to_string()))?;

    let mut lines = range.rows();
    let headers = match lines.next() {
        Some(header_cells) => header_names(header_cells),
        None => return Ok(Vec::new()),
    };

    let rows: Vec<Row> = lines
        .filter_map(|cells| {
            let row: Row = headers
                .iter()
                .zip(cells)
                .filter(|(_, cell)| !matches!(cell, Data::Empty))
                .map(|(name, cell)| (name.clone(), cell_value(cell)))
                .collect();
            (!row.is_empty()).then_some(row)
        })
        .collect();

    tracing::debug!(sheet = %sheet_name, rows = rows.len(), "sheet decoded");
    Ok(rows)
}

/// デコードしてセッションに取り込む
///
/// 失敗時（空ファイル含む）は `state` に手を付けずにエラーを返す。
pub fn load_bytes(state: &SessionState, bytes: &[u8]) -> Result<SessionState> {
    let rows = decode_workbook(bytes)?;
    state.ingest(rows)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // 日付はシリアル値のまま扱う
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(cells.len());

    for cell in cells {
        let base = match cell {
            Data::Empty => EMPTY_HEADER.to_string(),
            other => cell_value(other).to_string(),
        };

        let name = match seen.get(&base).copied() {
            None => {
                seen.insert(base.clone(), 1);
                base
            }
            Some(mut counter) => {
                let mut candidate = format!("{}_{}", base, counter);
                while seen.contains_key(&candidate) {
                    counter += 1;
                    candidate = format!("{}_{}", base, counter);
                }
                seen.insert(base, counter + 1);
                seen.insert(candidate.clone(), 1);
                candidate
            }
        };
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names_plain() {
        let cells = vec![Data::String("city".into()), Data::String("age".into())];
        assert_eq!(header_names(&cells), vec!["city", "age"]);
    }

    #[test]
    fn test_header_names_duplicates_and_empty() {
        let cells = vec![
            Data::String("A".into()),
            Data::Empty,
            Data::String("A".into()),
            Data::Empty,
            Data::String("A".into()),
        ];
        assert_eq!(
            header_names(&cells),
            vec!["A", "__EMPTY", "A_1", "__EMPTY_1", "A_2"]
        );
    }

    #[test]
    fn test_header_names_numeric() {
        let cells = vec![Data::Float(2024.0), Data::Int(7)];
        assert_eq!(header_names(&cells), vec!["2024", "7"]);
    }

    #[test]
    fn test_cell_value_conversion() {
        assert_eq!(cell_value(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(cell_value(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(cell_value(&Data::Bool(false)), CellValue::Bool(false));
        assert_eq!(cell_value(&Data::String("x".into())), CellValue::from("x"));
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_decode_rejects_non_spreadsheet() {
        let result = decode_workbook(b"this is not a workbook");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_load_bytes_keeps_state_on_failure() {
        let state = SessionState::new();
        assert!(load_bytes(&state, b"").is_err());
        assert!(!state.is_loaded());
    }
}
