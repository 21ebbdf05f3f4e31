//! コマンドライン引数からのセッション操作
//!
//! `--filter COL=V1,V2` の値は、列の候補値の表示文字列と照合して型付きの値に解決する。
//! 例: `age=30` は数値セル 30 に、`note=` は空セルに一致する。

use crate::error::{Result, SheetFilterError};
use sheet_filter_common::{CellValue, ColumnChoice, ColumnDescriptor, SessionState};
use std::str::FromStr;

/// 絞り込み条件の引数（COL=V1,V2）
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub column: String,
    pub values: Vec<String>,
}

impl FromStr for FilterArg {
    type Err = SheetFilterError;

    fn from_str(s: &str) -> Result<Self> {
        let (column, values) = s
            .split_once('=')
            .ok_or_else(|| SheetFilterError::InvalidFilterArg(s.to_string()))?;

        let column = column.trim();
        if column.is_empty() {
            return Err(SheetFilterError::InvalidFilterArg(s.to_string()));
        }

        Ok(FilterArg {
            column: column.to_string(),
            values: values.split(',').map(|v| v.trim().to_string()).collect(),
        })
    }
}

/// 表示文字列を候補値に解決
pub fn resolve_values(state: &SessionState, arg: &FilterArg) -> Result<Vec<CellValue>> {
    let options = state.filter_options();

    arg.values
        .iter()
        .map(|raw| {
            options
                .iter()
                .find(|opt| opt.to_string() == *raw)
                .cloned()
                .ok_or_else(|| SheetFilterError::UnknownFilterValue {
                    column: arg.column.clone(),
                    value: raw.clone(),
                })
        })
        .collect()
}

/// 絞り込み条件を順に適用
///
/// 各条件の値は、それまでの条件で絞り込んだ結果の候補値から解決する。
pub fn apply_filter_args(state: &SessionState, args: &[FilterArg]) -> Result<SessionState> {
    let mut current = state.clone();

    for arg in args {
        ensure_column(&current, &arg.column)?;
        let configured = current.select_filter_column(Some(&arg.column));
        let values = resolve_values(&configured, arg)?;
        current = configured.select_filter_values(values).apply_filter();
        tracing::debug!(column = %arg.column, rows = current.filtered_len(), "filter argument applied");
    }

    Ok(current)
}

/// 出力列を選択（`all` が真なら全列）
pub fn select_column_args(state: &SessionState, names: &[String], all: bool) -> Result<SessionState> {
    if all {
        return Ok(state.select_columns(&[ColumnChoice::SelectAll]));
    }

    let mut choices = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        ensure_column(state, name)?;
        choices.push(ColumnChoice::Column(ColumnDescriptor::new(name)));
    }
    Ok(state.select_columns(&choices))
}

fn ensure_column(state: &SessionState, name: &str) -> Result<()> {
    if state.columns().iter().any(|c| c.value == name) {
        Ok(())
    } else {
        Err(SheetFilterError::UnknownColumn(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_filter_common::Row;

    fn sample_state() -> SessionState {
        let rows: Vec<Row> = vec![
            [("city", CellValue::from("NYC")), ("age", CellValue::from(30i64))],
            [("city", CellValue::from("NYC")), ("age", CellValue::from(40i64))],
            [("city", CellValue::from("LA")), ("age", CellValue::from(30i64))],
        ]
        .into_iter()
        .map(Row::from_iter)
        .collect();
        SessionState::new().ingest(rows).expect("読み込み失敗")
    }

    #[test]
    fn test_parse_filter_arg() {
        let arg: FilterArg = "city = NYC, LA".parse().expect("パース失敗");
        assert_eq!(arg.column, "city");
        assert_eq!(arg.values, vec!["NYC", "LA"]);
    }

    #[test]
    fn test_parse_filter_arg_empty_value() {
        let arg: FilterArg = "note=".parse().expect("パース失敗");
        assert_eq!(arg.values, vec![""]);
    }

    #[test]
    fn test_parse_filter_arg_errors() {
        assert!(matches!(
            "city".parse::<FilterArg>(),
            Err(SheetFilterError::InvalidFilterArg(_))
        ));
        assert!("=NYC".parse::<FilterArg>().is_err());
    }

    #[test]
    fn test_apply_filter_args_narrows_progressively() {
        let args = vec![
            "city=NYC".parse::<FilterArg>().expect("パース失敗"),
            "age=30".parse::<FilterArg>().expect("パース失敗"),
        ];
        let state = apply_filter_args(&sample_state(), &args).expect("絞り込み失敗");

        assert_eq!(state.filtered_positions(), &[0]);
        assert_eq!(state.active_filters().len(), 2);
    }

    #[test]
    fn test_value_removed_by_earlier_filter_is_unknown() {
        let args = vec![
            "city=LA".parse::<FilterArg>().expect("パース失敗"),
            "age=40".parse::<FilterArg>().expect("パース失敗"),
        ];
        let err = apply_filter_args(&sample_state(), &args).unwrap_err();
        assert!(matches!(err, SheetFilterError::UnknownFilterValue { .. }));
    }

    #[test]
    fn test_unknown_column() {
        let args = vec!["zip=10001".parse::<FilterArg>().expect("パース失敗")];
        let err = apply_filter_args(&sample_state(), &args).unwrap_err();
        assert!(matches!(err, SheetFilterError::UnknownColumn(_)));
    }

    #[test]
    fn test_select_column_args() {
        let state = select_column_args(&sample_state(), &["age".into()], false).expect("選択失敗");
        assert_eq!(state.selected_columns(), &[ColumnDescriptor::new("age")]);

        let state = select_column_args(&sample_state(), &[], true).expect("選択失敗");
        assert_eq!(state.selected_columns().len(), 2);

        assert!(select_column_args(&sample_state(), &["zip".into()], false).is_err());
    }
}
