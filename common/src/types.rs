//! セッションで扱う型の定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - CellValue: セル値（文字列 / 数値 / 真偽値 / 空）
//! - Row: 列名 → セル値の順序付きマップ
//! - ColumnDescriptor: 列の表示名と参照キー
//! - Filter: 確定済みの絞り込み条件

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// セル値
///
/// JSON上は素の値（文字列 / 数値 / 真偽値 / null）として表現する。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    #[default]
    Empty,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            // 整数値は "30.0" ではなく "30" と表示
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// 1行分のデータ（列名 → セル値、挿入順を保持）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を設定（既存キーは上書き、位置は維持）
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        let key = key.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// キーが存在しない場合は `Empty` を返す
    pub fn value(&self, key: &str) -> &CellValue {
        self.get(key).unwrap_or(&EMPTY_CELL)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in &self.cells {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column name to cell value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut row = Row::new();
                while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
                    row.insert(key, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// 列の記述子（表示名と参照キーはどちらも列名）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub label: String,
    pub value: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            value: name,
        }
    }
}

/// 列選択イベントの1要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnChoice {
    /// 「すべて選択」
    SelectAll,
    Column(ColumnDescriptor),
}

/// 確定済みの絞り込み条件
///
/// `row[column]` が `values` のいずれかと一致する行を残す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub values: Vec<CellValue>,
}

impl Filter {
    pub fn new(column: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            column: column.into(),
            values,
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.values.contains(row.value(&self.column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::from_iter([
            ("city", CellValue::from("NYC")),
            ("age", CellValue::from(30i64)),
        ])
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::from(30i64).to_string(), "30");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::from("NYC").to_string(), "NYC");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_row_preserves_insertion_order() {
        let mut row = Row::new();
        row.insert("C", CellValue::from(1i64));
        row.insert("A", CellValue::from(2i64));
        row.insert("B", CellValue::from(3i64));
        row.insert("A", CellValue::from(9i64));

        let keys: Vec<&str> = row.keys().collect();
        assert_eq!(keys, vec!["C", "A", "B"]);
        assert_eq!(row.get("A"), Some(&CellValue::Number(9.0)));
    }

    #[test]
    fn test_row_missing_key_is_empty() {
        let row = sample_row();
        assert_eq!(row.get("zip"), None);
        assert_eq!(row.value("zip"), &CellValue::Empty);
    }

    #[test]
    fn test_row_serialize_as_object() {
        let json = serde_json::to_string(&sample_row()).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"city":"NYC","age":30.0}"#);
    }

    #[test]
    fn test_row_deserialize_keeps_order() {
        let json = r#"{"b": true, "a": null, "c": "x"}"#;
        let row: Row = serde_json::from_str(json).expect("デシリアライズ失敗");

        let keys: Vec<&str> = row.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(row.value("b"), &CellValue::Bool(true));
        assert_eq!(row.value("a"), &CellValue::Empty);
    }

    #[test]
    fn test_filter_membership() {
        let row = sample_row();

        assert!(Filter::new("city", vec!["LA".into(), "NYC".into()]).matches(&row));
        assert!(!Filter::new("city", vec!["LA".into()]).matches(&row));
        // 型が違えば一致しない
        assert!(!Filter::new("age", vec!["30".into()]).matches(&row));
        assert!(Filter::new("age", vec![CellValue::Number(30.0)]).matches(&row));
    }

    #[test]
    fn test_filter_matches_missing_cell_as_empty() {
        let row = sample_row();
        assert!(Filter::new("zip", vec![CellValue::Empty]).matches(&row));
        assert!(!Filter::new("zip", vec!["10001".into()]).matches(&row));
    }

    #[test]
    fn test_column_descriptor_label_equals_value() {
        let col = ColumnDescriptor::new("city");
        assert_eq!(col.label, "city");
        assert_eq!(col.value, "city");
    }
}
