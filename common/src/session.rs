//! セッション状態モジュール
//!
//! 読み込んだ1ファイル分の状態を `SessionState` にまとめ、
//! 列選択・絞り込み・リセット・出力用射影をすべて純粋な遷移関数として提供する。
//! 各遷移は `&self` から新しい状態を返し、元の状態は変更しない。
//!
//! 何も読み込まれていない（列が空の）セッションでは、`ingest` 以外の遷移は何もしない。

use crate::error::{Error, Result};
use crate::types::{CellValue, ColumnChoice, ColumnDescriptor, Filter, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// 1ファイル分のセッション状態
///
/// デシリアライズ時は `filtered` が `original_rows` の範囲内かつ昇順であることを検証する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionStateData")]
pub struct SessionState {
    /// 読み込んだ行（読み込み後は不変）
    original_rows: Arc<Vec<Row>>,
    columns: Vec<ColumnDescriptor>,
    selected_columns: Vec<ColumnDescriptor>,
    /// 設定中（未確定）の絞り込み列
    active_filter_column: Option<String>,
    /// 設定中（未確定）の絞り込み値
    active_filter_values: Vec<CellValue>,
    /// 絞り込み列の候補値
    filter_options: Vec<CellValue>,
    /// 確定済みの絞り込み条件（適用順）
    active_filters: Vec<Filter>,
    /// 絞り込み結果（original_rows の位置、昇順）
    filtered: Vec<usize>,
    preview_visible: bool,
}

/// 先頭行のキーから列を検出
///
/// 2行目以降にだけ現れるキーは含まれない。
pub fn discover_columns(rows: &[Row]) -> Vec<ColumnDescriptor> {
    rows.first()
        .map(|row| row.keys().map(ColumnDescriptor::new).collect())
        .unwrap_or_default()
}

/// 列の値を出現順に重複なく収集
pub fn distinct_values<'a>(rows: impl IntoIterator<Item = &'a Row>, column: &str) -> Vec<CellValue> {
    let mut seen: HashSet<ValueKey<'a>> = HashSet::new();
    let mut values: Vec<CellValue> = Vec::new();
    for row in rows {
        let value = row.value(column);
        if seen.insert(ValueKey::from(value)) {
            values.push(value.clone());
        }
    }
    values
}

/// 重複判定用のセル値キー（`CellValue` の等価性と一致させる）
#[derive(PartialEq, Eq, Hash)]
enum ValueKey<'a> {
    Text(&'a str),
    Number(u64),
    Bool(bool),
    Empty,
}

impl<'a> From<&'a CellValue> for ValueKey<'a> {
    fn from(value: &'a CellValue) -> Self {
        match value {
            CellValue::Text(s) => ValueKey::Text(s),
            // 0.0 と -0.0 は等しい
            CellValue::Number(n) if *n == 0.0 => ValueKey::Number(0f64.to_bits()),
            CellValue::Number(n) => ValueKey::Number(n.to_bits()),
            CellValue::Bool(b) => ValueKey::Bool(*b),
            CellValue::Empty => ValueKey::Empty,
        }
    }
}

/// デシリアライズ用の未検証の状態
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SessionStateData {
    original_rows: Arc<Vec<Row>>,
    columns: Vec<ColumnDescriptor>,
    selected_columns: Vec<ColumnDescriptor>,
    active_filter_column: Option<String>,
    active_filter_values: Vec<CellValue>,
    filter_options: Vec<CellValue>,
    active_filters: Vec<Filter>,
    filtered: Vec<usize>,
    preview_visible: bool,
}

impl TryFrom<SessionStateData> for SessionState {
    type Error = Error;

    fn try_from(data: SessionStateData) -> Result<Self> {
        let len = data.original_rows.len();
        if let Some(&position) = data.filtered.iter().find(|&&i| i >= len) {
            return Err(Error::InvalidState(format!(
                "filtered position {} is out of range ({} rows)",
                position, len
            )));
        }
        if data.filtered.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidState(
                "filtered positions must be strictly ascending".to_string(),
            ));
        }

        Ok(SessionState {
            original_rows: data.original_rows,
            columns: data.columns,
            selected_columns: data.selected_columns,
            active_filter_column: data.active_filter_column,
            active_filter_values: data.active_filter_values,
            filter_options: data.filter_options,
            active_filters: data.active_filters,
            filtered: data.filtered,
            preview_visible: data.preview_visible,
        })
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // =============================================
    // 参照
    // =============================================

    pub fn is_loaded(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn original_rows(&self) -> &[Row] {
        &self.original_rows
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn selected_columns(&self) -> &[ColumnDescriptor] {
        &self.selected_columns
    }

    pub fn active_filter_column(&self) -> Option<&str> {
        self.active_filter_column.as_deref()
    }

    pub fn active_filter_values(&self) -> &[CellValue] {
        &self.active_filter_values
    }

    pub fn filter_options(&self) -> &[CellValue] {
        &self.filter_options
    }

    pub fn active_filters(&self) -> &[Filter] {
        &self.active_filters
    }

    pub fn filtered_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.filtered.iter().map(move |&i| &self.original_rows[i])
    }

    /// 絞り込み結果の、元データ上の位置
    pub fn filtered_positions(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn preview_visible(&self) -> bool {
        self.preview_visible
    }

    /// プレビューを表示すべきか（表示フラグON かつ 列が選択済み）
    pub fn is_preview_shown(&self) -> bool {
        self.preview_visible && !self.selected_columns.is_empty()
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.value == name)
    }

    // =============================================
    // 遷移
    // =============================================

    /// 読み込んだ行でセッションを作り直す
    ///
    /// 行が空の場合は `Error::EmptySheet` を返し、呼び出し側は既存の状態を保持する。
    pub fn ingest(&self, rows: Vec<Row>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptySheet);
        }

        let columns = discover_columns(&rows);
        if columns.is_empty() {
            return Err(Error::EmptySheet);
        }

        tracing::info!(rows = rows.len(), columns = columns.len(), "workbook loaded");

        let filtered = (0..rows.len()).collect();
        Ok(Self {
            original_rows: Arc::new(rows),
            columns,
            filtered,
            ..Self::default()
        })
    }

    /// 出力列を選択
    ///
    /// 「すべて選択」が含まれていれば全列、そうでなければ指定された列のみ（指定順）。
    pub fn select_columns(&self, choices: &[ColumnChoice]) -> Self {
        let mut next = self.clone();
        if !self.is_loaded() {
            return next;
        }

        if choices.iter().any(|c| matches!(c, ColumnChoice::SelectAll)) {
            next.selected_columns = self.columns.clone();
            return next;
        }

        let mut selected: Vec<ColumnDescriptor> = Vec::new();
        for choice in choices {
            if let ColumnChoice::Column(col) = choice {
                if self.has_column(&col.value) && !selected.contains(col) {
                    selected.push(col.clone());
                }
            }
        }
        next.selected_columns = selected;
        next
    }

    /// 設定中の絞り込み列が選択列から外れていれば、設定中の絞り込みを解除
    ///
    /// 絞り込み列を選択列から選ばせる画面で、列の選択を変えた後に使う。
    pub fn retain_filter_column_in_selection(&self) -> Self {
        match &self.active_filter_column {
            Some(column) if !self.selected_columns.iter().any(|c| &c.value == column) => {
                self.select_filter_column(None)
            }
            _ => self.clone(),
        }
    }

    /// 絞り込み列を選択し、候補値を現在の絞り込み結果から再計算
    ///
    /// 列を変えると設定中の値はクリアされる。`None` や存在しない列を渡すと設定をすべてクリア。
    pub fn select_filter_column(&self, column: Option<&str>) -> Self {
        let mut next = self.clone();
        next.active_filter_values.clear();

        match column {
            Some(name) if self.has_column(name) => {
                next.filter_options = distinct_values(self.filtered_rows(), name);
                next.active_filter_column = Some(name.to_string());
            }
            _ => {
                next.active_filter_column = None;
                next.filter_options.clear();
            }
        }
        next
    }

    /// 絞り込み値を設定（候補にない値は無視、まだ絞り込みは行わない）
    pub fn select_filter_values(&self, values: Vec<CellValue>) -> Self {
        let mut next = self.clone();
        let mut chosen: Vec<CellValue> = Vec::new();
        for value in values {
            if self.filter_options.contains(&value) && !chosen.contains(&value) {
                chosen.push(value);
            }
        }
        next.active_filter_values = chosen;
        next
    }

    /// 設定中の条件を確定して絞り込む
    ///
    /// 列または値が未設定の場合は何もしない。
    /// 絞り込みは常に元データから全条件を適用し直す（条件間はAND、条件内の値はOR）。
    pub fn apply_filter(&self) -> Self {
        let column = match (&self.active_filter_column, self.active_filter_values.is_empty()) {
            (Some(column), false) => column.clone(),
            _ => return self.clone(),
        };

        let mut next = self.clone();
        next.active_filters
            .push(Filter::new(column, self.active_filter_values.clone()));
        next.filtered = matching_positions(&next.original_rows, &next.active_filters);
        next.active_filter_column = None;
        next.active_filter_values.clear();
        next.filter_options.clear();
        next.preview_visible = true;

        tracing::debug!(
            filters = next.active_filters.len(),
            rows = next.filtered.len(),
            "filter applied"
        );
        next
    }

    /// 絞り込みと選択をすべて解除
    pub fn reset_filters(&self) -> Self {
        if !self.is_loaded() {
            return self.clone();
        }

        Self {
            original_rows: Arc::clone(&self.original_rows),
            columns: self.columns.clone(),
            filtered: (0..self.original_rows.len()).collect(),
            ..Self::default()
        }
    }

    /// プレビュー表示を切り替え
    pub fn toggle_preview(&self) -> Self {
        let mut next = self.clone();
        if self.is_loaded() {
            next.preview_visible = !self.preview_visible;
        }
        next
    }

    // =============================================
    // 出力用射影
    // =============================================

    /// 選択列のみを含む行（キーは表示名）
    pub fn export_rows(&self) -> Vec<Row> {
        self.filtered_rows().map(|row| self.project(row)).collect()
    }

    /// プレビュー用の射影（先頭 `limit` 行）
    pub fn preview_rows(&self, limit: usize) -> Vec<Row> {
        self.filtered_rows()
            .take(limit)
            .map(|row| self.project(row))
            .collect()
    }

    /// 出力ヘッダー（選択列の表示名）
    pub fn export_headers(&self) -> Vec<String> {
        self.selected_columns.iter().map(|c| c.label.clone()).collect()
    }

    fn project(&self, row: &Row) -> Row {
        self.selected_columns
            .iter()
            .map(|col| (col.label.clone(), row.value(&col.value).clone()))
            .collect()
    }
}

fn matching_positions(rows: &[Row], filters: &[Filter]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| filters.iter().all(|f| f.matches(row)))
        .map(|(i, _)| i)
        .collect()
}

/// ファイル読み込みの順序管理
///
/// 読み込み開始ごとにチケットを発行し、最後に発行したチケットの完了だけを受け付ける。
/// 先に開始した読み込みが後から完了しても、新しいファイルの状態を上書きしない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSequencer {
    latest: u64,
}

/// 読み込み1回分のチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        LoadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest
    }
}
