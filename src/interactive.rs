//! 対話式セッションモジュール
//!
//! Web版と同じ手順（列選択 → 絞り込み列 → 絞り込み値 → 適用 / リセット → プレビュー → 出力）を
//! ターミナル上のメニューで行う。

use crate::config::Config;
use crate::error::Result;
use crate::export;
use crate::preview::render_preview;
use dialoguer::{MultiSelect, Select};
use sheet_filter_common::defaults::SELECT_ALL_LABEL;
use sheet_filter_common::{CellValue, ColumnChoice, SessionState};
use std::path::{Path, PathBuf};

const EMPTY_VALUE_LABEL: &str = "(空)";

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// 出力列を選択
    SelectColumns,
    /// 絞り込み列を選択
    FilterColumn,
    /// 絞り込み値を選択
    FilterValues,
    /// 絞り込みを適用
    ApplyFilter,
    /// 絞り込みをリセット
    ResetFilters,
    /// プレビュー表示を切り替え
    TogglePreview,
    /// Excelに出力
    Export,
    /// 終了
    Quit,
}

impl SessionAction {
    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::SelectColumns => "列を選択",
            SessionAction::FilterColumn => "絞り込み列を選択",
            SessionAction::FilterValues => "絞り込み値を選択",
            SessionAction::ApplyFilter => "絞り込みを適用",
            SessionAction::ResetFilters => "絞り込みをリセット",
            SessionAction::TogglePreview => "プレビュー表示/非表示",
            SessionAction::Export => "Excelに出力",
            SessionAction::Quit => "終了",
        }
    }
}

/// 現在の状態で選べる操作
///
/// - 絞り込み列は選択済みの列から選ぶため、列が未選択なら表示しない
/// - 絞り込み値は絞り込み列の設定後のみ
/// - 出力はプレビュー表示中のみ
pub fn available_actions(state: &SessionState) -> Vec<SessionAction> {
    let mut actions = vec![SessionAction::SelectColumns];

    if !state.selected_columns().is_empty() {
        actions.push(SessionAction::FilterColumn);
    }
    if state.active_filter_column().is_some() {
        actions.push(SessionAction::FilterValues);
    }
    actions.push(SessionAction::ApplyFilter);
    actions.push(SessionAction::ResetFilters);
    actions.push(SessionAction::TogglePreview);
    if state.is_preview_shown() {
        actions.push(SessionAction::Export);
    }
    actions.push(SessionAction::Quit);
    actions
}

/// 現在の状態の要約
pub fn summary(state: &SessionState) -> String {
    let selected: Vec<&str> = state.selected_columns().iter().map(|c| c.label.as_str()).collect();
    let filters: Vec<String> = state
        .active_filters()
        .iter()
        .map(|f| format!("{} ∈ {{{}}}", f.column, value_labels(&f.values).join(", ")))
        .collect();

    let mut lines = vec![
        format!("行: {} / {}", state.filtered_len(), state.original_rows().len()),
        format!(
            "列: {}",
            if selected.is_empty() { "(未選択)".to_string() } else { selected.join(", ") }
        ),
        format!(
            "条件: {}",
            if filters.is_empty() { "(なし)".to_string() } else { filters.join(" AND ") }
        ),
    ];

    if let Some(column) = state.active_filter_column() {
        lines.push(format!(
            "設定中: {} = [{}]",
            column,
            value_labels(state.active_filter_values()).join(", ")
        ));
    }
    lines.join("\n")
}

fn value_labels(values: &[CellValue]) -> Vec<String> {
    values
        .iter()
        .map(|v| match v {
            CellValue::Empty => EMPTY_VALUE_LABEL.to_string(),
            other => other.to_string(),
        })
        .collect()
}

/// 対話式セッションを実行
pub fn run_interactive_session(
    state: SessionState,
    output: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let mut state = state;
    let output_path: PathBuf = export::output_path(output, &config.output_file_name());

    println!("---");
    println!("列: {}", state.columns().iter().map(|c| c.label.as_str()).collect::<Vec<_>>().join(", "));
    println!("---\n");

    loop {
        println!("{}\n", summary(&state));

        let actions = available_actions(&state);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let index = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[index] {
            SessionAction::SelectColumns => {
                state = state
                    .select_columns(&prompt_columns(&state)?)
                    .retain_filter_column_in_selection();
            }
            SessionAction::FilterColumn => {
                let column = prompt_filter_column(&state)?;
                state = state.select_filter_column(column.as_deref());
            }
            SessionAction::FilterValues => {
                let values = prompt_filter_values(&state)?;
                state = state.select_filter_values(values);
            }
            SessionAction::ApplyFilter => {
                let next = state.apply_filter();
                if next == state {
                    println!("  絞り込み列と値を選択してください\n");
                } else {
                    println!("✔ 絞り込み: {}行\n", next.filtered_len());
                }
                state = next;
            }
            SessionAction::ResetFilters => {
                state = state.reset_filters();
                println!("✔ リセットしました\n");
            }
            SessionAction::TogglePreview => {
                state = state.toggle_preview();
            }
            SessionAction::Export => {
                export::export_session(&state, &output_path, &config.sheet_name)?;
                println!("✔ Excel出力: {}\n", output_path.display());
            }
            SessionAction::Quit => break,
        }

        if state.is_preview_shown() {
            if let Some(table) = render_preview(&state, config.preview_limit) {
                println!("{}", table);
            }
        }
    }

    Ok(())
}

fn prompt_columns(state: &SessionState) -> Result<Vec<ColumnChoice>> {
    let mut labels = vec![SELECT_ALL_LABEL.to_string()];
    labels.extend(state.columns().iter().map(|c| c.label.clone()));

    let mut defaults = vec![false];
    defaults.extend(
        state
            .columns()
            .iter()
            .map(|c| state.selected_columns().contains(c)),
    );

    let picked = MultiSelect::new()
        .with_prompt("出力する列（スペースで選択、Enterで確定）")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(picked
        .into_iter()
        .map(|i| match i {
            0 => ColumnChoice::SelectAll,
            n => ColumnChoice::Column(state.columns()[n - 1].clone()),
        })
        .collect())
}

fn prompt_filter_column(state: &SessionState) -> Result<Option<String>> {
    let mut labels: Vec<String> = state.selected_columns().iter().map(|c| c.label.clone()).collect();
    labels.push("(解除)".to_string());

    let index = Select::new()
        .with_prompt("絞り込む列")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(state
        .selected_columns()
        .get(index)
        .map(|c| c.value.clone()))
}

fn prompt_filter_values(state: &SessionState) -> Result<Vec<CellValue>> {
    let options = state.filter_options();
    let labels = value_labels(options);
    let defaults: Vec<bool> = options
        .iter()
        .map(|v| state.active_filter_values().contains(v))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("残す値（スペースで選択、Enterで確定）")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(picked.into_iter().map(|i| options[i].clone()).collect())
}
