//! 列選択コンポーネント

use leptos::prelude::*;
use sheet_filter_common::defaults::SELECT_ALL_LABEL;
use sheet_filter_common::{ColumnChoice, ColumnDescriptor, SessionState};

#[component]
pub fn ColumnPicker(state: RwSignal<SessionState>) -> impl IntoView {
    let on_select_all = move |_| {
        state.update(|s| *s = s.select_columns(&[ColumnChoice::SelectAll]));
    };

    view! {
        <section class="panel">
            <h2>"出力する列"</h2>
            <button class="btn btn-secondary" on:click=on_select_all>
                {SELECT_ALL_LABEL}
            </button>
            <div class="checkbox-list">
                {move || {
                    state
                        .with(|s| s.columns().to_vec())
                        .into_iter()
                        .map(|column| {
                            let label = column.label.clone();
                            let watched = column.clone();
                            let checked = move || {
                                state.with(|s| s.selected_columns().contains(&watched))
                            };
                            view! {
                                <label class="checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=checked
                                        on:change=move |ev| {
                                            let on = event_target_checked(&ev);
                                            state.update(|s| *s = toggle_column(s, &column, on));
                                        }
                                    />
                                    {label}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}

/// 列のチェックを切り替える
///
/// 設定中の絞り込み列を外した場合は、設定中の絞り込みも解除する。
fn toggle_column(state: &SessionState, column: &ColumnDescriptor, on: bool) -> SessionState {
    state
        .select_columns(&toggled_selection(state, column, on))
        .retain_filter_column_in_selection()
}

/// チェックの切り替え後の選択（追加した列は末尾）
fn toggled_selection(state: &SessionState, column: &ColumnDescriptor, on: bool) -> Vec<ColumnChoice> {
    let mut choices: Vec<ColumnChoice> = state
        .selected_columns()
        .iter()
        .filter(|c| *c != column)
        .cloned()
        .map(ColumnChoice::Column)
        .collect();
    if on {
        choices.push(ColumnChoice::Column(column.clone()));
    }
    choices
}
