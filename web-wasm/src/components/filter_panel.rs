//! 絞り込みパネルコンポーネント
//!
//! 絞り込み列は選択済みの列から選ぶ。候補値は現在の絞り込み結果から取る。

use leptos::prelude::*;
use sheet_filter_common::{CellValue, SessionState};

const EMPTY_VALUE_LABEL: &str = "(空)";

#[component]
pub fn FilterPanel(state: RwSignal<SessionState>) -> impl IntoView {
    let on_column_change = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        state.update(|s| {
            *s = s.select_filter_column(if value.is_empty() { None } else { Some(value.as_str()) });
        });
    };

    let can_apply = move || {
        state.with(|s| s.active_filter_column().is_some() && !s.active_filter_values().is_empty())
    };

    let on_apply = move |_| state.update(|s| *s = s.apply_filter());
    let on_reset = move |_| state.update(|s| *s = s.reset_filters());
    let on_toggle_preview = move |_| state.update(|s| *s = s.toggle_preview());

    view! {
        <section class="panel">
            <h2>"絞り込み"</h2>

            <select
                prop:value=move || state.with(|s| s.active_filter_column().unwrap_or_default().to_string())
                on:change=on_column_change
            >
                <option value="">"-- 列を選択 --"</option>
                {move || {
                    state
                        .with(|s| s.selected_columns().to_vec())
                        .into_iter()
                        .map(|c| view! { <option value=c.value>{c.label}</option> })
                        .collect_view()
                }}
            </select>

            <div class="checkbox-list">
                {move || {
                    state
                        .with(|s| s.filter_options().to_vec())
                        .into_iter()
                        .map(|option| {
                            let label = value_label(&option);
                            let watched = option.clone();
                            let checked = move || {
                                state.with(|s| s.active_filter_values().contains(&watched))
                            };
                            view! {
                                <label class="checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=checked
                                        on:change=move |ev| {
                                            let on = event_target_checked(&ev);
                                            state.update(|s| {
                                                *s = s.select_filter_values(toggled_values(s, &option, on));
                                            });
                                        }
                                    />
                                    {label}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <div class="filter-buttons">
                <button class="btn btn-primary" disabled=move || !can_apply() on:click=on_apply>
                    "絞り込み"
                </button>
                <button class="btn btn-secondary" on:click=on_reset>
                    "リセット"
                </button>
                <button class="btn btn-secondary" on:click=on_toggle_preview>
                    {move || if state.with(|s| s.preview_visible()) { "プレビューを隠す" } else { "プレビュー" }}
                </button>
            </div>

            <p class="text-muted">
                {move || state.with(|s| format!("{} / {} 行", s.filtered_len(), s.original_rows().len()))}
            </p>
        </section>
    }
}

fn value_label(value: &CellValue) -> String {
    match value {
        CellValue::Empty => EMPTY_VALUE_LABEL.to_string(),
        other => other.to_string(),
    }
}

/// チェックの切り替え後の値
fn toggled_values(state: &SessionState, value: &CellValue, on: bool) -> Vec<CellValue> {
    let mut values: Vec<CellValue> = state
        .active_filter_values()
        .iter()
        .filter(|v| *v != value)
        .cloned()
        .collect();
    if on {
        values.push(value.clone());
    }
    values
}
