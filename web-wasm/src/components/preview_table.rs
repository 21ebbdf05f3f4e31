//! プレビュー表コンポーネント

use leptos::prelude::*;
use sheet_filter_common::SessionState;

#[component]
pub fn PreviewTable(state: RwSignal<SessionState>) -> impl IntoView {
    let is_shown = move || state.with(|s| s.is_preview_shown());

    view! {
        <Show when=is_shown>
            <div class="preview">
                <table>
                    <thead>
                        <tr>
                            {move || {
                                state
                                    .with(|s| s.export_headers())
                                    .into_iter()
                                    .map(|h| view! { <th>{h}</th> })
                                    .collect_view()
                            }}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            state.with(|s| {
                                let headers = s.export_headers();
                                s.export_rows()
                                    .into_iter()
                                    .map(|row| {
                                        let cells = headers
                                            .iter()
                                            .map(|h| view! { <td>{row.value(h).to_string()}</td> })
                                            .collect_view();
                                        view! { <tr>{cells}</tr> }
                                    })
                                    .collect_view()
                            })
                        }}
                    </tbody>
                </table>
            </div>
        </Show>
    }
}
