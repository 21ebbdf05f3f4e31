//! ダウンロードボタンコンポーネント

use crate::export::download::download_workbook;
use leptos::prelude::*;
use sheet_filter_common::defaults::EXPORT_FILE_NAME;
use sheet_filter_common::{SessionState, Status};

/// プレビュー表示中のみ表示する
#[component]
pub fn DownloadButton(state: RwSignal<SessionState>, status: RwSignal<Status>) -> impl IntoView {
    let is_shown = move || state.with(|s| s.is_preview_shown());

    let on_download = move |_| {
        let result = state.with_untracked(download_workbook);
        match result {
            Ok(()) => status.set(Status::Exported {
                file_name: EXPORT_FILE_NAME.to_string(),
                rows: state.with_untracked(|s| s.filtered_len()),
            }),
            Err(message) => {
                gloo::console::error!(message.clone());
                status.set(Status::Failed { message });
            }
        }
    };

    view! {
        <Show when=is_shown>
            <div class="export-buttons">
                <button class="btn btn-primary" on:click=on_download>
                    "Excel出力"
                </button>
            </div>
        </Show>
    }
}
