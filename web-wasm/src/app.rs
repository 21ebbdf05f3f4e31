//! メインアプリケーションコンポーネント

use crate::components::{
    column_picker::ColumnPicker,
    download::DownloadButton,
    filter_panel::FilterPanel,
    header::Header,
    preview_table::PreviewTable,
    upload_area::{handle_drop, UploadArea},
};
use leptos::prelude::*;
use sheet_filter_common::{LoadSequencer, SessionState, Status};
use web_sys::DragEvent;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let state = RwSignal::new(SessionState::new());
    let status = RwSignal::new(Status::Idle);
    let loads = RwSignal::new(LoadSequencer::new());

    let (is_dragover, set_is_dragover) = signal(false);

    let is_loaded = move || state.with(|s| s.is_loaded());

    // ドラッグ&ドロップはページ全体で受け付ける
    let on_drop = move |ev: DragEvent| {
        set_is_dragover.set(false);
        handle_drop(&ev, state, status, loads);
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    view! {
        <div
            class="container"
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <Header />

            <UploadArea state=state status=status loads=loads is_dragover=is_dragover />

            <p class=move || if status.with(|s| s.is_error()) { "status error" } else { "status" }>
                {move || status.get().to_string()}
            </p>

            <Show
                when=is_loaded
                fallback=|| view! { <p class="text-muted">"Excelファイルをドラッグ&ドロップまたはクリックして選択"</p> }
            >
                <ColumnPicker state=state />
                <FilterPanel state=state />
                <PreviewTable state=state />
                <DownloadButton state=state status=status />
            </Show>
        </div>
    }
}
