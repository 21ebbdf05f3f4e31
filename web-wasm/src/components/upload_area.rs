//! アップロードエリアコンポーネント
//!
//! クリックでのファイル選択に対応。ドラッグ&ドロップはページ全体で受け付ける（`handle_drop`）。
//! 読み込みごとにチケットを発行し、最後に選ばれたファイルの結果だけを反映する。

use leptos::prelude::*;
use sheet_filter_common::defaults::ACCEPT_ATTRIBUTE;
use sheet_filter_common::import::{is_supported_extension, load_bytes};
use sheet_filter_common::{LoadSequencer, LoadTicket, SessionState, Status};
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader, HtmlInputElement, ProgressEvent};

const READ_FAILED_MESSAGE: &str = "Could not read the file.";

#[component]
pub fn UploadArea(
    state: RwSignal<SessionState>,
    status: RwSignal<Status>,
    loads: RwSignal<LoadSequencer>,
    is_dragover: ReadSignal<bool>,
) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            handle_files(files, state, status, loads);
        }
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
    };

    view! {
        <label class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }>
            <div class="upload-icon">"📄"</div>
            <p>"Excelファイルをドラッグ&ドロップ または クリックして選択"</p>
            <p class="text-muted">"対応形式: .xlsx, .xls"</p>
            <input type="file" accept=ACCEPT_ATTRIBUTE style="display: none" on:change=on_change />
        </label>
    }
}

/// ドロップされたファイルを読み込む
///
/// ブラウザがファイルを開いてページを移動しないよう、既定動作は常に止める。
pub fn handle_drop(
    ev: &DragEvent,
    state: RwSignal<SessionState>,
    status: RwSignal<Status>,
    loads: RwSignal<LoadSequencer>,
) {
    ev.prevent_default();
    if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
        handle_files(files, state, status, loads);
    }
}

/// 先頭のファイルだけを読み込む（ファイルなしなら何もしない）
fn handle_files(
    files: FileList,
    state: RwSignal<SessionState>,
    status: RwSignal<Status>,
    loads: RwSignal<LoadSequencer>,
) {
    if let Some(file) = files.get(0) {
        read_file(file, state, status, loads);
    }
}

/// 新しい読み込みのチケットを発行
fn begin_load(loads: RwSignal<LoadSequencer>) -> LoadTicket {
    let mut sequencer = loads.get_untracked();
    let ticket = sequencer.begin();
    loads.set(sequencer);
    ticket
}

/// 読み込んだバイト列をセッションに反映（古いチケットの結果は捨てる）
fn finish_load(
    bytes: &[u8],
    file_name: &str,
    ticket: LoadTicket,
    state: RwSignal<SessionState>,
    status: RwSignal<Status>,
    loads: RwSignal<LoadSequencer>,
) {
    if !loads.get_untracked().is_current(ticket) {
        return;
    }

    match load_bytes(&state.get_untracked(), bytes) {
        Ok(next) => {
            status.set(Status::Loaded {
                file_name: file_name.to_string(),
                rows: next.original_rows().len(),
                columns: next.columns().len(),
            });
            state.set(next);
        }
        Err(e) => {
            gloo::console::error!(e.to_string());
            status.set(Status::failed(&e));
        }
    }
}

fn read_failed(status: RwSignal<Status>) {
    status.set(Status::Failed {
        message: READ_FAILED_MESSAGE.to_string(),
    });
}

fn read_file(
    file: File,
    state: RwSignal<SessionState>,
    status: RwSignal<Status>,
    loads: RwSignal<LoadSequencer>,
) {
    let file_name = file.name();
    if !is_supported_extension(&file_name) {
        gloo::console::warn!(format!("unexpected extension: {}", file_name));
    }

    let ticket = begin_load(loads);

    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            gloo::console::error!(e);
            read_failed(status);
            return;
        }
    };

    status.set(Status::Loading {
        file_name: file_name.clone(),
    });

    let reader_clone = reader.clone();
    let onload = Closure::wrap(Box::new(move |_: ProgressEvent| {
        match reader_clone.result() {
            Ok(buffer) => {
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                finish_load(&bytes, &file_name, ticket, state, status, loads);
            }
            Err(e) => {
                gloo::console::error!(e);
                if loads.get_untracked().is_current(ticket) {
                    read_failed(status);
                }
            }
        }
    }) as Box<dyn FnMut(_)>);

    let onerror = Closure::wrap(Box::new(move |_: ProgressEvent| {
        if loads.get_untracked().is_current(ticket) {
            read_failed(status);
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    if let Err(e) = reader.read_as_array_buffer(&file) {
        gloo::console::error!(e);
        read_failed(status);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use sheet_filter_common::export::encode_workbook;
    use sheet_filter_common::{CellValue, Row};
    use wasm_bindgen_test::*;
    use web_sys::{DataTransfer, DragEventInit};

    struct Signals {
        state: RwSignal<SessionState>,
        status: RwSignal<Status>,
        loads: RwSignal<LoadSequencer>,
    }

    fn signals() -> Signals {
        Signals {
            state: RwSignal::new(SessionState::new()),
            status: RwSignal::new(Status::Idle),
            loads: RwSignal::new(LoadSequencer::new()),
        }
    }

    fn sample_workbook() -> Vec<u8> {
        let rows = vec![
            Row::from_iter([("city", CellValue::from("NYC"))]),
            Row::from_iter([("city", CellValue::from("LA"))]),
        ];
        encode_workbook(&["city".to_string()], &rows, "Sheet1").expect("ブック生成失敗")
    }

    #[wasm_bindgen_test]
    fn test_drop_without_files_is_noop() {
        let s = signals();
        let transfer = DataTransfer::new().expect("DataTransfer生成失敗");
        let init = DragEventInit::new();
        init.set_cancelable(true);
        init.set_data_transfer(Some(&transfer));
        let ev = DragEvent::new_with_event_init_dict("drop", &init).expect("イベント生成失敗");

        handle_drop(&ev, s.state, s.status, s.loads);

        assert!(ev.default_prevented());
        assert_eq!(s.status.get_untracked(), Status::Idle);
        assert_eq!(s.loads.get_untracked(), LoadSequencer::new());
        assert!(!s.state.with_untracked(|st| st.is_loaded()));
    }

    #[wasm_bindgen_test]
    fn test_stale_load_is_discarded() {
        let s = signals();
        let bytes = sample_workbook();
        let stale = begin_load(s.loads);
        let current = begin_load(s.loads);

        finish_load(&bytes, "old.xlsx", stale, s.state, s.status, s.loads);
        assert!(!s.state.with_untracked(|st| st.is_loaded()));
        assert_eq!(s.status.get_untracked(), Status::Idle);

        finish_load(&bytes, "new.xlsx", current, s.state, s.status, s.loads);
        assert_eq!(s.state.with_untracked(|st| st.original_rows().len()), 2);
        assert_eq!(
            s.status.get_untracked(),
            Status::Loaded {
                file_name: "new.xlsx".to_string(),
                rows: 2,
                columns: 1,
            }
        );
    }

    #[wasm_bindgen_test]
    fn test_unreadable_file_keeps_previous_state() {
        let s = signals();
        let ticket = begin_load(s.loads);
        finish_load(&sample_workbook(), "a.xlsx", ticket, s.state, s.status, s.loads);

        let ticket = begin_load(s.loads);
        finish_load(b"not a workbook", "b.xlsx", ticket, s.state, s.status, s.loads);

        assert!(s.status.with_untracked(|st| st.is_error()));
        assert_eq!(s.state.with_untracked(|st| st.original_rows().len()), 2);
    }
}
