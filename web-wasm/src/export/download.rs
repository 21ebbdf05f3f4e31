//! Excel生成とダウンロード（WASM版）
//!
//! ブックの生成は共通ライブラリで行い、Blob + オブジェクトURL + アンカーのクリックで保存する。

use sheet_filter_common::defaults::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE, EXPORT_SHEET_NAME};
use sheet_filter_common::export::encode_session;
use sheet_filter_common::SessionState;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// 絞り込み結果を filtered_data.xlsx としてダウンロードさせる
pub fn download_workbook(state: &SessionState) -> Result<(), String> {
    let bytes = encode_session(state, EXPORT_SHEET_NAME).map_err(|e| e.to_string())?;
    save_bytes(&bytes, EXPORT_FILE_NAME, EXPORT_MIME_TYPE)
}

fn save_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);

    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Blob creation failed: {:?}", e))?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Object URL creation failed: {:?}", e))?;

    let result = click_anchor(&url, file_name);
    let _ = Url::revoke_object_url(&url);
    result
}

fn click_anchor(url: &str, file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document is not available".to_string())?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "anchor element expected".to_string())?;

    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}
