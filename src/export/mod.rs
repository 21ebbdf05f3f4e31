//! Excel出力（CLI版）

use crate::error::{Result, SheetFilterError};
use sheet_filter_common::export::encode_session;
use sheet_filter_common::SessionState;
use std::path::{Path, PathBuf};

/// 出力先を決定
///
/// ディレクトリ（または拡張子なし）が指定された場合は `file_name` を付加する。
pub fn output_path(output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(".").join(file_name),
    }
}

/// 絞り込み結果をExcelファイルに書き出す
pub fn export_session(state: &SessionState, output_path: &Path, sheet_name: &str) -> Result<()> {
    if state.selected_columns().is_empty() {
        return Err(SheetFilterError::NothingSelected);
    }

    let bytes = encode_session(state, sheet_name)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, bytes)?;

    tracing::info!(
        path = %output_path.display(),
        rows = state.filtered_len(),
        columns = state.selected_columns().len(),
        "workbook written"
    );
    Ok(())
}
