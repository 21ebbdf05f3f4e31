//! ファイル読み込み（CLI版）
//!
//! ファイル読み込みは非同期で行い、デコードはブロッキングスレッドで実行する。

use crate::error::{Result, SheetFilterError};
use indicatif::ProgressBar;
use sheet_filter_common::import::{self, is_supported_extension};
use sheet_filter_common::SessionState;
use std::path::Path;
use std::time::Duration;

/// ファイルを読み込んで新しいセッションを作る
pub async fn load_session(path: &Path) -> Result<SessionState> {
    if !path.is_file() {
        return Err(SheetFilterError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if !is_supported_extension(&file_name) {
        tracing::warn!(file = %file_name, "拡張子が .xlsx / .xls ではありません。読み込みを試みます");
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("{} を読み込み中...", file_name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let loaded = read_and_decode(path).await;
    spinner.finish_and_clear();

    let state = loaded?;
    tracing::info!(
        file = %file_name,
        rows = state.original_rows().len(),
        columns = state.columns().len(),
        "file loaded"
    );
    Ok(state)
}

/// ファイルを読み込んでデコード
async fn read_and_decode(path: &Path) -> Result<SessionState> {
    let bytes = tokio::fs::read(path).await?;
    let decoded = tokio::task::spawn_blocking(move || {
        import::load_bytes(&SessionState::new(), &bytes)
    })
    .await
    .map_err(|e| SheetFilterError::Io(std::io::Error::other(e)))?;
    Ok(decoded?)
}
