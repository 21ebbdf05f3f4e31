//! 既定値の定義
//!
//! CLIとWeb(WASM)で同じ名前・形式のファイルを出力するための定数。

/// ダウンロード時のファイル名
pub const EXPORT_FILE_NAME: &str = "filtered_data.xlsx";

/// 出力ブックのシート名
pub const EXPORT_SHEET_NAME: &str = "FilteredData";

/// ダウンロード時のMIMEタイプ
pub const EXPORT_MIME_TYPE: &str = "application/octet-stream";

/// ファイル選択ダイアログの accept 属性
pub const ACCEPT_ATTRIBUTE: &str = ".xlsx, .xls";

/// 読み込み対象として想定する拡張子
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// 「すべて選択」の表示名
pub const SELECT_ALL_LABEL: &str = "Select All";

/// プレビューに表示する最大行数（CLI）
pub const DEFAULT_PREVIEW_LIMIT: usize = 20;
