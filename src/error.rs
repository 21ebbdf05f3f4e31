use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetFilterError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("列が見つかりません: {0}")]
    UnknownColumn(String),

    #[error("列 {column} に値 {value} はありません")]
    UnknownFilterValue { column: String, value: String },

    #[error("絞り込み条件の形式が不正です（COL=V1,V2 の形式で指定）: {0}")]
    InvalidFilterArg(String),

    #[error("出力する列が選択されていません。--columns か --all を指定してください")]
    NothingSelected,

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] sheet_filter_common::Error),
}

pub type Result<T> = std::result::Result<T, SheetFilterError>;
