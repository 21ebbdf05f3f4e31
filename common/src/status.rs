//! 画面に表示する処理状況

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ファイル読み込み・出力の状況
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Status {
    #[default]
    Idle,
    Loading { file_name: String },
    Loaded { file_name: String, rows: usize, columns: usize },
    Exported { file_name: String, rows: usize },
    Failed { message: String },
}

impl Status {
    pub fn failed(error: &Error) -> Self {
        let message = match error {
            Error::EmptySheet | Error::NoSheets => "The file is empty or unreadable.".to_string(),
            Error::Decode(_) => {
                "Could not read the file. Please choose an .xlsx or .xls spreadsheet.".to_string()
            }
            other => other.to_string(),
        };
        Status::Failed { message }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Failed { .. })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => Ok(()),
            Status::Loading { file_name } => write!(f, "Loading {}...", file_name),
            Status::Loaded { file_name, rows, columns } => {
                write!(f, "Loaded {}: {} rows, {} columns", file_name, rows, columns)
            }
            Status::Exported { file_name, rows } => write!(f, "Saved {} ({} rows)", file_name, rows),
            Status::Failed { message } => f.write_str(message),
        }
    }
}
