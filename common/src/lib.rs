//! Sheet Filter Common Library
//!
//! CLIとWeb(WASM)で共有される型・セッション状態・ブックの読み書き

pub mod defaults;
pub mod error;
pub mod export;
pub mod import;
pub mod session;
pub mod status;
pub mod types;

pub use error::{Error, Result};
pub use session::{discover_columns, distinct_values, LoadSequencer, LoadTicket, SessionState};
pub use status::Status;
pub use types::{CellValue, ColumnChoice, ColumnDescriptor, Filter, Row};
