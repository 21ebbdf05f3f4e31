//! UIコンポーネント

pub mod column_picker;
pub mod download;
pub mod filter_panel;
pub mod header;
pub mod preview_table;
pub mod upload_area;
