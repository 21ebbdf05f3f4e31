//! Export core modules shared across CLI and WASM wrappers.

#[cfg(feature = "excel")]
pub mod excel_core;

#[cfg(feature = "excel")]
pub use excel_core::{encode_session, encode_workbook};
