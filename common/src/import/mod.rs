//! ファイル読み込み（デコード）モジュール

#[cfg(feature = "excel")]
pub mod excel_reader;

#[cfg(feature = "excel")]
pub use excel_reader::{decode_workbook, load_bytes};

use crate::defaults::SUPPORTED_EXTENSIONS;

/// 想定している拡張子（.xlsx / .xls）か
///
/// 判定結果は警告表示にのみ使い、デコード自体は拡張子に関係なく試みる。
pub fn is_supported_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|&e| e == ext)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("report.xlsx"));
        assert!(is_supported_extension("LEGACY.XLS"));
        assert!(is_supported_extension("a.b.xlsx"));
        assert!(!is_supported_extension("data.csv"));
        assert!(!is_supported_extension("xlsx"));
    }
}
