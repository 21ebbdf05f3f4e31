//! Excel生成（共通ライブラリ）
//!
//! 絞り込み結果を1シートのブックとしてバッファに書き出す。

use crate::error::{Error, Result};
use crate::session::SessionState;
use crate::types::{CellValue, Row};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

fn encode_error(e: XlsxError) -> Error {
    Error::Encode(e.to_string())
}

/// 行データをブックのバイト列に変換
///
/// # Arguments
/// * `headers` - 列見出し（行データのキーと一致させる）
/// * `rows` - 出力する行（見出しにないキーは無視、欠けているキーは空セル）
/// * `sheet_name` - シート名
pub fn encode_workbook(headers: &[String], rows: &[Row], sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(encode_error)?;

    for (c, header) in headers.iter().enumerate() {
        let col = column_number(c)?;
        worksheet
            .write_string_with_format(0, col, header, &header_format)
            .map_err(encode_error)?;
    }

    for (r, row) in rows.iter().enumerate() {
        let row_num = u32::try_from(r + 1)
            .map_err(|_| Error::Encode(format!("行数が上限を超えています: {}", r + 1)))?;

        for (c, header) in headers.iter().enumerate() {
            let col = column_number(c)?;
            match row.value(header) {
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col, s).map_err(encode_error)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col, *n).map_err(encode_error)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b).map_err(encode_error)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "workbook encoded");

    workbook.save_to_buffer().map_err(encode_error)
}

/// セッションの絞り込み結果（選択列のみ）をブックに変換
pub fn encode_session(state: &SessionState, sheet_name: &str) -> Result<Vec<u8>> {
    encode_workbook(&state.export_headers(), &state.export_rows(), sheet_name)
}

fn column_number(index: usize) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| Error::Encode(format!("列数が上限を超えています: {}", index + 1)))
}
