//! プレビュー表示（テキスト表）

use sheet_filter_common::{Row, SessionState};

const MAX_CELL_WIDTH: usize = 30;

/// 選択列の絞り込み結果を表形式の文字列にする
///
/// 列が未選択の場合は `None`。
pub fn render_preview(state: &SessionState, limit: usize) -> Option<String> {
    if state.selected_columns().is_empty() {
        return None;
    }

    let headers = state.export_headers();
    let rows = state.preview_rows(limit);
    let mut table = render_table(&headers, &rows);

    let total = state.filtered_len();
    if total > rows.len() {
        table.push_str(&format!("... 他 {} 行\n", total - rows.len()));
    }
    table.push_str(&format!("{} / {} 行\n", total, state.original_rows().len()));
    Some(table)
}

fn render_table(headers: &[String], rows: &[Row]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| headers.iter().map(|h| truncate(&row.value(h).to_string())).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|line| line[i].chars().count())
                .chain(std::iter::once(truncate(h).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| truncate(h)).collect();
    push_line(&mut out, &header_cells, &widths);

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &separator, &widths);

    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str("| ");
    out.push_str(&padded.join(" | "));
    out.push_str(" |\n");
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        cut.push('…');
        cut
    }
}
