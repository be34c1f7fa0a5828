//! Tabla de texto alineada para la terminal.

use crate::table::{Cell, Table};

pub fn render_text(table: &Table) -> String {
    let cells: Vec<Vec<String>> = table.rows.iter().map(|r| r.iter().map(Cell::display).collect()).collect();
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row) {
            *w = (*w).max(c.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, table.headers.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, values: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = values.zip(widths).map(|(v, &w)| format!("{v:<w$}")).collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
