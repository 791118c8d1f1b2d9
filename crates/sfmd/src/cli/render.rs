//! Terminal output for `CmdResult` values.
//!
//! Tables are aligned by display width, not byte length, so object and field
//! labels with wide characters still line up.

use colored::Colorize;
use serde_json::{Map, Value};
use sfmdapp::api::{CmdMessage, MessageLevel, ShownRecord, Table};
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: usize = 2;

/// Info and success go to stdout, warnings and errors to stderr.
pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_table(table: &Table, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&table_to_json(table))?);
    } else if table.rows.is_empty() {
        println!("{}", "No records found.".dimmed());
    } else {
        print!("{}", render_table(table));
    }
    Ok(())
}

pub(super) fn print_shown(shown: &[ShownRecord], json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }
    for (i, record) in shown.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", format!("==> {} <==", record.file.display()).bold());
        println!("{}", record.xml);
    }
    Ok(())
}

/// Header row in bold, one line per row, columns padded to their widest cell.
pub(super) fn render_table(table: &Table) -> String {
    let widths = column_widths(table);
    let mut out = String::new();
    let header: Vec<String> = table.headers.iter().map(|h| h.bold().to_string()).collect();
    push_row(&mut out, &table.headers, &header, &widths);
    for row in &table.rows {
        push_row(&mut out, row, row, &widths);
    }
    out
}

fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.width()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }
    widths
}

// `plain` is measured, `styled` is printed; they differ only by color codes.
fn push_row(out: &mut String, plain: &[String], styled: &[String], widths: &[usize]) {
    let last = plain.len().saturating_sub(1);
    for (i, (cell, shown)) in plain.iter().zip(styled).enumerate() {
        out.push_str(shown);
        if i < last {
            let width = widths.get(i).copied().unwrap_or_default();
            let padding = width.saturating_sub(cell.width()) + COLUMN_GAP;
            out.push_str(&" ".repeat(padding));
        }
    }
    out.push('\n');
}

/// Rows as objects keyed by header.
fn table_to_json(table: &Table) -> Value {
    let rows = table
        .rows
        .iter()
        .map(|row| {
            let object: Map<String, Value> = table
                .headers
                .iter()
                .zip(row)
                .map(|(h, cell)| (h.clone(), Value::String(cell.clone())))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut table = Table::new(&["Profile", "Object"]);
        table.rows.push(vec!["Admin".into(), "Account".into()]);
        table.rows.push(vec!["Ünïcode Profile".into(), "Contact".into()]);
        table
    }

    #[test]
    fn columns_align_by_display_width() {
        colored::control::set_override(false);
        let out = render_table(&table());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Profile          Object");
        assert_eq!(lines[1], "Admin            Account");
        assert_eq!(lines[2], "Ünïcode Profile  Contact");
    }

    #[test]
    fn json_rows_are_keyed_by_header() {
        let value = table_to_json(&table());
        assert_eq!(value[0]["Profile"], "Admin");
        assert_eq!(value[1]["Object"], "Contact");
    }
}
