// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

use crate::config::consts::BOM;

/* ---------------- Writing ---------------- */

/// Wrap a field in double quotes, doubling any inner quote.
pub fn quote_field(field: &str) -> String {
    join!("\"", &field.replace('"', "\"\""), "\"")
}

/// Write one row, every field quoted, fields joined by `,`. No line terminator.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, ",")?; } else { first = false; }
        write!(w, "{}", quote_field(cell))?;
    }
    Ok(())
}

/// An export built from the current selection: ordered rows of plain
/// (unquoted) fields. Serialized on demand, then discarded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CsvDocument {
    pub rows: Vec<Vec<String>>,
}

impl CsvDocument {
    pub fn new() -> Self { Self { rows: Vec::new() } }

    pub fn push(&mut self, row: Vec<String>) { self.rows.push(row); }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// BOM, then rows joined by `\n` (no trailing newline).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::new();
        buf.extend_from_slice(BOM.as_bytes());
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 { buf.push(b'\n'); }
            // Writing into a Vec cannot fail.
            let _ = write_row(&mut buf, row);
        }
        buf
    }
}

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant). A leading BOM is skipped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}
