// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant).
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
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
            c if c == sep && !in_quotes => {
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

    // Trailing row without a final newline, even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["cajero", "México, Ecatepec", "dice \"hola\""], ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "cajero,\"México, Ecatepec\",\"dice \"\"hola\"\"\"\n");
    }

    #[test]
    fn parses_quoted_fields_and_crlf() {
        let rows = parse_rows("a,b\r\n\"x, y\",\"say \"\"hi\"\"\"\r\n\r\nlast,row", ',');
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["x, y".to_string(), "say \"hi\"".to_string()],
                vec!["last".to_string(), "row".to_string()],
            ]
        );
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(parse_rows("", ',').is_empty());
        assert!(parse_rows("\n\n", ',').is_empty());
    }
}
