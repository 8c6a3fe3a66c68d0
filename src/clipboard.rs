//! Clipboard serialization and parsing.
//!
//! Copy produces tab-separated, newline-separated plain text. Paste accepts
//! the same format or an HTML fragment containing a `<table>`, whose cell
//! text is extracted in document order. Parsing is deliberately lenient: a
//! malformed payload degrades to an empty or partial matrix, never an error
//! (callers treat "nothing parsed" as a no-op).

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::types::column::value_text;
use crate::types::CellValue;

/// Escape a cell value for TSV format.
///
/// Values containing tabs, newlines, or quotes are wrapped in quotes with
/// internal quotes doubled, so the row/column structure survives.
pub fn escape_cell_value(value: &str) -> String {
    let needs_quoting = value.contains('\t')
        || value.contains('\n')
        || value.contains('\r')
        || value.contains('"');

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Serialize a row-major value matrix to `value⇥value…\nvalue⇥value…`.
pub fn serialize_matrix(matrix: &[Vec<CellValue>]) -> String {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| escape_cell_value(&value_text(v)))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a plain-text payload on line breaks, then tabs.
pub fn parse_text(data: &str) -> Vec<Vec<String>> {
    let normalized = data.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split('\n')
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}

/// Extract the first `<table>` of an HTML fragment as a matrix.
///
/// Returns `None` when the fragment has no table. Mismatched end tags are
/// tolerated and unknown entities fall back to their raw text; a hard parse
/// failure mid-table yields the rows collected so far.
pub fn parse_html_table(html: &str) -> Option<Vec<Vec<String>>> {
    let mut reader = Reader::from_str(html);
    reader.trim_text(true);
    reader.check_end_names(false);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut found_table = false;
    let mut in_table = false;
    let mut current_row: Option<Vec<String>> = None;
    let mut current_cell: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"table" if !found_table => {
                    found_table = true;
                    in_table = true;
                }
                b"tr" if in_table => current_row = Some(Vec::new()),
                b"td" | b"th" if in_table && current_row.is_some() => {
                    current_cell = Some(String::new());
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if matches!(e.local_name().as_ref(), b"td" | b"th") && in_table {
                    if let Some(row) = current_row.as_mut() {
                        row.push(String::new());
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(cell) = current_cell.as_mut() {
                    match e.unescape() {
                        Ok(text) => cell.push_str(&text),
                        Err(_) => cell.push_str(&String::from_utf8_lossy(e.as_ref())),
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"td" | b"th" => {
                    if let (Some(row), Some(cell)) = (current_row.as_mut(), current_cell.take()) {
                        row.push(cell);
                    }
                }
                b"tr" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                b"table" if in_table => break,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(_) => break, // degrade to what was collected
            Ok(_) => {}
        }
    }

    found_table.then_some(rows)
}

/// Strict variant of [`parse_html_table`] for hosts that want hard failures:
/// end tags must match and parse errors surface as [`GridError::Xml`].
///
/// [`GridError::Xml`]: crate::error::GridError::Xml
pub fn try_parse_html_table(html: &str) -> crate::error::Result<Option<Vec<Vec<String>>>> {
    let mut reader = Reader::from_str(html);
    reader.trim_text(true);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut found_table = false;
    let mut in_table = false;
    let mut current_row: Option<Vec<String>> = None;
    let mut current_cell: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"table" if !found_table => {
                    found_table = true;
                    in_table = true;
                }
                b"tr" if in_table => current_row = Some(Vec::new()),
                b"td" | b"th" if in_table && current_row.is_some() => {
                    current_cell = Some(String::new());
                }
                _ => {}
            },
            Event::Empty(ref e) => {
                if matches!(e.local_name().as_ref(), b"td" | b"th") && in_table {
                    if let Some(row) = current_row.as_mut() {
                        row.push(String::new());
                    }
                }
            }
            Event::Text(e) => {
                if let Some(cell) = current_cell.as_mut() {
                    cell.push_str(&e.unescape()?);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"td" | b"th" => {
                    if let (Some(row), Some(cell)) = (current_row.as_mut(), current_cell.take()) {
                        row.push(cell);
                    }
                }
                b"tr" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                b"table" if in_table => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(found_table.then_some(rows))
}

/// Parse a clipboard payload into a matrix.
///
/// HTML payloads are searched for a `<table>`; without one (or for plain
/// text) the payload splits on line breaks then tab characters.
pub fn parse_payload(raw: &str, is_html: bool) -> Vec<Vec<String>> {
    if is_html {
        if let Some(matrix) = parse_html_table(raw) {
            return matrix;
        }
    }
    parse_text(raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_matrix_tsv() {
        let matrix = vec![
            vec![json!(1), json!(2)],
            vec![json!("a"), json!("b")],
        ];
        assert_eq!(serialize_matrix(&matrix), "1\t2\na\tb");
    }

    #[test]
    fn test_escape_quotes_specials() {
        assert_eq!(escape_cell_value("plain"), "plain");
        assert_eq!(escape_cell_value("a\tb"), "\"a\tb\"");
        assert_eq!(escape_cell_value("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_parse_text_lines_and_tabs() {
        assert_eq!(
            parse_text("1\t2\n3\t4"),
            vec![
                vec!["1".to_string(), "2".to_string()],
                vec!["3".to_string(), "4".to_string()]
            ]
        );
        // CRLF and bare CR both split rows
        assert_eq!(parse_text("a\r\nb\rc").len(), 3);
    }

    #[test]
    fn test_parse_html_table() {
        let html = "<div><table><tr><td>1</td><td>2</td></tr>\
                    <tr><th>3</th><td>4</td></tr></table></div>";
        let matrix = parse_html_table(html).unwrap();
        assert_eq!(matrix, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_parse_html_without_table_is_none() {
        assert!(parse_html_table("<p>no table here</p>").is_none());
    }

    #[test]
    fn test_parse_payload_falls_back_to_text() {
        let matrix = parse_payload("x\ty", true);
        assert_eq!(matrix, vec![vec!["x".to_string(), "y".to_string()]]);
    }

    #[test]
    fn test_strict_parse_reports_mismatched_tags() {
        let ok = try_parse_html_table("<table><tr><td>1</td></tr></table>").unwrap();
        assert_eq!(ok, Some(vec![vec!["1".to_string()]]));
        assert!(try_parse_html_table("<table><tr><td>1</wrong></tr></table>").is_err());
        assert_eq!(try_parse_html_table("<p>none</p>").unwrap(), None);
    }

    #[test]
    fn test_malformed_html_degrades() {
        // missing closing tags: collected rows survive
        let html = "<table><tr><td>1</td><td>2";
        let matrix = parse_html_table(html).unwrap();
        assert!(matrix.len() <= 1);
    }
}
