//! Tab-separated sheet exports.
//!
//! # Format
//! ```text
//! word	info	translation	status
//! der Hund	m	собака	NEW*1
//! die Katze		кошка	NORMAL*1
//! ```
//!
//! The first line labels the columns. Empty cells read as `nan`.

use std::collections::BTreeMap;

use crate::answer::MISSING;
use crate::error::{DictationError, Result};
use crate::types::Sheet;

const SEPARATOR: char = '\t';

/// Parse a tab-separated export into a sheet.
pub fn parse_sheet(name: &str, content: &str) -> Result<Sheet> {
    let mut lines = content.lines().enumerate();

    let header: Vec<String> = match lines.next() {
        Some((_, line)) if !line.trim().is_empty() => split_line(line).map(str::to_string).collect(),
        _ => {
            return Err(DictationError::MalformedSheet {
                sheet: name.to_string(),
                line: 1,
                reason: "missing header line".to_string(),
            })
        }
    };

    let mut rows = Vec::new();
    let mut blank_run = 0;

    for (idx, line) in lines {
        let line_num = idx + 1;

        if line.trim().is_empty() {
            blank_run += 1;
            continue;
        }
        // blank lines between data rows still occupy a spreadsheet row
        for _ in 0..blank_run {
            rows.push(vec![MISSING.to_string(); header.len()]);
        }
        blank_run = 0;

        rows.push(parse_row(name, line, line_num, header.len())?);
    }

    Ok(Sheet::new(name, header, rows))
}

fn parse_row(name: &str, line: &str, line_num: usize, width: usize) -> Result<Vec<String>> {
    let mut cells: Vec<String> = split_line(line)
        .map(|cell| {
            if cell.trim().is_empty() {
                MISSING.to_string()
            } else {
                cell.to_string()
            }
        })
        .collect();

    if cells.len() > width {
        return Err(DictationError::MalformedSheet {
            sheet: name.to_string(),
            line: line_num,
            reason: format!("{} cells but only {} columns", cells.len(), width),
        });
    }
    cells.resize(width, MISSING.to_string());
    Ok(cells)
}

fn split_line(line: &str) -> impl Iterator<Item = &str> {
    line.trim_end_matches('\r').split(SEPARATOR)
}

/// Replace the status cells of the given data rows, leaving every other cell
/// and every line ending exactly as it was. Keys are storage offsets (0 is the
/// line after the header).
pub fn rewrite_statuses(content: &str, column: usize, updates: &BTreeMap<usize, String>) -> String {
    if updates.is_empty() {
        return content.to_string();
    }

    let mut rewritten = String::with_capacity(content.len());
    for (idx, line) in content.split_inclusive('\n').enumerate() {
        let update = idx.checked_sub(1).and_then(|offset| updates.get(&offset));
        let Some(status) = update else {
            rewritten.push_str(line);
            continue;
        };

        let body = line.trim_end_matches('\n').trim_end_matches('\r');
        let mut cells: Vec<&str> = body.split(SEPARATOR).collect();
        if cells.len() <= column {
            cells.resize(column + 1, "");
        }
        cells[column] = status.as_str();
        rewritten.push_str(&cells.join("\t"));
        rewritten.push_str(&line[body.len()..]);
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NOUNS: &str = "word\tinfo\ttranslation\tstatus\nder Hund\tm\tсобака\tNEW*1\ndie Katze\t\tкошка\tNORMAL*1\n";

    #[test]
    fn parse_header_and_rows() {
        let sheet = parse_sheet("nouns", NOUNS).unwrap();
        assert_eq!(sheet.name, "nouns");
        assert_eq!(sheet.header, vec!["word", "info", "translation", "status"]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(0, 0), "der Hund");
        assert_eq!(sheet.cell(1, 1), "nan");
        assert_eq!(sheet.cell(1, 3), "NORMAL*1");
    }

    #[test]
    fn short_rows_are_padded() {
        let sheet = parse_sheet("nouns", "a\tb\tc\nx\n").unwrap();
        assert_eq!(sheet.rows[0], vec!["x", "nan", "nan"]);
    }

    #[test]
    fn reject_rows_wider_than_header() {
        let result = parse_sheet("nouns", "a\tb\nx\ty\tz\n");
        assert!(matches!(result, Err(DictationError::MalformedSheet { line: 2, .. })));
    }

    #[test]
    fn reject_missing_header() {
        assert!(matches!(parse_sheet("nouns", ""), Err(DictationError::MalformedSheet { line: 1, .. })));
    }

    #[test]
    fn inner_blank_lines_keep_row_positions() {
        let sheet = parse_sheet("nouns", "a\tb\nx\t1\n\ny\t2\n\n\n").unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.cell(1, 0), "nan");
        assert_eq!(sheet.cell(2, 0), "y");
    }

    #[test]
    fn handles_crlf() {
        let sheet = parse_sheet("nouns", "a\tb\r\nx\tNEW*1\r\n").unwrap();
        assert_eq!(sheet.cell(0, 1), "NEW*1");
    }

    #[test]
    fn rewrite_only_touches_named_cells() {
        let updates = BTreeMap::from([(1, "NORMAL*1".to_string())]);
        let rewritten = rewrite_statuses(NOUNS, 3, &updates);
        assert_eq!(
            rewritten,
            "word\tinfo\ttranslation\tstatus\nder Hund\tm\tсобака\tNEW*1\ndie Katze\t\tкошка\tNORMAL*1\n"
        );

        let updates = BTreeMap::from([(0, "NEW*2".to_string())]);
        let rewritten = rewrite_statuses(NOUNS, 3, &updates);
        assert!(rewritten.contains("der Hund\tm\tсобака\tNEW*2\n"));
        assert!(rewritten.contains("die Katze\t\tкошка\tNORMAL*1\n"));
    }

    #[test]
    fn rewrite_keeps_line_endings() {
        let crlf = "w\tstatus\r\na\tNEW*1\r\nb\tNEW*1\r\n";
        let updates = BTreeMap::from([(0, "NORMAL*1".to_string())]);
        assert_eq!(rewrite_statuses(crlf, 1, &updates), "w\tstatus\r\na\tNORMAL*1\r\nb\tNEW*1\r\n");

        // mixed endings and a last line without one
        let mixed = "w\tstatus\na\tNEW*1\r\nb\tNEW*1";
        let updates = BTreeMap::from([(0, "NEW*2".to_string()), (1, "NORMAL*1".to_string())]);
        assert_eq!(rewrite_statuses(mixed, 1, &updates), "w\tstatus\na\tNEW*2\r\nb\tNORMAL*1");
    }

    #[test]
    fn rewrite_without_updates_is_identity() {
        assert_eq!(rewrite_statuses(NOUNS, 3, &BTreeMap::new()), NOUNS);
    }
}
