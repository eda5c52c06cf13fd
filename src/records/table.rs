//! Aligned text table of records
//!
//! ```text
//! +------+----------+
//! | name | phone    |
//! +------+----------+
//! | Ann  | 555-0001 |
//! +------+----------+
//! ```

use crate::errors::{FlatDbError, FlatDbResult};

use super::types::Record;

/// Renders `records` as a bordered grid.
///
/// Columns come from the first record's fields. Each column is as wide as
/// its longest header or value, counted in characters. Returns
/// `NoRecords` for an empty slice. Lines are joined with `\n` and the
/// result has no trailing newline.
pub fn render_table(records: &[Record]) -> FlatDbResult<String> {
    let first = records.first().ok_or(FlatDbError::NoRecords)?;
    let headers: Vec<&str> = first.fields().collect();

    let widths: Vec<usize> = headers
        .iter()
        .map(|header| {
            records
                .iter()
                .map(|r| r.get(header).chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = format!(
        "+-{}-+",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );

    let row = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = Vec::with_capacity(records.len() + 4);
    lines.push(separator.clone());
    lines.push(row(headers.clone()));
    lines.push(separator.clone());
    for record in records {
        lines.push(row(headers.iter().map(|h| record.get(h)).collect()));
    }
    lines.push(separator);

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signals_no_records() {
        assert_eq!(render_table(&[]), Err(FlatDbError::NoRecords));
    }

    #[test]
    fn test_single_record_grid() {
        let records = vec![Record::from_pairs([("name", "Ann"), ("phone", "555-0001")])];
        let table = render_table(&records).unwrap();
        let expected = "\
+------+----------+
| name | phone    |
+------+----------+
| Ann  | 555-0001 |
+------+----------+";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_width_from_longest_value() {
        let records = vec![
            Record::from_pairs([("id", "1")]),
            Record::from_pairs([("id", "12345")]),
        ];
        let table = render_table(&records).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), records.len() + 4);
        assert!(lines.iter().all(|l| l.chars().count() == "| 12345 |".len()));
        assert_eq!(lines[3], "| 1     |");
    }

    #[test]
    fn test_missing_field_renders_blank() {
        let records = vec![
            Record::from_pairs([("a", "x"), ("b", "y")]),
            Record::from_pairs([("a", "z")]),
        ];
        let table = render_table(&records).unwrap();
        assert!(table.contains("| z | "));
    }

    #[test]
    fn test_does_not_mutate_input() {
        let records = vec![Record::from_pairs([("a", "x")])];
        let before = records.clone();
        render_table(&records).unwrap();
        assert_eq!(records, before);
    }
}
