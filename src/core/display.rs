use crate::domain::model::OutputRecord;
use indexmap::IndexSet;
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator, TableFormat};
use prettytable::{Cell, Row, Table};

const INDEX_HEADER: &str = "(index)";

fn table_format() -> TableFormat {
    FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separators(
            &[LinePosition::Top, LinePosition::Title, LinePosition::Bottom],
            LineSeparator::new('-', '+', '+', '+'),
        )
        .padding(1, 1)
        .build()
}

/// Renders records as a console table with an `(index)` column.
///
/// Columns are the union of all record keys in order of first appearance. Only the first
/// `max_rows` records are rendered.
pub fn render_table(records: &[OutputRecord], max_rows: usize) -> String {
    let rows = &records[..records.len().min(max_rows)];
    let columns: IndexSet<&str> = rows.iter().flat_map(|record| record.keys()).collect();

    let mut table = Table::new();
    table.set_format(table_format());

    let mut titles = vec![Cell::new(INDEX_HEADER)];
    titles.extend(columns.iter().map(|column| Cell::new(column)));
    table.set_titles(Row::new(titles));

    for (index, record) in rows.iter().enumerate() {
        let mut cells = vec![Cell::new(&index.to_string())];
        cells.extend(columns.iter().map(|column| {
            let value = record
                .get(column)
                .map(|value| single_line(&value.to_string()))
                .unwrap_or_default();
            Cell::new(&value)
        }));
        table.add_row(Row::new(cells));
    }

    table.to_string().trim_end().to_string()
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FieldValue;

    fn record(fields: Vec<(&str, FieldValue)>) -> OutputRecord {
        let mut builder = OutputRecord::builder();
        for (key, value) in fields {
            builder.insert(key, value);
        }
        builder.build()
    }

    #[test]
    fn test_render_table() {
        let records = vec![
            record(vec![
                ("hashtag", FieldValue::String("#foo".to_string())),
                ("count", FieldValue::Number(7.0)),
            ]),
            record(vec![
                ("hashtag", FieldValue::String("#longer".to_string())),
                ("active", FieldValue::Boolean(true)),
            ]),
        ];

        let table = render_table(&records, 10);

        let expected = [
            "+---------+---------+-------+--------+",
            "| (index) | hashtag | count | active |",
            "+---------+---------+-------+--------+",
            "| 0       | #foo    | 7     |        |",
            "| 1       | #longer |       | true   |",
            "+---------+---------+-------+--------+",
        ]
        .join("\n");
        assert_eq!(table, expected);
    }

    #[test]
    fn test_render_table_truncates_rows() {
        let records: Vec<OutputRecord> = (0..15)
            .map(|i| record(vec![("n", FieldValue::Number(i as f64))]))
            .collect();

        let table = render_table(&records, 10);

        assert_eq!(table.lines().count(), 10 + 4);
        assert!(table.contains("| 9       | 9 |"));
        assert!(!table.contains("| 10 "));
    }

    #[test]
    fn test_render_empty_table() {
        let table = render_table(&[], 10);
        assert!(table.contains("| (index) |"));
        assert!(!table.contains("| 0 "));
    }

    #[test]
    fn test_multiline_values_are_flattened() {
        let records = vec![record(vec![(
            "notes",
            FieldValue::String("a\nb".to_string()),
        )])];

        assert!(render_table(&records, 10).contains("| a b   |"));
    }
}
