use crate::domain::model::RawRecord;
use crate::domain::ports::ReaderOptions;
use crate::utils::error::Result;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Reads CSV bytes (header row first) into raw records.
pub fn read_records(data: &[u8], options: &ReaderOptions) -> Result<Vec<RawRecord>> {
    read_records_with(data, options, |_, _| {})
}

/// Like [`read_records`], calling `on_record` with each record and the running count.
///
/// Rows shorter than the header lack the trailing keys; extra fields are dropped.
/// Blank lines are skipped unless `ignore_empty` is off, in which case each one becomes a
/// record holding an empty first column.
pub fn read_records_with<F>(
    data: &[u8],
    options: &ReaderOptions,
    mut on_record: F,
) -> Result<Vec<RawRecord>>
where
    F: FnMut(&RawRecord, usize),
{
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .has_headers(true)
        .flexible(true)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .from_reader(data);

    let headers = reader.headers()?.clone();
    tracing::debug!("CSV headers: {:?}", headers);

    let mut records = Vec::new();
    let mut push = |record: RawRecord, records: &mut Vec<RawRecord>| {
        records.push(record);
        if let Some(last) = records.last() {
            on_record(last, records.len());
        }
    };

    // The csv crate never yields blank lines, so they are recovered from reader offsets.
    let mut previous_end = reader.position().byte() as usize;
    let mut row = StringRecord::new();
    while reader.read_record(&mut row)? {
        if !options.ignore_empty {
            for _ in 0..blank_lines_after(data, previous_end) {
                push(blank_record(&headers, options.empty_as_null), &mut records);
            }
        }
        push(to_raw_record(&headers, &row, options.empty_as_null), &mut records);
        previous_end = reader.position().byte() as usize;
    }

    if !options.ignore_empty && !headers.is_empty() {
        for _ in 0..blank_lines_after(data, previous_end) {
            push(blank_record(&headers, options.empty_as_null), &mut records);
        }
    }

    Ok(records)
}

fn is_line_break(byte: &u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}

/// Counts the blank lines between the record ending near `offset` and the next content.
///
/// `offset` may sit anywhere inside the record terminator. The first line break after the
/// record content ends the record; every further break (`\r\n`, `\n` or `\r`) is a blank line.
fn blank_lines_after(data: &[u8], offset: usize) -> usize {
    let offset = offset.min(data.len());
    let content_end = data[..offset]
        .iter()
        .rposition(|b| !is_line_break(b))
        .map_or(0, |i| i + 1);
    let run_len = data[content_end..]
        .iter()
        .take_while(|b| is_line_break(b))
        .count();
    let run = &data[content_end..content_end + run_len];

    let mut breaks: usize = 0;
    let mut i = 0;
    while i < run.len() {
        i += if run[i] == b'\r' && run.get(i + 1) == Some(&b'\n') {
            2
        } else {
            1
        };
        breaks += 1;
    }

    breaks.saturating_sub(1)
}

fn field_value(value: &str, empty_as_null: bool) -> Option<String> {
    if empty_as_null && value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn blank_record(headers: &StringRecord, empty_as_null: bool) -> RawRecord {
    let mut record = RawRecord::with_capacity(1);
    if let Some(first) = headers.get(0) {
        record.insert(first, field_value("", empty_as_null));
    }
    record
}

fn to_raw_record(headers: &StringRecord, row: &StringRecord, empty_as_null: bool) -> RawRecord {
    let mut record = RawRecord::with_capacity(headers.len());
    for (header, value) in headers.iter().zip(row.iter()) {
        record.insert(header, field_value(value, empty_as_null));
    }
    record
}
