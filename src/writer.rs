//! Line and file serialization.
//!
//! A record becomes one line: every field wrapped in double quotes, fields
//! separated by commas, the line terminated by CRLF. Field values are not
//! escaped, so they must not contain `"`. All output is Windows-1252.

use crate::error::{FileError, Result};
use crate::record::Record;
use encoding_rs::WINDOWS_1252;
use log::debug;
use std::io::Write;

/// Line terminator written after every record, including the last.
pub const NEWLINE: &str = "\r\n";

/// Returns the first character of `value` that Windows-1252 cannot represent.
pub fn find_unencodable(value: &str) -> Option<char> {
    value.chars().find(|ch| {
        let mut buf = [0u8; 4];
        let (_, _, had_errors) = WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
        had_errors
    })
}

/// Encodes `value` as Windows-1252, failing on the first unmappable character.
pub fn encode_cp1252(field: &str, value: &str) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = WINDOWS_1252.encode(value);
    if had_errors {
        return Err(FileError::Encoding {
            field: field.to_string(),
            ch: find_unencodable(value).unwrap_or(char::REPLACEMENT_CHARACTER),
        });
    }
    Ok(bytes.into_owned())
}

/// Encodes a quoted, comma-separated line without terminator.
fn encode_line(label: &str, fields: &[String]) -> Result<Vec<u8>> {
    let mut line = Vec::with_capacity(fields.iter().map(|f| f.len() + 3).sum());

    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            line.push(b',');
        }
        line.push(b'"');
        line.extend(encode_cp1252(&format!("{} field {}", label, idx + 1), field)?);
        line.push(b'"');
    }

    Ok(line)
}

/// Writes `fields` as one quoted, comma-separated line with no terminator.
///
/// Nothing is written if any field fails to encode.
pub fn write_fields<W: Write>(sink: &mut W, fields: &[String]) -> Result<()> {
    let line = encode_line("record", fields)?;
    sink.write_all(&line)?;
    Ok(())
}

/// Writes a single record followed by CRLF.
///
/// The line is encoded in full before anything reaches `sink`, so an
/// encoding failure never leaves a partial record behind.
pub fn write_record<W: Write>(sink: &mut W, record: &dyn Record) -> Result<()> {
    let mut line = encode_line(record.record_type(), &record.fields())?;
    line.extend_from_slice(NEWLINE.as_bytes());
    sink.write_all(&line)?;

    debug!("Wrote {} record ({} bytes)", record.record_type(), line.len());
    Ok(())
}

/// Writes each record in order, each followed by CRLF.
///
/// An empty slice writes nothing. On error, records before the failing one
/// have already been written in full.
pub fn write_records<W: Write>(sink: &mut W, records: &[&dyn Record]) -> Result<()> {
    for record in records {
        write_record(sink, *record)?;
    }
    Ok(())
}

/// Serializes records into a Windows-1252 byte buffer.
///
/// ```
/// use bank_payment_file::writer::stream_records;
///
/// assert!(stream_records(&[]).unwrap().is_empty());
/// ```
pub fn stream_records(records: &[&dyn Record]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    write_records(&mut output, records)?;
    Ok(output)
}

/// Renders records as text, before encoding.
///
/// Fails like [`stream_records`] if a field cannot be encoded, so the text
/// is always safe to encode afterwards.
pub fn format_records(records: &[&dyn Record]) -> Result<String> {
    let mut output = String::new();

    for record in records {
        let fields = record.fields();
        let mut quoted = Vec::with_capacity(fields.len());

        for (idx, field) in fields.iter().enumerate() {
            if let Some(ch) = find_unencodable(field) {
                return Err(FileError::Encoding {
                    field: format!("{} field {}", record.record_type(), idx + 1),
                    ch,
                });
            }
            quoted.push(format!("\"{}\"", field));
        }

        output.push_str(&quoted.join(","));
        output.push_str(NEWLINE);
    }

    Ok(output)
}
