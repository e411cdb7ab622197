//! Notice text chunking.
//!
//! A notice is free-form remittance text. On the wire it occupies exactly
//! [`NOTICE_LINES`] fields of [`NOTICE_LINE_WIDTH`] characters each.

/// Number of notice fields in a payment record.
pub const NOTICE_LINES: usize = 9;

/// Width of a single notice field.
pub const NOTICE_LINE_WIDTH: usize = 35;

/// Splits a notice into its logical lines.
///
/// Carriage returns are removed and surrounding whitespace trimmed before
/// splitting on `\n`. An empty notice has no lines at all.
pub fn logical_lines(notice: &str) -> Vec<String> {
    let normalized = notice.replace('\r', "");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(str::to_string).collect()
}

/// Splits a notice into at least [`NOTICE_LINES`] chunks.
///
/// Each logical line is cut into consecutive slices of at most
/// [`NOTICE_LINE_WIDTH`] characters, with no regard for word boundaries. A
/// blank logical line yields one empty chunk. The result is padded with empty
/// chunks up to [`NOTICE_LINES`] entries.
///
/// Input that produces more than [`NOTICE_LINES`] chunks is returned in full;
/// rejecting it is the validator's job.
///
/// ```
/// use bank_payment_file::notice::chunk_notice;
///
/// let chunks = chunk_notice("notice");
/// assert_eq!(chunks.len(), 9);
/// assert_eq!(chunks[0], "notice");
/// assert!(chunks[1..].iter().all(|c| c.is_empty()));
/// ```
pub fn chunk_notice(notice: &str) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::with_capacity(NOTICE_LINES);

    for line in logical_lines(notice) {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            chunks.push(String::new());
            continue;
        }
        chunks.extend(
            chars
                .chunks(NOTICE_LINE_WIDTH)
                .map(|chunk| chunk.iter().collect::<String>()),
        );
    }

    if chunks.len() < NOTICE_LINES {
        chunks.resize(NOTICE_LINES, String::new());
    }
    chunks
}
