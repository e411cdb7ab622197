//! Field formatting primitives.
//!
//! Every field in the file has an exact on-wire width. These helpers render
//! dates, amounts, counts and text into that representation. They never
//! truncate: over-long input is a validation failure and must be rejected
//! before it reaches this module.

use chrono::NaiveDate;

/// `strftime` pattern for every date field in the file.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Renders a date as `YYYYMMDD`.
///
/// ```
/// use chrono::NaiveDate;
/// use bank_payment_file::format::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2015, 8, 13).unwrap();
/// assert_eq!(format_date(date), "20150813");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Right-pads `value` with spaces to `width` characters.
///
/// Widths are counted in characters, not UTF-8 bytes, since every character
/// becomes a single byte once encoded. A value longer than `width` is
/// returned unchanged.
pub fn format_fixed_left(value: &str, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}

/// Left-pads `value` with zeros to `width` characters.
pub fn format_zero_padded(value: &str, width: usize) -> String {
    format!("{:0>width$}", value, width = width)
}

/// Renders `amount` as its zero-padded absolute value followed by a sign.
///
/// The sign is `+` for zero and positive amounts and `-` for negative ones.
/// Earlier producers of this format wrote `+` for every amount; receivers
/// that relied on that will now see `-` on debit amounts.
///
/// ```
/// use bank_payment_file::format::format_amount;
///
/// assert_eq!(format_amount(747, 13), "0000000000747+");
/// assert_eq!(format_amount(-25, 13), "0000000000025-");
/// ```
pub fn format_amount(amount: i64, width: usize) -> String {
    let sign = if amount < 0 { '-' } else { '+' };
    format!("{:0>width$}{}", amount.unsigned_abs(), sign, width = width)
}

/// Zero-pads an unsigned count to `width` digits.
pub fn format_numeric_padded(count: u64, width: usize) -> String {
    format!("{:0>width$}", count, width = width)
}

/// A run of `width` spaces, used for filler fields.
pub fn blank(width: usize) -> String {
    " ".repeat(width)
}
