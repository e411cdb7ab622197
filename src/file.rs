//! Whole-file assembly.

use crate::error::{FileError, Result};
use crate::record::{PaymentEndRecord, PaymentRecord, PaymentStartRecord, Record};
use crate::validate::{validate_payment, Violation};
use crate::writer::write_records;
use chrono::NaiveDate;
use log::{debug, warn};
use std::io::Write;

/// A complete payment file: start record, payments, end record.
///
/// Unlike the lower-level writer functions, a `PaymentFile` validates every
/// payment before writing anything, so an invalid payment never results in
/// a partial file.
///
/// # Example
///
/// ```
/// use bank_payment_file::{PaymentFile, PaymentRecord, Recipient};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2015, 9, 17).unwrap();
/// let recipient = Recipient::new("6666", "9876543210").with_city("5000", "Odense");
/// let payment = PaymentRecord::new(date, 747, "000000123456789", recipient);
///
/// let mut file = PaymentFile::new(date);
/// file.push(payment);
///
/// let bytes = file.to_bytes().unwrap();
/// assert_eq!(bytes.len(), 3 * 896);
/// ```
#[derive(Debug, Clone)]
pub struct PaymentFile {
    creation_date: NaiveDate,
    payments: Vec<PaymentRecord>,
}

impl PaymentFile {
    /// Creates an empty file dated `creation_date`.
    pub fn new(creation_date: NaiveDate) -> Self {
        PaymentFile {
            creation_date,
            payments: Vec::new(),
        }
    }

    pub fn with_payments(creation_date: NaiveDate, payments: Vec<PaymentRecord>) -> Self {
        PaymentFile {
            creation_date,
            payments,
        }
    }

    pub fn push(&mut self, payment: PaymentRecord) {
        self.payments.push(payment);
    }

    pub fn creation_date(&self) -> NaiveDate {
        self.creation_date
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    /// Validates every payment.
    ///
    /// Returns `(index, violations)` for each invalid payment, in file order.
    pub fn validate(&self) -> Vec<(usize, Vec<Violation>)> {
        self.payments
            .iter()
            .enumerate()
            .filter_map(|(idx, payment)| {
                let violations = validate_payment(payment);
                if violations.is_empty() {
                    None
                } else {
                    Some((idx, violations))
                }
            })
            .collect()
    }

    /// Validates all payments, then writes the whole file to `sink`.
    ///
    /// On a validation failure nothing is written and the first invalid
    /// payment is reported; every failure is logged. A total that does not
    /// fit the end record's amount field is also rejected up front.
    pub fn write<W: Write>(&self, sink: &mut W) -> Result<()> {
        let invalid = self.validate();
        for (idx, violations) in &invalid {
            for violation in violations {
                warn!("Payment {}: {}", idx + 1, violation);
            }
        }
        if let Some((idx, violations)) = invalid.into_iter().next() {
            return Err(FileError::InvalidPayment {
                index: idx + 1,
                violations,
            });
        }

        let start = PaymentStartRecord::new(self.creation_date);
        let end = PaymentEndRecord::new(self.creation_date, &self.payments).map_err(|e| {
            warn!("{}", e);
            e
        })?;

        let mut records: Vec<&dyn Record> = Vec::with_capacity(self.payments.len() + 2);
        records.push(&start);
        records.extend(self.payments.iter().map(|p| p as &dyn Record));
        records.push(&end);

        debug!(
            "Writing payment file with {} payments, total {}",
            self.payments.len(),
            end.total_amount()
        );

        write_records(sink, &records)
    }

    /// Validates all payments and returns the encoded file.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write(&mut output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipient::Recipient;
    use crate::validate::ViolationKind;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 9, 17).unwrap()
    }

    fn payment(amount: i64) -> PaymentRecord {
        PaymentRecord::new(
            date(),
            amount,
            "000000123456789",
            Recipient::new("6666", "9876543210")
                .with_name("nævn")
                .with_city("5000", "Odense"),
        )
    }

    #[test]
    fn test_empty_file_has_start_and_end() {
        let bytes = PaymentFile::new(date()).to_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<&str> = text.split_terminator("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\"IB000000000000\",\"20150917\""));
        assert!(lines[1].starts_with("\"IB999999999999\",\"20150917\",\"000000\",\"0000000000000+\""));
        assert!(text.ends_with("\r\n"));
    }

    #[test]
    fn test_payments_are_written_in_order() {
        let file = PaymentFile::with_payments(date(), vec![payment(1), payment(2)]);
        let bytes = file.to_bytes().unwrap();

        assert_eq!(bytes.len(), 4 * 896);
        let second_line = &bytes[896..896 * 2];
        assert!(second_line.starts_with(b"\"IB030202000005\",\"0001\",\"20150917\",\"0000000000001+\""));
        let end_line = &bytes[896 * 3..];
        assert!(end_line.starts_with(b"\"IB999999999999\",\"20150917\",\"000002\",\"0000000000003+\""));
    }

    #[test]
    fn test_invalid_payment_aborts_whole_file() {
        let mut bad = payment(5);
        bad.recipient.registration_number = "66".to_string();
        let file = PaymentFile::with_payments(date(), vec![payment(1), bad]);

        let mut out = Vec::new();
        let err = file.write(&mut out).unwrap_err();

        match err {
            FileError::InvalidPayment { index, violations } => {
                assert_eq!(index, 2);
                assert_eq!(violations[0].field, "recipient.registration_number");
                assert_eq!(
                    violations[0].kind,
                    ViolationKind::WrongLength {
                        expected: 4,
                        actual: 2
                    }
                );
            }
            other => panic!("Expected InvalidPayment, got {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_validate_reports_every_invalid_payment() {
        let mut first = payment(1);
        first.reference = "r".repeat(36);
        let mut third = payment(3);
        third.sender_account_number = "1".to_string();

        let file = PaymentFile::with_payments(date(), vec![first, payment(2), third]);
        let invalid = file.validate();

        let indexes: Vec<usize> = invalid.iter().map(|(idx, _)| *idx).collect();
        assert_eq!(indexes, vec![0, 2]);
    }

    #[test]
    fn test_blank_zip_code_shortens_payment_line() {
        let mut short_zip = payment(1);
        short_zip.recipient.zip_code.clear();
        let bytes = PaymentFile::with_payments(date(), vec![short_zip])
            .to_bytes()
            .unwrap();

        assert_eq!(bytes.len(), 896 + 892 + 896);
    }

    #[test]
    fn test_amount_wider_than_field_is_rejected() {
        let file = PaymentFile::with_payments(date(), vec![payment(10_000_000_000_000)]);

        let mut out = Vec::new();
        let err = file.write(&mut out).unwrap_err();

        match err {
            FileError::InvalidPayment { index, violations } => {
                assert_eq!(index, 1);
                assert_eq!(violations[0].field, "amount");
            }
            other => panic!("Expected InvalidPayment, got {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_total_wider_than_field_is_rejected() {
        let max = 9_999_999_999_999;
        let file = PaymentFile::with_payments(date(), vec![payment(max), payment(max)]);
        assert!(file.validate().is_empty());

        let mut out = Vec::new();
        let err = file.write(&mut out).unwrap_err();

        assert!(matches!(err, FileError::TotalOutOfRange { count: 2, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_every_line_is_896_bytes_at_amount_limit() {
        let max = 9_999_999_999_999;
        let file = PaymentFile::with_payments(date(), vec![payment(max), payment(-1)]);
        let bytes = file.to_bytes().unwrap();

        assert_eq!(bytes.len(), 4 * 896);
        for line in bytes.chunks(896) {
            assert!(line.ends_with(b"\r\n"));
        }
        assert!(bytes[896 * 3..].starts_with(b"\"IB999999999999\",\"20150917\",\"000002\",\"9999999999998+\""));
    }

    #[test]
    fn test_non_ascii_is_single_byte() {
        let file = PaymentFile::with_payments(date(), vec![payment(1)]);
        let bytes = file.to_bytes().unwrap();

        assert_eq!(bytes.len(), 3 * 896);
        assert!(bytes.windows(4).any(|w| w == b"n\xe6vn"));
    }
}
