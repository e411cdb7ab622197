//! Validation of recipients and payments against the file layout.
//!
//! Every field in a payment record has a fixed width, and the formatter
//! never truncates. The checks here make sure a record fits before it is
//! written. Results are returned as data; an empty list means valid.
//!
//! Amounts and dates are typed on [`PaymentRecord`], so "numeric" and
//! "date-like" are enforced when a record is built from raw input (see
//! [`crate::input`]) rather than here.

use crate::notice::{logical_lines, NOTICE_LINES, NOTICE_LINE_WIDTH};
use crate::recipient::{
    Recipient, ACCOUNT_NUMBER_LEN, ADDRESS_LINE_WIDTH, REGISTRATION_NUMBER_LEN, ZIP_CODE_MAX_LEN,
};
use crate::record::{PaymentRecord, MAX_AMOUNT, SENDER_ACCOUNT_LEN, TEXT_FIELD_WIDTH};
use crate::writer::find_unencodable;
use std::fmt;

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The field must be exactly `expected` characters long.
    WrongLength { expected: usize, actual: usize },

    /// The field is longer than `max` characters.
    TooLong { max: usize, actual: usize },

    /// The notice has more logical lines than fit in a record.
    TooManyLines { max: usize, actual: usize },

    /// One notice line (1-based) is longer than a notice field.
    LineTooLong {
        line: usize,
        max: usize,
        actual: usize,
    },

    /// The field contains a character with no Windows-1252 representation.
    Unencodable { ch: char },

    /// The amount has more digits than the amount field holds.
    AmountOutOfRange { max: i64, actual: i64 },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::WrongLength { expected, actual } => write!(
                f,
                "must be exactly {} characters, found {}",
                expected, actual
            ),
            ViolationKind::TooLong { max, actual } => {
                write!(f, "must be at most {} characters, found {}", max, actual)
            }
            ViolationKind::TooManyLines { max, actual } => {
                write!(f, "must have at most {} lines, found {}", max, actual)
            }
            ViolationKind::LineTooLong { line, max, actual } => write!(
                f,
                "line {} must be at most {} characters, found {}",
                line, max, actual
            ),
            ViolationKind::Unencodable { ch } => {
                write!(f, "contains {:?}, which is not a Windows-1252 character", ch)
            }
            ViolationKind::AmountOutOfRange { max, actual } => {
                write!(f, "must be between -{} and {}, found {}", max, max, actual)
            }
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the offending field, e.g. `notice` or `recipient.city`.
    pub field: String,
    pub kind: ViolationKind,
}

impl Violation {
    fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Violation {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.kind)
    }
}

/// Checks a recipient; returns one violation per malformed field.
pub fn validate_recipient(recipient: &Recipient) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_exact(
        &mut violations,
        "registration_number",
        &recipient.registration_number,
        REGISTRATION_NUMBER_LEN,
    );
    check_exact(
        &mut violations,
        "account_number",
        &recipient.account_number,
        ACCOUNT_NUMBER_LEN,
    );

    for (field, value) in [
        ("name", &recipient.name),
        ("address", &recipient.address),
        ("address2", &recipient.address2),
    ] {
        check_max(&mut violations, field, value, ADDRESS_LINE_WIDTH);
    }
    check_max(&mut violations, "zip_code", &recipient.zip_code, ZIP_CODE_MAX_LEN);
    check_max(&mut violations, "city", &recipient.city, ADDRESS_LINE_WIDTH);

    violations
}

/// Checks a payment and its recipient.
///
/// Recipient violations are reported with a `recipient.` prefix. Every
/// over-long notice line gets its own entry.
pub fn validate_payment(payment: &PaymentRecord) -> Vec<Violation> {
    let mut violations = Vec::new();

    if payment.amount.unsigned_abs() > MAX_AMOUNT.unsigned_abs() {
        violations.push(Violation::new(
            "amount",
            ViolationKind::AmountOutOfRange {
                max: MAX_AMOUNT,
                actual: payment.amount,
            },
        ));
    }
    check_exact(
        &mut violations,
        "sender_account_number",
        &payment.sender_account_number,
        SENDER_ACCOUNT_LEN,
    );
    check_max(
        &mut violations,
        "entry_text",
        &payment.entry_text,
        TEXT_FIELD_WIDTH,
    );
    check_max(&mut violations, "reference", &payment.reference, TEXT_FIELD_WIDTH);
    check_notice(&mut violations, &payment.notice);

    violations.extend(
        validate_recipient(&payment.recipient)
            .into_iter()
            .map(|v| Violation::new(format!("recipient.{}", v.field), v.kind)),
    );

    violations
}

fn check_notice(violations: &mut Vec<Violation>, notice: &str) {
    let lines = logical_lines(notice);

    if lines.len() > NOTICE_LINES {
        violations.push(Violation::new(
            "notice",
            ViolationKind::TooManyLines {
                max: NOTICE_LINES,
                actual: lines.len(),
            },
        ));
    }

    for (idx, line) in lines.iter().enumerate() {
        let actual = line.chars().count();
        if actual > NOTICE_LINE_WIDTH {
            violations.push(Violation::new(
                "notice",
                ViolationKind::LineTooLong {
                    line: idx + 1,
                    max: NOTICE_LINE_WIDTH,
                    actual,
                },
            ));
        }
    }

    check_encodable(violations, "notice", notice);
}

fn check_exact(violations: &mut Vec<Violation>, field: &str, value: &str, expected: usize) {
    let actual = value.chars().count();
    if actual != expected {
        violations.push(Violation::new(
            field,
            ViolationKind::WrongLength { expected, actual },
        ));
    } else {
        check_encodable(violations, field, value);
    }
}

fn check_max(violations: &mut Vec<Violation>, field: &str, value: &str, max: usize) {
    let actual = value.chars().count();
    if actual > max {
        violations.push(Violation::new(field, ViolationKind::TooLong { max, actual }));
    } else {
        check_encodable(violations, field, value);
    }
}

fn check_encodable(violations: &mut Vec<Violation>, field: &str, value: &str) {
    if let Some(ch) = find_unencodable(value) {
        violations.push(Violation::new(field, ViolationKind::Unencodable { ch }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_recipient() -> Recipient {
        Recipient::new("1234", "0123456789")
            .with_name("n".repeat(32))
            .with_address("a".repeat(32), "a2".repeat(16))
            .with_city("z".repeat(4), "c".repeat(32))
    }

    fn valid_payment() -> PaymentRecord {
        PaymentRecord::new(
            NaiveDate::from_ymd_opt(2015, 9, 25).unwrap(),
            100,
            "1".repeat(15),
            valid_recipient(),
        )
    }

    fn fields_of(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_valid_recipient() {
        assert_eq!(validate_recipient(&valid_recipient()), vec![]);
    }

    #[test]
    fn test_blank_address_fields_are_allowed() {
        assert!(validate_recipient(&Recipient::new("1234", "0123456789")).is_empty());
    }

    #[test]
    fn test_bad_registration_and_account_number() {
        let violations = validate_recipient(&Recipient::new("", "123"));

        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0],
            Violation::new(
                "registration_number",
                ViolationKind::WrongLength {
                    expected: 4,
                    actual: 0
                }
            )
        );
        assert_eq!(violations[1].field, "account_number");
    }

    #[test]
    fn test_recipient_rejects_large_inputs() {
        for field in ["name", "address", "address2", "zip_code", "city"] {
            let mut recipient = valid_recipient();
            let large = "x".repeat(100);
            match field {
                "name" => recipient.name = large,
                "address" => recipient.address = large,
                "address2" => recipient.address2 = large,
                "zip_code" => recipient.zip_code = large,
                _ => recipient.city = large,
            }

            let violations = validate_recipient(&recipient);
            assert_eq!(fields_of(&violations), vec![field]);
        }
    }

    #[test]
    fn test_recipient_boundaries() {
        let mut recipient = valid_recipient();
        recipient.zip_code = "12345".to_string();
        recipient.city = "c".repeat(33);
        recipient.registration_number = "12345".to_string();
        recipient.account_number = "012345678".to_string();

        let violations = validate_recipient(&recipient);
        assert_eq!(
            fields_of(&violations),
            vec!["registration_number", "account_number", "zip_code", "city"]
        );
    }

    #[test]
    fn test_multibyte_characters_count_once() {
        let recipient = valid_recipient().with_name("æ".repeat(32));
        assert!(validate_recipient(&recipient).is_empty());
    }

    #[test]
    fn test_unencodable_character() {
        let recipient = valid_recipient().with_name("Łódź");
        let violations = validate_recipient(&recipient);

        assert_eq!(
            violations,
            vec![Violation::new("name", ViolationKind::Unencodable { ch: 'Ł' })]
        );
    }

    #[test]
    fn test_valid_payment() {
        let payment = valid_payment()
            .with_entry_text("e".repeat(35))
            .with_reference("r".repeat(35))
            .with_notice(vec!["n".repeat(35); 9].join("\n"));
        assert!(validate_payment(&payment).is_empty());
    }

    #[test]
    fn test_amount_at_field_limit() {
        for amount in [MAX_AMOUNT, -MAX_AMOUNT, 0] {
            let mut payment = valid_payment();
            payment.amount = amount;
            assert!(validate_payment(&payment).is_empty(), "{}", amount);
        }
    }

    #[test]
    fn test_amount_wider_than_field() {
        for amount in [MAX_AMOUNT + 1, -MAX_AMOUNT - 1, i64::MIN, i64::MAX] {
            let mut payment = valid_payment();
            payment.amount = amount;

            assert_eq!(
                validate_payment(&payment),
                vec![Violation::new(
                    "amount",
                    ViolationKind::AmountOutOfRange {
                        max: MAX_AMOUNT,
                        actual: amount
                    }
                )]
            );
        }
    }

    #[test]
    fn test_invalid_sender_account_number() {
        let mut payment = valid_payment();
        payment.sender_account_number = "1234".to_string();

        let violations = validate_payment(&payment);
        assert_eq!(fields_of(&violations), vec!["sender_account_number"]);
    }

    #[test]
    fn test_large_text_fields() {
        for field in ["entry_text", "reference", "notice"] {
            let mut payment = valid_payment();
            let large = "x".repeat(100);
            match field {
                "entry_text" => payment.entry_text = large,
                "reference" => payment.reference = large,
                _ => payment.notice = large,
            }

            let violations = validate_payment(&payment);
            assert_eq!(fields_of(&violations), vec![field]);
        }
    }

    #[test]
    fn test_notice_with_ten_lines() {
        let payment = valid_payment().with_notice(vec!["."; 10].join("\n"));
        let violations = validate_payment(&payment);

        assert_eq!(
            violations,
            vec![Violation::new(
                "notice",
                ViolationKind::TooManyLines { max: 9, actual: 10 }
            )]
        );
    }

    #[test]
    fn test_each_long_notice_line_is_reported() {
        let payment = valid_payment().with_notice(vec![".".repeat(36); 9].join("\n"));
        let violations = validate_payment(&payment);

        assert_eq!(violations.len(), 9);
        for (idx, violation) in violations.iter().enumerate() {
            assert_eq!(
                violation.kind,
                ViolationKind::LineTooLong {
                    line: idx + 1,
                    max: 35,
                    actual: 36
                }
            );
        }
    }

    #[test]
    fn test_notice_trailing_newlines_do_not_count() {
        let notice = format!("{}\r\n\r\n", vec!["line"; 9].join("\r\n"));
        let payment = valid_payment().with_notice(notice);
        assert!(validate_payment(&payment).is_empty());
    }

    #[test]
    fn test_recipient_violations_are_prefixed() {
        let mut payment = valid_payment();
        payment.recipient.account_number.clear();

        let violations = validate_payment(&payment);
        assert_eq!(fields_of(&violations), vec!["recipient.account_number"]);
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::new(
            "notice",
            ViolationKind::LineTooLong {
                line: 3,
                max: 35,
                actual: 40,
            },
        );
        assert_eq!(
            violation.to_string(),
            "notice line 3 must be at most 35 characters, found 40"
        );
    }
}
