//! CSV payment input for the command line tool.
//!
//! Each row describes one payment. Rows are read with `csv`/`serde` and then
//! turned into typed [`PaymentRecord`]s; a non-numeric amount or a malformed
//! date fails at that point, before any validation or output.

use crate::error::{FileError, Result};
use crate::recipient::Recipient;
use crate::record::{AccountType, NoticeType, PaymentRecord, PaymentType};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;
use std::io::Read;

/// Accepted input date formats.
const INPUT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Raw payment row as read from CSV.
///
/// Every column is required but may be empty, except the three code
/// columns which fall back to bank account, transfer and attached notice.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRow {
    pub processing_date: String,
    pub amount: String,
    pub sender_account_number: String,
    pub registration_number: String,
    pub account_number: String,
    pub name: String,
    pub address: String,
    pub address2: String,
    pub zip_code: String,
    pub city: String,
    pub entry_text: String,
    pub reference: String,
    pub notice: String,

    #[serde(default)]
    pub account_type: Option<AccountType>,

    #[serde(default)]
    pub payment_type: Option<PaymentType>,

    #[serde(default)]
    pub notice_type: Option<NoticeType>,
}

impl PaymentRow {
    /// Builds a typed payment, failing on a bad date or amount.
    ///
    /// `row` is only used for error reporting.
    pub fn into_record(self, row: usize) -> Result<PaymentRecord> {
        let processing_date = parse_date(&self.processing_date).ok_or_else(|| {
            FileError::Construction {
                row,
                field: "processing_date",
                message: format!("'{}' is not a date", self.processing_date),
            }
        })?;

        let amount = self
            .amount
            .trim()
            .parse::<i64>()
            .map_err(|e| FileError::Construction {
                row,
                field: "amount",
                message: format!("'{}' is not a whole number ({})", self.amount, e),
            })?;

        let recipient = Recipient {
            registration_number: self.registration_number,
            account_number: self.account_number,
            name: self.name,
            address: self.address,
            address2: self.address2,
            zip_code: self.zip_code,
            city: self.city,
        };

        Ok(
            PaymentRecord::new(processing_date, amount, self.sender_account_number, recipient)
                .with_entry_text(self.entry_text)
                .with_reference(self.reference)
                .with_notice(self.notice)
                .with_account_type(self.account_type.unwrap_or_default())
                .with_payment_type(self.payment_type.unwrap_or_default())
                .with_notice_type(self.notice_type.unwrap_or_default()),
        )
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Reads all payments from a CSV reader with a header row.
///
/// Stops at the first row that cannot be read or built.
pub fn read_payments<R: Read>(reader: R) -> Result<Vec<PaymentRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut payments = Vec::new();

    for (row_idx, result) in csv_reader.deserialize::<PaymentRow>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        let row = result.map_err(|e| {
            warn!("Row {}: CSV parse error: {}", row_num, e);
            e
        })?;
        let payment = row.into_record(row_num).map_err(|e| {
            warn!("Row {}: {}", row_num, e);
            e
        })?;

        debug!(
            "Row {}: Payment of {} to {}-{}",
            row_num,
            payment.amount,
            payment.recipient.registration_number,
            payment.recipient.account_number
        );
        payments.push(payment);
    }

    Ok(payments)
}
