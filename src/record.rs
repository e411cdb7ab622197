//! Record types that make up a payment file.
//!
//! A file is a start record, zero or more payment records and an end record.
//! Each record renders to a fixed, ordered list of field values; the writer
//! takes care of quoting, separators and encoding.

use crate::error::{FileError, Result};
use crate::format::{
    blank, format_amount, format_date, format_fixed_left, format_numeric_padded,
    format_zero_padded,
};
use crate::notice::{chunk_notice, NOTICE_LINE_WIDTH};
use crate::recipient::{Recipient, ADDRESS_LINE_WIDTH};
use chrono::NaiveDate;
use serde::Deserialize;

/// Record type tag of the start record.
pub const PAYMENT_START: &str = "IB000000000000";

/// Record type tag of the end record.
pub const PAYMENT_END: &str = "IB999999999999";

/// Record type tag of a domestic payment.
pub const DOMESTIC_PAYMENT: &str = "IB030202000005";

/// Fixed sub-type written after the payment type tag.
pub const PAYMENT_SUB_TYPE: &str = "0001";

/// The only supported currency.
pub const CURRENCY_DKK: &str = "DKK";

/// Digits in an amount field, excluding the trailing sign.
pub const AMOUNT_WIDTH: usize = 13;

/// Largest magnitude an amount field can hold.
pub const MAX_AMOUNT: i64 = 9_999_999_999_999;

/// Digits in the end record's transaction count.
pub const COUNT_WIDTH: usize = 6;

/// Width of the sender account number after zero-padding.
pub const SENDER_ACCOUNT_LEN: usize = 15;

/// Width of the entry text and reference fields.
pub const TEXT_FIELD_WIDTH: usize = 35;

/// A single line of a payment file.
pub trait Record {
    /// The 14-character tag identifying the record type.
    fn record_type(&self) -> &'static str;

    /// The record's field values, in wire order, unquoted and unencoded.
    fn fields(&self) -> Vec<String>;
}

/// Kind of account the recipient holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AccountType {
    #[default]
    #[serde(rename = "1")]
    Bank,
    #[serde(rename = "2")]
    Giro,
}

impl AccountType {
    pub fn code(self) -> &'static str {
        match self {
            AccountType::Bank => "1",
            AccountType::Giro => "2",
        }
    }
}

/// How the payment is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PaymentType {
    #[default]
    #[serde(rename = "1")]
    Transfer,
    #[serde(rename = "2")]
    Check,
}

impl PaymentType {
    pub fn code(self) -> &'static str {
        match self {
            PaymentType::Transfer => "1",
            PaymentType::Check => "2",
        }
    }
}

/// How the notice text reaches the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum NoticeType {
    #[serde(rename = "0")]
    None,
    #[default]
    #[serde(rename = "1")]
    Attached,
    #[serde(rename = "2")]
    Separate,
}

impl NoticeType {
    pub fn code(self) -> &'static str {
        match self {
            NoticeType::None => "0",
            NoticeType::Attached => "1",
            NoticeType::Separate => "2",
        }
    }
}

/// Marks the beginning of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentStartRecord {
    pub creation_date: NaiveDate,
}

impl PaymentStartRecord {
    pub fn new(creation_date: NaiveDate) -> Self {
        PaymentStartRecord { creation_date }
    }
}

impl Record for PaymentStartRecord {
    fn record_type(&self) -> &'static str {
        PAYMENT_START
    }

    fn fields(&self) -> Vec<String> {
        vec![
            PAYMENT_START.to_string(),
            format_date(self.creation_date),
            blank(90),
            blank(255),
            blank(255),
            blank(255),
        ]
    }
}

/// Marks the end of a file and summarizes the payments in it.
///
/// The payments are borrowed; they are only used for the count and total.
/// The total is computed once, on construction.
#[derive(Debug, Clone, Copy)]
pub struct PaymentEndRecord<'a> {
    creation_date: NaiveDate,
    transactions: &'a [PaymentRecord],
    total_amount: i64,
}

impl<'a> PaymentEndRecord<'a> {
    /// Fails if the summed amount does not fit the amount field.
    pub fn new(creation_date: NaiveDate, transactions: &'a [PaymentRecord]) -> Result<Self> {
        let total_amount = transactions
            .iter()
            .try_fold(0i64, |total, payment| total.checked_add(payment.amount))
            .filter(|total| total.unsigned_abs() <= MAX_AMOUNT.unsigned_abs())
            .ok_or_else(|| FileError::TotalOutOfRange {
                count: transactions.len(),
                total: transactions.iter().map(|p| i128::from(p.amount)).sum(),
            })?;

        Ok(PaymentEndRecord {
            creation_date,
            transactions,
            total_amount,
        })
    }

    pub fn creation_date(&self) -> NaiveDate {
        self.creation_date
    }

    pub fn transactions(&self) -> &'a [PaymentRecord] {
        self.transactions
    }

    /// Sum of all payment amounts, zero when there are none.
    pub fn total_amount(&self) -> i64 {
        self.total_amount
    }
}

impl Record for PaymentEndRecord<'_> {
    fn record_type(&self) -> &'static str {
        PAYMENT_END
    }

    fn fields(&self) -> Vec<String> {
        vec![
            PAYMENT_END.to_string(),
            format_date(self.creation_date),
            format_numeric_padded(self.transactions.len() as u64, COUNT_WIDTH),
            format_amount(self.total_amount(), AMOUNT_WIDTH),
            blank(64),
            blank(255),
            blank(255),
            blank(255),
        ]
    }
}

/// A single domestic payment.
///
/// Built with [`PaymentRecord::new`] and the `with_*` setters. Lengths are
/// not checked on construction; run [`crate::validate::validate_payment`]
/// before writing a record to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub processing_date: NaiveDate,

    /// Whole amount; the sign selects the trailing sign character.
    pub amount: i64,

    /// Up to 15 characters, zero-padded on output
    pub sender_account_number: String,

    pub entry_text: String,
    pub reference: String,

    /// Free text, at most 9 lines of 35 characters
    pub notice: String,

    pub recipient: Recipient,
    pub account_type: AccountType,
    pub payment_type: PaymentType,
    pub notice_type: NoticeType,
}

impl PaymentRecord {
    pub fn new(
        processing_date: NaiveDate,
        amount: i64,
        sender_account_number: impl Into<String>,
        recipient: Recipient,
    ) -> Self {
        PaymentRecord {
            processing_date,
            amount,
            sender_account_number: sender_account_number.into(),
            entry_text: String::new(),
            reference: String::new(),
            notice: String::new(),
            recipient,
            account_type: AccountType::default(),
            payment_type: PaymentType::default(),
            notice_type: NoticeType::default(),
        }
    }

    pub fn with_entry_text(mut self, entry_text: impl Into<String>) -> Self {
        self.entry_text = entry_text.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = notice.into();
        self
    }

    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    pub fn with_payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = payment_type;
        self
    }

    pub fn with_notice_type(mut self, notice_type: NoticeType) -> Self {
        self.notice_type = notice_type;
        self
    }

    /// The notice split into wire chunks, see [`chunk_notice`].
    pub fn notice_chunks(&self) -> Vec<String> {
        chunk_notice(&self.notice)
    }
}

impl Record for PaymentRecord {
    fn record_type(&self) -> &'static str {
        DOMESTIC_PAYMENT
    }

    fn fields(&self) -> Vec<String> {
        let recipient = &self.recipient;

        let mut fields = vec![
            DOMESTIC_PAYMENT.to_string(),
            PAYMENT_SUB_TYPE.to_string(),
            format_date(self.processing_date),
            format_amount(self.amount, AMOUNT_WIDTH),
            CURRENCY_DKK.to_string(),
            self.account_type.code().to_string(),
            format_zero_padded(&self.sender_account_number, SENDER_ACCOUNT_LEN),
            self.payment_type.code().to_string(),
            recipient.registration_number.clone(),
            recipient.account_number.clone(),
            self.notice_type.code().to_string(),
            format_fixed_left(&self.entry_text, TEXT_FIELD_WIDTH),
            format_fixed_left(&recipient.name, ADDRESS_LINE_WIDTH),
            format_fixed_left(&recipient.address, ADDRESS_LINE_WIDTH),
            format_fixed_left(&recipient.address2, ADDRESS_LINE_WIDTH),
            recipient.zip_code.clone(),
            format_fixed_left(&recipient.city, ADDRESS_LINE_WIDTH),
            format_fixed_left(&self.reference, TEXT_FIELD_WIDTH),
        ];

        fields.extend(
            self.notice_chunks()
                .iter()
                .map(|chunk| format_fixed_left(chunk, NOTICE_LINE_WIDTH)),
        );

        fields.push(blank(1));
        fields.push(blank(215));
        fields
    }
}
