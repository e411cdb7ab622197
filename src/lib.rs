//! # Bank Payment File
//!
//! Encoder for a bank's fixed-layout batch-payment file format: a start
//! record, one line per domestic payment and an end record with the payment
//! count and total.
//!
//! ## Format
//!
//! - **Fixed widths**: every field is padded to its exact width; nothing is
//!   truncated, so records must pass [`validate_payment`] first
//! - **Quoted CSV**: every field in double quotes, comma-separated, no escaping
//! - **CRLF** after every record, including the last
//! - **Windows-1252** output; unmappable characters are an error
//!
//! ## Example
//!
//! ```
//! use bank_payment_file::{PaymentFile, PaymentRecord, Recipient};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2015, 9, 17).unwrap();
//! let recipient = Recipient::new("6666", "9876543210")
//!     .with_name("Modtager")
//!     .with_city("5000", "Odense");
//! let payment = PaymentRecord::new(date, 747, "000000123456789", recipient)
//!     .with_entry_text("posteringstekst")
//!     .with_notice("Faktura 1001\nTak for handlen");
//!
//! let file = PaymentFile::with_payments(date, vec![payment]);
//! let bytes = file.to_bytes().unwrap();
//! assert!(bytes.ends_with(b"\r\n"));
//! ```

pub mod error;
pub mod file;
pub mod format;
pub mod input;
pub mod notice;
pub mod recipient;
pub mod record;
pub mod validate;
pub mod writer;

pub use error::{FileError, Result};
pub use file::PaymentFile;
pub use recipient::Recipient;
pub use record::{
    AccountType, NoticeType, PaymentEndRecord, PaymentRecord, PaymentStartRecord, PaymentType,
    Record,
};
pub use validate::{validate_payment, validate_recipient, Violation, ViolationKind};
pub use writer::{format_records, stream_records, write_fields, write_records};
