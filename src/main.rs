//! Payment File CLI
//!
//! Reads payments from a CSV file and writes the bank payment file to
//! stdout as Windows-1252.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- payments.csv 2015-09-17 > payments.txt
//! ```
//!
//! The creation date defaults to today.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use bank_payment_file::input::read_payments;
use bank_payment_file::{FileError, PaymentFile, Result};
use chrono::{Local, NaiveDate};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(FileError::MissingArgument);
    }

    let creation_date = match args.get(2) {
        Some(arg) => NaiveDate::parse_from_str(arg, "%Y-%m-%d").map_err(|_| {
            FileError::InvalidArgument(format!("creation date '{}' is not YYYY-MM-DD", arg))
        })?,
        None => Local::now().date_naive(),
    };

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let payments = read_payments(reader)?;
    let bytes = PaymentFile::with_payments(creation_date, payments).to_bytes()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(&bytes)?;
    handle.flush()?;

    Ok(())
}
