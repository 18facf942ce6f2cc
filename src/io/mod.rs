//! I/O module
//!
//! CSV reading and writing for the CLI surface:
//! - `csv_format` - account and ledger CSV handling (pure functions)

pub mod csv_format;

pub use csv_format::{
    read_accounts_csv, read_ledger_csv, write_accounts_csv, write_ledger_csv,
};
