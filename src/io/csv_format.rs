//! CSV format handling for account fixtures and ledger output
//!
//! The CLI loads accounts (and optionally an existing ledger, for refund
//! history) from CSV and writes the updated accounts and ledger back out.
//! All functions here are pure over `io::Read`/`io::Write` for easy testing.
//!
//! Account columns: `id,user_id,remaining,status,payment_status`.
//! Ledger columns match the [`LedgerEntry`] fields, with monetary values at
//! two decimals and `date_action` as an RFC 3339 timestamp.

use std::io::{Read, Write};

use serde::Deserialize;

use crate::types::{Account, FeeFineError, FeeFineStatus, LedgerEntry, MonetaryValue};

/// Raw account row as read from CSV, before domain conversion
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountCsvRecord {
    pub id: String,
    pub user_id: String,
    pub remaining: String,
    pub status: String,
    pub payment_status: String,
}

/// Convert a raw CSV row into an `Account`
///
/// The remaining balance is normalized to two decimals on the way in, so
/// fixtures may carry long decimals the same way external callers do.
pub fn convert_account_record(record: AccountCsvRecord) -> Result<Account, FeeFineError> {
    let remaining: MonetaryValue = record
        .remaining
        .parse()
        .map_err(|_| FeeFineError::invalid_amount(&record.remaining))?;

    let status = match record.status.as_str() {
        "Open" => FeeFineStatus::Open,
        "Closed" => FeeFineStatus::Closed,
        other => {
            return Err(FeeFineError::Csv {
                line: None,
                message: format!("invalid account status '{}'", other),
            })
        }
    };

    Ok(Account {
        id: record.id,
        user_id: record.user_id,
        remaining,
        status,
        payment_status: record.payment_status,
    })
}

/// Read accounts from CSV
pub fn read_accounts_csv(input: impl Read) -> Result<Vec<Account>, FeeFineError> {
    let mut reader = csv::Reader::from_reader(input);

    reader
        .deserialize()
        .map(|record| convert_account_record(record?))
        .collect()
}

/// Write accounts to CSV
pub fn write_accounts_csv(
    accounts: &[Account],
    output: &mut dyn Write,
) -> Result<(), FeeFineError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["id", "user_id", "remaining", "status", "payment_status"])?;
    for account in accounts {
        writer.write_record([
            account.id.as_str(),
            account.user_id.as_str(),
            &account.remaining.to_string(),
            account.status.as_str(),
            account.payment_status.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

/// Read ledger entries from CSV
///
/// Ledger files are engine-written, so rows deserialize straight into
/// `LedgerEntry`; monetary fields are still normalized on the way in.
pub fn read_ledger_csv(input: impl Read) -> Result<Vec<LedgerEntry>, FeeFineError> {
    let mut reader = csv::Reader::from_reader(input);

    reader
        .deserialize()
        .map(|record| record.map_err(FeeFineError::from))
        .collect()
}

/// Write ledger entries to CSV
pub fn write_ledger_csv(
    entries: &[LedgerEntry],
    output: &mut dyn Write,
) -> Result<(), FeeFineError> {
    let mut writer = csv::Writer::from_writer(output);

    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn money(s: &str) -> MonetaryValue {
        s.parse().unwrap()
    }

    #[test]
    fn test_read_accounts_csv() {
        let input = "\
id,user_id,remaining,status,payment_status
acc-1,user-1,4.55,Open,Outstanding
acc-2,user-1,0.00,Closed,Paid fully
";

        let accounts = read_accounts_csv(input.as_bytes()).unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id, "acc-1");
        assert_eq!(accounts[0].remaining, money("4.55"));
        assert_eq!(accounts[0].status, FeeFineStatus::Open);
        assert_eq!(accounts[1].status, FeeFineStatus::Closed);
        assert_eq!(accounts[1].payment_status, "Paid fully");
    }

    #[test]
    fn test_read_normalizes_long_decimals() {
        let input = "\
id,user_id,remaining,status,payment_status
acc-1,user-1,1.235987654321,Open,Outstanding
";

        let accounts = read_accounts_csv(input.as_bytes()).unwrap();

        assert_eq!(accounts[0].remaining, money("1.24"));
    }

    #[rstest]
    #[case::bad_amount("acc-1,user-1,abc,Open,Outstanding")]
    #[case::bad_status("acc-1,user-1,1.00,Frozen,Outstanding")]
    fn test_read_rejects_invalid_rows(#[case] row: &str) {
        let input = format!("id,user_id,remaining,status,payment_status\n{}\n", row);

        assert!(read_accounts_csv(input.as_bytes()).is_err());
    }

    #[test]
    fn test_accounts_roundtrip() {
        let accounts = vec![
            Account::new("acc-1", "user-1", money("4.55")),
            Account::new("acc-2", "user-2", money("0.10")),
        ];

        let mut buffer = Vec::new();
        write_accounts_csv(&accounts, &mut buffer).unwrap();
        let reread = read_accounts_csv(buffer.as_slice()).unwrap();

        assert_eq!(reread, accounts);
    }

    #[test]
    fn test_written_amounts_always_carry_two_decimals() {
        let accounts = vec![Account::new("acc-1", "user-1", money("4.5"))];

        let mut buffer = Vec::new();
        write_accounts_csv(&accounts, &mut buffer).unwrap();
        let written = String::from_utf8(buffer).unwrap();

        assert!(written.contains("4.50"));
    }

    #[test]
    fn test_ledger_roundtrip() {
        let entries = vec![LedgerEntry {
            id: "entry-1".to_string(),
            account_id: "acc-1".to_string(),
            user_id: "user-1".to_string(),
            amount: money("1.23"),
            balance: money("3.32"),
            type_action: "Paid partially".to_string(),
            comments: Some("paid at desk".to_string()),
            payment_method: Some("cash".to_string()),
            notify: true,
            date_action: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            created_at: Some("sp-1".to_string()),
            source: Some("librarian".to_string()),
            transaction_information: None,
        }];

        let mut buffer = Vec::new();
        write_ledger_csv(&entries, &mut buffer).unwrap();
        let reread = read_ledger_csv(buffer.as_slice()).unwrap();

        assert_eq!(reread, entries);
    }
}
