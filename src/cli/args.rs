use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::types::{ActionType, BulkActionRequest};

/// Apply one bulk monetary action to fee/fine accounts loaded from CSV
#[derive(Parser, Debug)]
#[command(name = "feefine-engine")]
#[command(about = "Apply bulk pay/waive/transfer/refund/cancel actions to fee/fine accounts", long_about = None)]
pub struct CliArgs {
    /// Input CSV file with the current account states
    #[arg(value_name = "ACCOUNTS", help = "Path to the accounts CSV file")]
    pub accounts_file: PathBuf,

    /// The action to apply
    #[arg(long = "action", value_name = "ACTION")]
    pub action: ActionArg,

    /// Requested total amount, distributed across the target accounts
    #[arg(long = "amount", value_name = "AMOUNT")]
    pub amount: String,

    /// Comma-separated target account identifiers
    #[arg(
        long = "accounts",
        value_name = "IDS",
        value_delimiter = ',',
        required = true
    )]
    pub account_ids: Vec<String>,

    /// Existing ledger CSV (provides refund history)
    #[arg(long = "ledger", value_name = "FILE")]
    pub ledger_file: Option<PathBuf>,

    /// Where to write the ledger (existing plus created entries)
    #[arg(long = "ledger-out", value_name = "FILE")]
    pub ledger_out: Option<PathBuf>,

    /// Only check whether the action would be allowed; mutate nothing
    #[arg(long = "check")]
    pub check: bool,

    /// Free-text comment copied to every created ledger entry
    #[arg(long = "comments", value_name = "TEXT")]
    pub comments: Option<String>,

    /// Dispatch a patron notice per created ledger entry
    #[arg(long = "notify")]
    pub notify: bool,

    /// Payment method recorded on created entries
    #[arg(long = "payment-method", value_name = "METHOD")]
    pub payment_method: Option<String>,

    /// Service point label recorded on created entries
    #[arg(long = "service-point", value_name = "LABEL")]
    pub service_point: Option<String>,

    /// Acting user recorded on created entries
    #[arg(long = "user-name", value_name = "NAME")]
    pub user_name: Option<String>,
}

/// Action types selectable on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ActionArg {
    Pay,
    Waive,
    Transfer,
    Refund,
    Cancel,
}

impl From<ActionArg> for ActionType {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Pay => ActionType::Pay,
            ActionArg::Waive => ActionType::Waive,
            ActionArg::Transfer => ActionType::Transfer,
            ActionArg::Refund => ActionType::Refund,
            ActionArg::Cancel => ActionType::Cancel,
        }
    }
}

impl CliArgs {
    /// Build the bulk action request described by these arguments
    pub fn to_request(&self) -> BulkActionRequest {
        BulkActionRequest {
            account_ids: self.account_ids.clone(),
            amount: self.amount.clone(),
            comments: self.comments.clone(),
            notify_patron: self.notify,
            payment_method: self.payment_method.clone(),
            transaction_info: None,
            service_point_id: self.service_point.clone(),
            user_name: self.user_name.clone(),
        }
    }
}

/// Parse command-line arguments
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
