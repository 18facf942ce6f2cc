//! CLI arguments parsing
//!
//! # Components
//!
//! - `args` - command-line argument definitions and parsing

pub mod args;

pub use args::{parse_args, ActionArg, CliArgs};
