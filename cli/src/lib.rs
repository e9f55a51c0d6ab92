//! Command-line client for the Candlepin entitlement service.
//!
//! `candlepin <command...> [--flag value ...]`: the dispatcher resolves the
//! longest registered command name from the non-flag arguments, hands the
//! rest to that command's clap schema, and prints the binding's result as
//! JSON.

pub mod args;
pub mod commands;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod settings;

pub use commands::{execute, CommandKind, Invocation, ParsedCommand};
pub use dispatch::{CommandEntry, Dispatcher, Registry};
pub use error::{CliError, CliResult};
pub use settings::Settings;
