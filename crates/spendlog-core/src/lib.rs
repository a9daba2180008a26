//! spendlog-core
//!
//! Business logic for the expense ledger: mutation operations, the
//! persistence codec contract, and the month-rollover scheduler.
//! Depends on spendlog-domain. No CLI, no terminal I/O, no direct
//! storage backends.

pub mod error;
pub mod ledger_service;
pub mod persistence;
pub mod rollover;
pub mod time;

pub use error::LedgerError;
pub use ledger_service::*;
pub use persistence::{KeyValueStore, KEY_BUDGET, KEY_EXPENSE_LOG, KEY_TOTAL_EXPENSES, KEY_UNDO_HISTORY};
pub use rollover::MonthRollover;
pub use time::{Clock, FixedClock, SystemClock};

#[cfg(test)]
mod tests;
