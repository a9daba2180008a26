//! spendlog-domain
//!
//! Pure domain models (Expense, LedgerState). No I/O, no services,
//! no storage. Only data types and derived read helpers.

pub mod expense;
pub mod ledger;

pub use expense::*;
pub use ledger::*;
