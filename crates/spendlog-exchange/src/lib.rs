//! spendlog-exchange
//!
//! Spreadsheet exchange codec: exports ledger state to a two-sheet xlsx
//! workbook and imports such a workbook back, with row-level tolerance for
//! loosely formatted external data.

pub mod export;
pub mod import;
pub mod timestamp;

pub use export::{export_workbook, BUDGET_SHEET, BUDGET_TITLE, EXPENSES_SHEET, EXPENSE_HEADER};
pub use import::{apply_import, import_workbook, ImportedLedger};
pub use timestamp::{parse_datetime, parse_timestamp};
