//! Ledger export to a two-sheet xlsx workbook.
//!
//! Sheet order and header text are part of the exchange contract; column
//! widths are cosmetic only.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use spendlog_core::LedgerError;
use spendlog_domain::LedgerState;

pub const EXPENSES_SHEET: &str = "Expenses";
pub const BUDGET_SHEET: &str = "Budget Details";
pub const BUDGET_TITLE: &str = "Current Budget Details";
pub const EXPENSE_HEADER: [&str; 4] = ["Purpose", "Amount", "Date", "Time"];

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Serializes the ledger into xlsx bytes. Export of a valid in-memory state
/// is expected to always succeed; writer failures are still surfaced.
pub fn export_workbook(state: &LedgerState) -> Result<Vec<u8>, LedgerError> {
    build_workbook(state).map_err(|err| LedgerError::Export(err.to_string()))
}

fn build_workbook(state: &LedgerState) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let amount_format = Format::new().set_num_format("0.00");

    let expenses = workbook.add_worksheet().set_name(EXPENSES_SHEET)?;
    for (col, header) in EXPENSE_HEADER.iter().enumerate() {
        expenses.write_string(0, col as u16, *header)?;
    }
    for (index, expense) in state.expenses.iter().enumerate() {
        let row = index as u32 + 1;
        expenses.write_string(row, 0, &expense.name)?;
        expenses.write_number_with_format(row, 1, round2(expense.amount), &amount_format)?;
        expenses.write_string(row, 2, expense.timestamp.format(DATE_FORMAT).to_string())?;
        expenses.write_string(row, 3, expense.timestamp.format(TIME_FORMAT).to_string())?;
    }
    expenses.set_column_width(0, 28.0)?;
    expenses.set_column_width(1, 12.0)?;
    expenses.set_column_width(2, 12.0)?;
    expenses.set_column_width(3, 10.0)?;

    let details = workbook.add_worksheet().set_name(BUDGET_SHEET)?;
    details.write_string(0, 0, BUDGET_TITLE)?;
    details.write_string(1, 0, "Total Budget")?;
    details.write_number_with_format(1, 1, round2(state.budget), &amount_format)?;
    details.write_string(2, 0, "Total Expenses")?;
    details.write_number_with_format(2, 1, round2(state.total_expenses), &amount_format)?;
    details.write_string(3, 0, "Remaining Budget")?;
    details.write_number_with_format(3, 1, round2(state.remaining_budget()), &amount_format)?;
    details.set_column_width(0, 22.0)?;

    workbook.save_to_buffer()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
