//! Workbook import with row-level tolerance.
//!
//! The only hard failure is an unreadable document. Inside a readable
//! workbook everything is best effort: totals default to 0 when unparsable,
//! malformed expense rows are skipped without aborting the batch.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use tracing::{debug, warn};

use spendlog_core::LedgerError;
use spendlog_domain::{Expense, LedgerState};

use crate::timestamp::parse_timestamp;

/// Parsed content of an imported workbook, before it replaces ledger state.
#[derive(Debug, Clone, Default)]
pub struct ImportedLedger {
    pub budget: f64,
    pub total_expenses: f64,
    pub expenses: Vec<Expense>,
    pub skipped_rows: usize,
}

/// Reads a two-sheet workbook from raw bytes.
///
/// Fails with [`LedgerError::Import`] only when the bytes are not an
/// openable workbook or the expense sheet itself is unreadable.
pub fn import_workbook(bytes: &[u8]) -> Result<ImportedLedger, LedgerError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|err| LedgerError::Import(err.to_string()))?;

    let expense_rows = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(err)) => return Err(LedgerError::Import(err.to_string())),
        None => return Err(LedgerError::Import("workbook has no sheets".into())),
    };
    let details = match workbook.worksheet_range_at(1) {
        Some(Ok(range)) => Some(range),
        Some(Err(err)) => {
            warn!(%err, "budget details sheet unreadable, totals default to 0");
            None
        }
        None => {
            warn!("workbook has no budget details sheet, totals default to 0");
            None
        }
    };

    let mut imported = ImportedLedger::default();
    if let Some(details) = &details {
        imported.budget = detail_total(details, 1);
        imported.total_expenses = detail_total(details, 2);
    }

    // Row 0 is the header.
    for (index, row) in expense_rows.rows().enumerate().skip(1) {
        match parse_expense_row(row) {
            RowOutcome::Expense(expense) => imported.expenses.push(*expense),
            RowOutcome::Blank => {}
            RowOutcome::BadShape => {
                imported.skipped_rows += 1;
                debug!(row = index + 1, "skipping row without exactly 4 cells");
            }
            RowOutcome::Unparsable(reason) => {
                imported.skipped_rows += 1;
                warn!(row = index + 1, reason, "skipping malformed expense row");
            }
        }
    }
    Ok(imported)
}

/// Replaces the ledger's budget, totals, and expense log wholesale with the
/// imported content. The undo history is unaffected.
pub fn apply_import(state: &mut LedgerState, imported: ImportedLedger) {
    state.budget = imported.budget;
    state.total_expenses = imported.total_expenses;
    state.expenses = imported.expenses;
}

enum RowOutcome {
    Expense(Box<Expense>),
    Blank,
    BadShape,
    Unparsable(&'static str),
}

fn parse_expense_row(row: &[Data]) -> RowOutcome {
    let cells = trim_trailing_empty(row);
    if cells.is_empty() {
        return RowOutcome::Blank;
    }
    if cells.len() != 4 || cells.iter().any(|cell| matches!(cell, Data::Empty)) {
        return RowOutcome::BadShape;
    }
    let name = cell_text(&cells[0]);
    if name.is_empty() {
        return RowOutcome::BadShape;
    }
    let Some(amount) = cell_number(&cells[1]) else {
        return RowOutcome::Unparsable("amount is not a number");
    };
    let date = cell_text(&cells[2]);
    let time = cell_text(&cells[3]);
    match parse_timestamp(&date, &time) {
        Some(timestamp) => {
            RowOutcome::Expense(Box::new(Expense::new(name, None, amount, timestamp)))
        }
        None => RowOutcome::Unparsable("no date-time format matched"),
    }
}

fn detail_total(range: &Range<Data>, row: usize) -> f64 {
    range
        .rows()
        .nth(row)
        .and_then(|cells| cells.get(1))
        .and_then(cell_number)
        .unwrap_or(0.0)
}

fn trim_trailing_empty(row: &[Data]) -> &[Data] {
    let end = row
        .iter()
        .rposition(|cell| !matches!(cell, Data::Empty))
        .map_or(0, |index| index + 1);
    &row[..end]
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(value) => Some(*value),
        Data::Int(value) => Some(*value as f64),
        Data::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
