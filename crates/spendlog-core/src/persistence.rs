//! Write-through persistence codec over a durable key-value store.
//!
//! Four fixed keys hold the full ledger: budget and expense totals as decimal
//! strings, the expense log and undo history as JSON arrays. [`save`] is
//! called after every mutating operation; [`load`] runs once at startup and
//! is best effort by contract, it never fails.

use spendlog_domain::{Expense, LedgerState};
use tracing::warn;

use crate::LedgerError;

pub const KEY_BUDGET: &str = "totalBudget";
pub const KEY_TOTAL_EXPENSES: &str = "totalExpenses";
pub const KEY_EXPENSE_LOG: &str = "expenseLog";
pub const KEY_UNDO_HISTORY: &str = "undoHistory";

/// Abstraction over durable string key-value backends.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError>;
    fn remove(&mut self, key: &str) -> Result<(), LedgerError>;
}

/// Serializes the full ledger state under the four fixed keys.
///
/// A rejected write (quota exceeded, I/O failure) surfaces as
/// [`LedgerError::Persistence`]; the caller reports it as a non-fatal notice.
pub fn save(store: &mut dyn KeyValueStore, state: &LedgerState) -> Result<(), LedgerError> {
    let expenses = encode_list(&state.expenses)?;
    let undo_history = encode_list(&state.undo_history)?;
    store.set(KEY_BUDGET, &state.budget.to_string())?;
    store.set(KEY_TOTAL_EXPENSES, &state.total_expenses.to_string())?;
    store.set(KEY_EXPENSE_LOG, &expenses)?;
    store.set(KEY_UNDO_HISTORY, &undo_history)?;
    Ok(())
}

/// Reads the four keys back into a ledger state, best effort.
///
/// Missing or unparsable numeric keys leave the value at 0, missing or
/// unparsable lists stay empty. Partial failures are logged, never raised.
pub fn load(store: &dyn KeyValueStore) -> LedgerState {
    LedgerState {
        budget: load_number(store, KEY_BUDGET),
        total_expenses: load_number(store, KEY_TOTAL_EXPENSES),
        expenses: load_list(store, KEY_EXPENSE_LOG),
        undo_history: load_list(store, KEY_UNDO_HISTORY),
    }
}

fn encode_list(expenses: &[Expense]) -> Result<String, LedgerError> {
    serde_json::to_string(expenses).map_err(|err| LedgerError::Persistence(err.to_string()))
}

fn load_number(store: &dyn KeyValueStore, key: &str) -> f64 {
    match store.get(key) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "stored number is unparsable, defaulting to 0");
            0.0
        }),
        Ok(None) => 0.0,
        Err(err) => {
            warn!(key, %err, "failed to read stored number, defaulting to 0");
            0.0
        }
    }
}

fn load_list(store: &dyn KeyValueStore, key: &str) -> Vec<Expense> {
    match store.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(key, %err, "stored list is unparsable, defaulting to empty");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!(key, %err, "failed to read stored list, defaulting to empty");
            Vec::new()
        }
    }
}
