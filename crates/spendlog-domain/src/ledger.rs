//! Aggregate ledger state: budget, expense log, undo history.

use serde::{Deserialize, Serialize};

use crate::expense::Expense;

/// In-memory record of one user's budget, expenses, and undo/redo history.
///
/// `total_expenses` is maintained incrementally by the services mutating this
/// state; it must always match the sum of `expenses` amounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerState {
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub total_expenses: f64,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub undo_history: Vec<Expense>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived read: budget minus logged expenses. Negative when overspent.
    pub fn remaining_budget(&self) -> f64 {
        self.budget - self.total_expenses
    }

    /// Recomputed sum of the expense log, for consistency checks only.
    pub fn sum_of_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}
