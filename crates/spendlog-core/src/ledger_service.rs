//! Mutation operations over [`LedgerState`].
//!
//! Expense logging is a two-phase operation: [`LedgerService::propose_expense`]
//! validates the draft and reports whether committing would exceed the budget,
//! then the caller either commits the returned [`PendingExpense`] or discards
//! it. The decision point (the budget-exceeded confirmation) therefore lives
//! with the presentation layer, not inside the store.

use chrono::{DateTime, Utc};

use spendlog_domain::{Expense, LedgerState};

use crate::{time::Clock, LedgerError};

/// User-entered fields for a new expense, before validation.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub name: String,
    pub category: Option<String>,
    pub amount: f64,
    /// Defaults to the clock's current time when absent.
    pub timestamp: Option<DateTime<Utc>>,
}

impl ExpenseDraft {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            category: None,
            amount,
            timestamp: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A validated expense awaiting the caller's commit decision.
///
/// Dropping the token discards the proposal without touching state.
#[derive(Debug)]
pub struct PendingExpense {
    expense: Expense,
    would_exceed_budget: bool,
}

impl PendingExpense {
    pub fn expense(&self) -> &Expense {
        &self.expense
    }

    /// True when committing would push total expenses past the budget.
    /// The caller must obtain user confirmation before committing.
    pub fn would_exceed_budget(&self) -> bool {
        self.would_exceed_budget
    }
}

/// Stateless operations over a [`LedgerState`] instance.
pub struct LedgerService;

impl LedgerService {
    /// Adds `amount` to the current budget. Setting a budget is cumulative,
    /// not a replacement.
    pub fn set_budget(state: &mut LedgerState, amount: f64) -> Result<(), LedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidInput(
                "budget amount must be a positive number".into(),
            ));
        }
        state.budget += amount;
        Ok(())
    }

    /// Validates a draft and stages it for commit. No state is changed.
    pub fn propose_expense(
        state: &LedgerState,
        draft: ExpenseDraft,
        clock: &dyn Clock,
    ) -> Result<PendingExpense, LedgerError> {
        if state.budget <= 0.0 {
            return Err(LedgerError::InvalidInput(
                "set a budget before logging expenses".into(),
            ));
        }
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::InvalidInput(
                "expense purpose must not be empty".into(),
            ));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(LedgerError::InvalidInput(
                "expense amount must be a positive number".into(),
            ));
        }
        let timestamp = draft.timestamp.unwrap_or_else(|| clock.now());
        let expense = Expense::new(name, draft.category, draft.amount, timestamp);
        let would_exceed_budget = state.total_expenses + expense.amount > state.budget;
        Ok(PendingExpense {
            expense,
            would_exceed_budget,
        })
    }

    /// Appends the staged expense to the log. Logging new activity clears the
    /// undo history, so redo is only valid immediately after an undo.
    pub fn commit_expense(state: &mut LedgerState, pending: PendingExpense) -> Expense {
        let expense = pending.expense;
        state.total_expenses += expense.amount;
        state.expenses.push(expense.clone());
        state.undo_history.clear();
        expense
    }

    /// Drops the staged expense; the ledger is untouched.
    pub fn discard_expense(pending: PendingExpense) {
        drop(pending);
    }

    /// Removes the most recently logged expense and parks it on the undo
    /// history for a later redo. Returns the removed expense.
    pub fn undo(state: &mut LedgerState) -> Result<Expense, LedgerError> {
        let expense = state.expenses.pop().ok_or(LedgerError::NothingToUndo)?;
        state.total_expenses -= expense.amount;
        state.undo_history.push(expense.clone());
        Ok(expense)
    }

    /// Re-appends the most recently undone expense at the end of the log.
    /// Redo does not restore the original position relative to expenses
    /// logged after the undo.
    pub fn redo(state: &mut LedgerState) -> Result<Expense, LedgerError> {
        let expense = state.undo_history.pop().ok_or(LedgerError::NothingToRedo)?;
        state.total_expenses += expense.amount;
        state.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Zeroes the budget and totals and clears the expense log. The undo
    /// history is deliberately left in place (observed source behavior).
    /// Confirmation is the caller's responsibility.
    pub fn reset(state: &mut LedgerState) {
        state.budget = 0.0;
        state.total_expenses = 0.0;
        state.expenses.clear();
    }

    /// Derived read: budget minus total expenses. May be negative, overspend
    /// is only gated by the confirmation checkpoint at log time.
    pub fn remaining_budget(state: &LedgerState) -> f64 {
        state.remaining_budget()
    }
}
