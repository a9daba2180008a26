use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use spendlog_domain::{LedgerState, DEFAULT_CATEGORY};

use crate::{
    ledger_service::{ExpenseDraft, LedgerService},
    persistence::{self, KeyValueStore, KEY_BUDGET, KEY_EXPENSE_LOG},
    time::FixedClock,
    LedgerError,
};

fn clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 0)
            .single()
            .expect("valid date"),
    )
}

fn funded_state(budget: f64) -> LedgerState {
    let mut state = LedgerState::new();
    LedgerService::set_budget(&mut state, budget).expect("set budget");
    state
}

fn log(state: &mut LedgerState, name: &str, amount: f64) {
    let pending = LedgerService::propose_expense(state, ExpenseDraft::new(name, amount), &clock())
        .expect("propose");
    LedgerService::commit_expense(state, pending);
}

#[test]
fn set_budget_is_cumulative() {
    let mut state = LedgerState::new();
    LedgerService::set_budget(&mut state, 100.0).expect("first");
    LedgerService::set_budget(&mut state, 50.0).expect("second");
    assert_eq!(state.budget, 150.0);
}

#[test]
fn set_budget_rejects_non_positive_and_non_finite() {
    let mut state = LedgerState::new();
    for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let err = LedgerService::set_budget(&mut state, bad).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }
    assert_eq!(state.budget, 0.0);
}

#[test]
fn logging_without_budget_fails_and_leaves_state_unchanged() {
    let state = LedgerState::new();
    let err = LedgerService::propose_expense(&state, ExpenseDraft::new("Lunch", 5.0), &clock())
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert!(state.expenses.is_empty());
    assert_eq!(state.total_expenses, 0.0);
}

#[test]
fn propose_rejects_blank_name_and_bad_amount() {
    let state = funded_state(100.0);
    for draft in [
        ExpenseDraft::new("   ", 5.0),
        ExpenseDraft::new("Lunch", 0.0),
        ExpenseDraft::new("Lunch", -5.0),
        ExpenseDraft::new("Lunch", f64::NAN),
    ] {
        let err = LedgerService::propose_expense(&state, draft, &clock()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }
}

#[test]
fn committed_totals_match_sum_of_amounts() {
    let mut state = funded_state(500.0);
    log(&mut state, "Lunch", 40.0);
    log(&mut state, "Dinner", 80.0);
    log(&mut state, "Coffee", 3.5);
    assert_eq!(state.total_expenses, 123.5);
    assert_eq!(state.total_expenses, state.sum_of_expenses());
}

#[test]
fn overspend_is_flagged_but_commit_is_allowed() {
    let mut state = funded_state(100.0);
    log(&mut state, "Lunch", 40.0);

    let pending =
        LedgerService::propose_expense(&state, ExpenseDraft::new("Dinner", 80.0), &clock())
            .expect("propose");
    assert!(pending.would_exceed_budget());

    LedgerService::commit_expense(&mut state, pending);
    assert_eq!(state.total_expenses, 120.0);
    assert_eq!(state.remaining_budget(), -20.0);
}

#[test]
fn discarded_proposal_is_a_no_op() {
    let mut state = funded_state(100.0);
    let before = state.clone();
    let pending =
        LedgerService::propose_expense(&state, ExpenseDraft::new("Dinner", 200.0), &clock())
            .expect("propose");
    LedgerService::discard_expense(pending);
    assert_eq!(state, before);
    // Declining the confirmation must not consume the budget either.
    log(&mut state, "Lunch", 10.0);
    assert_eq!(state.total_expenses, 10.0);
}

#[test]
fn defaults_apply_to_category_and_timestamp() {
    let state = funded_state(100.0);
    let pending =
        LedgerService::propose_expense(&state, ExpenseDraft::new("Lunch", 5.0), &clock())
            .expect("propose");
    assert_eq!(pending.expense().category, DEFAULT_CATEGORY);
    assert_eq!(pending.expense().timestamp, clock().0);
}

#[test]
fn undo_then_redo_restores_pre_undo_state() {
    let mut state = funded_state(500.0);
    log(&mut state, "Lunch", 40.0);
    log(&mut state, "Dinner", 80.0);
    let before = state.clone();

    let undone = LedgerService::undo(&mut state).expect("undo");
    assert_eq!(undone.name, "Dinner");
    assert_eq!(state.total_expenses, 40.0);
    assert_eq!(state.undo_history.len(), 1);

    LedgerService::redo(&mut state).expect("redo");
    assert_eq!(state, before);
}

#[test]
fn undo_on_empty_log_fails_without_mutation() {
    let mut state = funded_state(100.0);
    let before = state.clone();
    let err = LedgerService::undo(&mut state).unwrap_err();
    assert!(matches!(err, LedgerError::NothingToUndo));
    assert_eq!(state, before);
}

#[test]
fn redo_with_empty_history_fails() {
    let mut state = funded_state(100.0);
    let err = LedgerService::redo(&mut state).unwrap_err();
    assert!(matches!(err, LedgerError::NothingToRedo));
}

#[test]
fn logging_after_undo_clears_redo_history() {
    let mut state = funded_state(500.0);
    log(&mut state, "Lunch", 40.0);
    LedgerService::undo(&mut state).expect("undo");
    assert_eq!(state.undo_history.len(), 1);

    log(&mut state, "Coffee", 3.0);
    assert!(state.undo_history.is_empty());
    assert!(matches!(
        LedgerService::redo(&mut state),
        Err(LedgerError::NothingToRedo)
    ));
}

#[test]
fn redo_appends_at_end_of_log() {
    let mut state = funded_state(500.0);
    log(&mut state, "First", 10.0);
    log(&mut state, "Second", 20.0);
    LedgerService::undo(&mut state).expect("undo second");
    LedgerService::undo(&mut state).expect("undo first");

    LedgerService::redo(&mut state).expect("redo first");
    LedgerService::redo(&mut state).expect("redo second");
    let names: Vec<&str> = state.expenses.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["First", "Second"]);
}

#[test]
fn reset_clears_everything_but_undo_history() {
    let mut state = funded_state(500.0);
    log(&mut state, "Lunch", 40.0);
    LedgerService::undo(&mut state).expect("undo");

    LedgerService::reset(&mut state);
    assert_eq!(state.budget, 0.0);
    assert_eq!(state.total_expenses, 0.0);
    assert!(state.expenses.is_empty());
    assert_eq!(state.undo_history.len(), 1);
}

// Minimal in-memory backend for codec tests; real backends live in
// spendlog-storage-kv.
#[derive(Default)]
struct MapStore(HashMap<String, String>);

impl KeyValueStore for MapStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), LedgerError> {
        self.0.remove(key);
        Ok(())
    }
}

#[test]
fn persistence_round_trip_reproduces_state() {
    let mut state = funded_state(150.0);
    log(&mut state, "Lunch", 12.34);
    LedgerService::undo(&mut state).expect("undo");
    log(&mut state, "Dinner", 56.78);

    let mut store = MapStore::default();
    persistence::save(&mut store, &state).expect("save");
    assert_eq!(persistence::load(&store), state);
}

#[test]
fn load_defaults_unparsable_fields() {
    let mut store = MapStore::default();
    store.set(KEY_BUDGET, "not a number").expect("set");
    store.set(KEY_EXPENSE_LOG, "{broken json").expect("set");

    let state = persistence::load(&store);
    assert_eq!(state.budget, 0.0);
    assert_eq!(state.total_expenses, 0.0);
    assert!(state.expenses.is_empty());
    assert!(state.undo_history.is_empty());
}

#[test]
fn load_of_empty_store_yields_default_state() {
    assert_eq!(persistence::load(&MapStore::default()), LedgerState::new());
}
