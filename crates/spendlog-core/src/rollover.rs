//! Month-rollover scheduling.
//!
//! The ledger is reset at every calendar month boundary. The scheduler is a
//! single-shot timer that re-arms itself after firing; it lives outside the
//! store, which only exposes the reset operation it calls.

use chrono::{DateTime, Datelike, Months, NaiveTime, Utc};

use spendlog_domain::LedgerState;

use crate::ledger_service::LedgerService;

/// Tracks the next month boundary and performs the reset when it passes.
#[derive(Debug, Clone, Copy)]
pub struct MonthRollover {
    next_boundary: DateTime<Utc>,
}

impl MonthRollover {
    /// Arms the scheduler for the first instant of the month after `now`.
    pub fn armed_at(now: DateTime<Utc>) -> Self {
        Self {
            next_boundary: next_month_start(now),
        }
    }

    pub fn next_boundary(&self) -> DateTime<Utc> {
        self.next_boundary
    }

    pub fn due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_boundary
    }

    /// Resets the ledger if the boundary has passed, then re-arms for the
    /// following month. Returns whether a reset was performed.
    pub fn fire(&mut self, state: &mut LedgerState, now: DateTime<Utc>) -> bool {
        if !self.due(now) {
            return false;
        }
        LedgerService::reset(state);
        self.next_boundary = next_month_start(now);
        true
    }
}

fn next_month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    // Day 1 always exists, with_day(1) cannot fail for a valid date.
    let first_of_month = date.with_day(1).unwrap_or(date);
    let next = first_of_month + Months::new(1);
    next.and_time(NaiveTime::MIN).and_utc()
}
