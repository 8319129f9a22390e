//! Per-entity stores shadowing the remote tables.
//!
//! Each store keeps the last fetched list together with a phase and an
//! optional error. Refreshes replace the whole list; a failed refresh keeps
//! the previous items so consumers can keep rendering last-known-good data.
//! Consumers subscribe to a change counter and recompute their aggregates
//! when it ticks.

use std::sync::{PoisonError, RwLock};

use tokio::sync::watch;

use crate::error::{AppError, Result};

pub mod budgets;
pub mod categories;
pub mod goals;
pub mod transactions;

pub use budgets::BudgetStore;
pub use categories::CategoryStore;
pub use goals::GoalStore;
pub use transactions::TransactionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Never fetched.
    Idle,
    /// A fetch is in flight; items hold the previous list.
    Loading,
    Ready,
    /// The last fetch failed; items hold the last successful list.
    Error,
}

/// Point-in-time copy of a store's list state.
#[derive(Clone, Debug)]
pub struct ListSnapshot<T> {
    pub phase: Phase,
    pub items: Vec<T>,
    pub error: Option<String>,
}

struct Inner<T> {
    phase: Phase,
    items: Vec<T>,
    error: Option<String>,
    generation: u64,
}

/// Shared list container behind every entity store.
///
/// Every refresh is tagged with a generation; a completion whose generation
/// is no longer current is discarded, so a slow stale response can never
/// overwrite data from a fresher fetch.
pub struct ListState<T> {
    inner: RwLock<Inner<T>>,
    changes: watch::Sender<u64>,
}

impl<T: Clone> ListState<T> {
    fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: RwLock::new(Inner {
                phase: Phase::Idle,
                items: Vec::new(),
                error: None,
                generation: 0,
            }),
            changes,
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        ListSnapshot {
            phase: inner.phase,
            items: inner.items.clone(),
            error: inner.error.clone(),
        }
    }

    /// Receiver ticking once per applied change. The initial value is
    /// already seen, so `changed().await` resolves on the next change only.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn begin(&self) -> u64 {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.phase = Phase::Loading;
        inner.generation += 1;
        inner.generation
    }

    fn finish(&self, generation: u64, fetched: Result<Vec<T>>) -> Result<()> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.generation != generation {
            tracing::debug!(generation, current = inner.generation, "stale fetch discarded");
            return Ok(());
        }
        match fetched {
            Ok(items) => {
                inner.items = items;
                inner.phase = Phase::Ready;
                inner.error = None;
                drop(inner);
                self.notify();
                Ok(())
            }
            Err(err) => {
                inner.phase = Phase::Error;
                inner.error = Some(err.to_string());
                drop(inner);
                self.notify();
                Err(err)
            }
        }
    }

    fn notify(&self) {
        self.changes.send_modify(|tick| *tick += 1);
    }
}

pub(crate) fn ensure_positive(amount_minor: i64, what: &str) -> Result<()> {
    if amount_minor <= 0 {
        return Err(AppError::Validation(format!(
            "{what} must be a positive amount"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle_and_empty() {
        let state: ListState<i64> = ListState::new();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.error, None);
    }

    #[test]
    fn successful_fetch_replaces_items() {
        let state = ListState::new();
        let generation = state.begin();
        assert_eq!(state.snapshot().phase, Phase::Loading);

        state
            .finish(generation, Ok(vec![1, 2, 3]))
            .expect("fetch applies");
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Ready);
        assert_eq!(snapshot.items, vec![1, 2, 3]);
    }

    #[test]
    fn failed_fetch_keeps_last_known_good() {
        let state = ListState::new();
        let generation = state.begin();
        state
            .finish(generation, Ok(vec![7]))
            .expect("fetch applies");

        let generation = state.begin();
        let err = state
            .finish(generation, Err(AppError::Remote("backend down".to_string())))
            .expect_err("error propagates");
        assert!(matches!(err, AppError::Remote(_)));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Error);
        assert_eq!(snapshot.items, vec![7]);
        assert!(snapshot.error.is_some());
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let state = ListState::new();
        let slow = state.begin();
        let fast = state.begin();

        state.finish(fast, Ok(vec![2])).expect("fresh applies");
        state.finish(slow, Ok(vec![1])).expect("stale is a no-op");

        assert_eq!(state.snapshot().items, vec![2]);
    }

    #[test]
    fn changes_tick_on_apply_but_not_on_stale() {
        let state = ListState::new();
        let mut changed = state.subscribe();
        assert!(!changed.has_changed().unwrap());

        let slow = state.begin();
        let fast = state.begin();
        state.finish(fast, Ok(vec![1])).expect("fresh applies");
        assert!(changed.has_changed().unwrap());
        changed.mark_unchanged();

        state.finish(slow, Ok(vec![0])).expect("stale is a no-op");
        assert!(!changed.has_changed().unwrap());
    }
}
