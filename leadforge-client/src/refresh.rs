//! Coalesced token refresh.
//!
//! When several requests hit a 401 at the same time, only the first one
//! starts a refresh. The others join the in-flight refresh and all of them
//! receive the same [`RefreshOutcome`].

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Result of a refresh attempt.
#[derive(Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New access token, already persisted.
    Refreshed(String),
    /// Terminal failure; the session has been cleared.
    Failed(String),
}

impl fmt::Debug for RefreshOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refreshed(_) => f.write_str("Refreshed(<redacted>)"),
            Self::Failed(reason) => f.debug_tuple("Failed").field(reason).finish(),
        }
    }
}

type InFlight = Shared<BoxFuture<'static, RefreshOutcome>>;

#[derive(Default)]
struct State {
    in_flight: Option<InFlight>,
    completed: u64,
    last: Option<RefreshOutcome>,
}

/// Single-flight guard around the refresh call.
///
/// Callers take a [`generation`](Self::generation) before they read the
/// session store and pass it to [`run`](Self::run). A refresh that finished
/// after that point is reused instead of starting another one.
#[derive(Default)]
pub struct RefreshCoordinator {
    state: Mutex<State>,
    started: AtomicU64,
}

impl fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("RefreshCoordinator")
            .field("in_flight", &state.in_flight.is_some())
            .field("completed", &state.completed)
            .field("started", &self.started())
            .finish()
    }
}

impl RefreshCoordinator {
    /// Create a coordinator with no refresh in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of refreshes started so far.
    pub fn started(&self) -> u64 {
        self.started.load(Ordering::Relaxed)
    }

    /// Number of refreshes completed so far.
    pub fn generation(&self) -> u64 {
        self.state.lock().completed
    }

    /// Returns true while a refresh is running.
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().in_flight.is_some()
    }

    /// Join the in-flight refresh, reuse one that completed after `seen`, or
    /// start one with `start`.
    ///
    /// `start` is only called when neither applies.
    pub async fn run<F>(&self, seen: u64, start: F) -> RefreshOutcome
    where
        F: FnOnce() -> BoxFuture<'static, RefreshOutcome>,
    {
        let shared = {
            let mut state = self.state.lock();
            if let Some(existing) = state.in_flight.as_ref() {
                debug!("Joining in-flight token refresh");
                existing.clone()
            } else if let Some(last) = state.last.clone().filter(|_| state.completed > seen) {
                debug!("Token refresh completed while waiting, reusing it");
                return last;
            } else {
                self.started.fetch_add(1, Ordering::Relaxed);
                let fresh = start().shared();
                state.in_flight = Some(fresh.clone());
                fresh
            }
        };

        let outcome = shared.clone().await;

        {
            let mut state = self.state.lock();
            if state.in_flight.as_ref().is_some_and(|current| current.ptr_eq(&shared)) {
                state.in_flight = None;
                state.completed += 1;
                state.last = Some(outcome.clone());
            }
        }

        outcome
    }
}
