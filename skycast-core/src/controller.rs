//! The query state machine.
//!
//! `QueryController` is the single owner of [`AppState`]. It mutates state
//! only in response to a submission or a fetch resolution; everything else
//! reads the state and derives values from it. Transitions are expressed as
//! plain methods over owned data, so the whole lifecycle is unit-testable
//! without a network or a rendering environment.

use chrono::{Local, NaiveDate};

use crate::client::FetchError;
use crate::model::WeatherSnapshot;
use crate::navigator;

/// The single user-visible failure message. Every fetch error kind
/// collapses into it.
pub const CITY_NOT_FOUND: &str = "City not found";

/// Identifies one submitted query. Tokens increase monotonically per
/// controller; only the latest token's response may touch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Overall application state. Exactly one variant holds at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Nothing submitted yet.
    Idle,
    /// A fetch is in flight for the most recent submission.
    Loading,
    /// A snapshot arrived; `selected_day` is always a valid index into
    /// `snapshot.days`.
    Success { snapshot: WeatherSnapshot, selected_day: usize },
    /// The most recent fetch failed. No snapshot survives a failure.
    Failed { message: String },
}

impl AppState {
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            AppState::Success { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    pub fn selected_day(&self) -> Option<usize> {
        match self {
            AppState::Success { selected_day, .. } => Some(*selected_day),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct QueryController {
    state: AppState,
    pending_input: String,
    last_token: u64,
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryController {
    pub fn new() -> Self {
        Self { state: AppState::Idle, pending_input: String::new(), last_token: 0 }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Text of the submission currently being worked on. Cleared on
    /// success, preserved on failure so the user can edit and retry.
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Register a user-confirmed submission (one Enter keystroke, never a
    /// per-keypress event). State moves to `Loading` and a fresh token is
    /// issued; the caller performs the fetch and reports the outcome via
    /// [`resolve`](Self::resolve) with that token.
    ///
    /// The fetch is issued unconditionally, empty and whitespace-only
    /// queries included; the provider rejects those and the rejection comes
    /// back as the usual failure state.
    pub fn begin_query(&mut self, text: &str) -> RequestToken {
        self.pending_input = text.to_string();
        self.last_token += 1;
        self.state = AppState::Loading;
        RequestToken(self.last_token)
    }

    pub fn resolve(&mut self, token: RequestToken, outcome: Result<WeatherSnapshot, FetchError>) {
        self.resolve_at(token, outcome, Local::now().date_naive());
    }

    /// Reconcile a fetch outcome into state.
    ///
    /// A response carrying anything but the most recently issued token is
    /// stale: a newer submission superseded it while it was in flight, and
    /// it is discarded without touching state. There is no cancellation
    /// primitive for the underlying request; discarding the result is the
    /// whole mechanism.
    pub fn resolve_at(
        &mut self,
        token: RequestToken,
        outcome: Result<WeatherSnapshot, FetchError>,
        today: NaiveDate,
    ) {
        if token.0 != self.last_token {
            return;
        }

        match outcome {
            Ok(snapshot) => {
                let selected_day = navigator::initial_selection(&snapshot.days, today);
                self.state = AppState::Success { snapshot, selected_day };
                self.pending_input.clear();
            }
            Err(_) => {
                self.state = AppState::Failed { message: CITY_NOT_FOUND.to_string() };
            }
        }
    }

    pub fn select_day(&mut self, index: usize) {
        self.select_day_at(index, Local::now().date_naive());
    }

    /// Apply the navigator's day-selection rule to the current state.
    pub fn select_day_at(&mut self, index: usize, today: NaiveDate) {
        let state = std::mem::replace(&mut self.state, AppState::Idle);
        self.state = navigator::select_day(state, index, today);
    }
}
