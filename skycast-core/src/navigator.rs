//! Day-selection rules over a fetched forecast.
//!
//! These are pure functions: they read an [`AppState`] and return a new one
//! (or a borrowed slice), never mutating shared state. Any stateful widget
//! (a carousel, a prompt loop) is a presentation-only consumer that calls
//! [`select_day`] and renders whatever index comes back.

use chrono::NaiveDate;

use crate::controller::AppState;
use crate::model::{DayForecast, HourForecast};

/// Index of the day whose date equals `today`. Falls back to 0 when the
/// provider's window does not contain today (clock skew between client and
/// provider).
pub fn initial_selection(days: &[DayForecast], today: NaiveDate) -> usize {
    days.iter().position(|day| day.date == today).unwrap_or(0)
}

/// Apply a day-selection gesture.
///
/// Navigating to today or any later day within the window is permitted;
/// out-of-bounds indices and days earlier than today's index leave the
/// state unchanged (dates already elapsed are not navigable). Non-`Success`
/// states pass through untouched.
pub fn select_day(state: AppState, index: usize, today: NaiveDate) -> AppState {
    match state {
        AppState::Success { snapshot, selected_day } => {
            let earliest = initial_selection(&snapshot.days, today);
            let selected_day = if index >= earliest && index < snapshot.days.len() {
                index
            } else {
                selected_day
            };
            AppState::Success { snapshot, selected_day }
        }
        other => other,
    }
}

/// Hourly breakdown of the selected day; empty when there is no snapshot
/// or the provider omitted the hours for that day.
pub fn hourly_forecast(state: &AppState) -> &[HourForecast] {
    match state {
        AppState::Success { snapshot, selected_day } => &snapshot.days[*selected_day].hours,
        _ => &[],
    }
}
