//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI forecast client and its error taxonomy
//! - Shared domain models (snapshots, forecasts, app state)
//! - Pure view-state logic: day navigation and background themes
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod controller;
pub mod model;
pub mod navigator;
pub mod theme;

pub use client::{FetchError, ForecastSource, WeatherClient};
pub use config::Config;
pub use controller::{AppState, QueryController, RequestToken};
pub use model::{
    Astro, Condition, CurrentConditions, DayForecast, HourForecast, Location, WeatherSnapshot,
};
pub use theme::Theme;
