use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::{
    Astro, Condition, CurrentConditions, DayForecast, HourForecast, Location, WeatherSnapshot,
};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Failure taxonomy for a forecast fetch. The controller collapses all of
/// these into a single user-visible message; the distinction exists for
/// logging and tests.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Any non-success HTTP/provider response. An unknown city and a rate
    /// limit both land here; the system does not tell them apart.
    #[error("WeatherAPI request failed with status {status}: {body}")]
    NotFound { status: StatusCode, body: String },

    /// A success response missing structure the data model requires.
    #[error("WeatherAPI response malformed: {0}")]
    Malformed(String),

    /// Transport-level failure before any response arrived.
    #[error("failed to reach WeatherAPI")]
    Network(#[from] reqwest::Error),
}

/// Seam between the state machine and the network. `WeatherClient` is the
/// real implementation; tests drive the controller with canned sources.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(&self, query: &str) -> Result<WeatherSnapshot, FetchError>;
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }
}

#[async_trait]
impl ForecastSource for WeatherClient {
    /// Single outstanding request, no retry, transport-default timeout.
    /// `query` goes out as typed, empty strings included; the provider
    /// answers those with a non-success status.
    async fn fetch_forecast(&self, query: &str) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/forecast.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("days", "7"),
                ("aqi", "yes"),
                ("alerts", "yes"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::NotFound { status, body: truncate_body(&body) });
        }

        parse_forecast(&body)
    }
}

/// Map a raw provider payload to a snapshot, field by field.
///
/// An absent `current` block yields `current: None`. An absent, empty or
/// out-of-order `forecast.forecastday` is fatal: the day list backs every
/// navigation invariant downstream.
pub fn parse_forecast(body: &str) -> Result<WeatherSnapshot, FetchError> {
    let parsed: WaResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(format!("invalid JSON: {e}")))?;

    let forecast = parsed
        .forecast
        .ok_or_else(|| FetchError::Malformed("missing forecast.forecastday".to_string()))?;

    if forecast.forecastday.is_empty() {
        return Err(FetchError::Malformed("empty forecastday list".to_string()));
    }

    let days = forecast
        .forecastday
        .into_iter()
        .map(day_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    for pair in days.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(FetchError::Malformed(format!(
                "forecast days not chronological: {} then {}",
                pair[0].date, pair[1].date
            )));
        }
    }

    Ok(WeatherSnapshot {
        location: Location { name: parsed.location.name, region: parsed.location.region },
        current: parsed.current.map(current_from_wire),
        days,
    })
}

fn current_from_wire(current: WaCurrent) -> CurrentConditions {
    CurrentConditions {
        temp_f: current.temp_f,
        condition: condition_from_wire(current.condition),
        wind_mph: current.wind_mph,
        wind_dir: current.wind_dir,
        humidity_pct: current.humidity,
        pressure_mb: current.pressure_mb,
        feelslike_f: current.feelslike_f,
        vis_km: current.vis_km,
    }
}

fn day_from_wire(day: WaForecastDay) -> Result<DayForecast, FetchError> {
    let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d").map_err(|_| {
        FetchError::Malformed(format!("unparseable forecast date '{}'", day.date))
    })?;

    Ok(DayForecast {
        date,
        condition: condition_from_wire(day.day.condition),
        maxtemp_f: day.day.maxtemp_f,
        mintemp_f: day.day.mintemp_f,
        astro: day.astro.map(|a| Astro { sunrise: a.sunrise, sunset: a.sunset }),
        hours: day.hour.into_iter().map(hour_from_wire).collect(),
    })
}

fn hour_from_wire(hour: WaHour) -> HourForecast {
    HourForecast {
        time: unix_to_utc(hour.time_epoch).unwrap_or_else(Utc::now),
        temp_f: hour.temp_f,
        condition: condition_from_wire(hour.condition),
    }
}

fn condition_from_wire(condition: WaCondition) -> Condition {
    Condition { text: condition.text, icon_url: condition.icon }
}

#[derive(Debug, Default, Deserialize)]
struct WaLocation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    region: String,
}

#[derive(Debug, Default, Deserialize)]
struct WaCondition {
    #[serde(default)]
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    #[serde(default)]
    temp_f: f64,
    #[serde(default)]
    condition: WaCondition,
    #[serde(default)]
    wind_mph: f64,
    #[serde(default)]
    wind_dir: String,
    #[serde(default)]
    humidity: u8,
    #[serde(default)]
    pressure_mb: f64,
    #[serde(default)]
    feelslike_f: f64,
    #[serde(default)]
    vis_km: f64,
}

#[derive(Debug, Default, Deserialize)]
struct WaDayBlock {
    #[serde(default)]
    condition: WaCondition,
    #[serde(default)]
    maxtemp_f: f64,
    #[serde(default)]
    mintemp_f: f64,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    #[serde(default)]
    sunrise: String,
    #[serde(default)]
    sunset: String,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    #[serde(default)]
    day: WaDayBlock,
    astro: Option<WaAstro>,
    #[serde(default)]
    hour: Vec<WaHour>,
}

#[derive(Debug, Deserialize)]
struct WaHour {
    #[serde(default)]
    time_epoch: i64,
    #[serde(default)]
    temp_f: f64,
    #[serde(default)]
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    #[serde(default)]
    location: WaLocation,
    current: Option<WaCurrent>,
    forecast: Option<WaForecast>,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Error bodies are arbitrary text (HTML, localized JSON); the cut must
    // land on a char boundary or the slice panics.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sample_day(date: &str) -> Value {
        json!({
            "date": date,
            "day": {
                "condition": { "text": "Sunny", "icon": "//cdn.weatherapi.com/64x64/day/113.png" },
                "maxtemp_f": 71.2,
                "mintemp_f": 55.9
            },
            "astro": { "sunrise": "06:12 AM", "sunset": "08:03 PM" },
            "hour": [
                {
                    "time_epoch": 1719792000,
                    "temp_f": 58.3,
                    "condition": { "text": "Clear", "icon": "//cdn.weatherapi.com/64x64/night/113.png" }
                },
                {
                    "time_epoch": 1719795600,
                    "temp_f": 57.7,
                    "condition": { "text": "Clear", "icon": "//cdn.weatherapi.com/64x64/night/113.png" }
                }
            ]
        })
    }

    fn sample_payload() -> Value {
        let days: Vec<Value> = (1..=7).map(|d| sample_day(&format!("2024-07-{d:02}"))).collect();
        json!({
            "location": { "name": "London", "region": "City of London, Greater London" },
            "current": {
                "temp_f": 62.1,
                "condition": { "text": "Partly Cloudy", "icon": "//cdn.weatherapi.com/64x64/day/116.png" },
                "wind_mph": 9.4,
                "wind_dir": "SW",
                "humidity": 72,
                "pressure_mb": 1014.0,
                "feelslike_f": 61.0,
                "vis_km": 10.0
            },
            "forecast": { "forecastday": days }
        })
    }

    #[test]
    fn full_payload_parses() {
        let snapshot = parse_forecast(&sample_payload().to_string()).expect("valid payload");

        assert_eq!(snapshot.location.name, "London");
        assert_eq!(snapshot.days.len(), 7);

        let current = snapshot.current.expect("current block present");
        assert_eq!(current.condition.text, "Partly Cloudy");
        assert_eq!(current.humidity_pct, 72);

        let first = &snapshot.days[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(first.astro.as_ref().unwrap().sunrise, "06:12 AM");
        assert_eq!(first.hours.len(), 2);
    }

    #[test]
    fn days_are_chronological_and_unique() {
        let snapshot = parse_forecast(&sample_payload().to_string()).unwrap();
        for pair in snapshot.days.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn missing_current_is_a_valid_snapshot() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("current");

        let snapshot = parse_forecast(&payload.to_string()).expect("still valid");
        assert!(snapshot.current.is_none());
        assert_eq!(snapshot.days.len(), 7);
    }

    #[test]
    fn missing_forecast_is_malformed() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("forecast");

        let err = parse_forecast(&payload.to_string()).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn empty_day_list_is_malformed() {
        let mut payload = sample_payload();
        payload["forecast"]["forecastday"] = json!([]);

        let err = parse_forecast(&payload.to_string()).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn duplicate_dates_are_malformed() {
        let mut payload = sample_payload();
        payload["forecast"]["forecastday"] = json!([
            sample_day("2024-07-01"),
            sample_day("2024-07-01"),
        ]);

        let err = parse_forecast(&payload.to_string()).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn unparseable_date_is_malformed() {
        let mut payload = sample_payload();
        payload["forecast"]["forecastday"][0]["date"] = json!("not-a-date");

        let err = parse_forecast(&payload.to_string()).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn hour_entries_decode_epoch_and_condition() {
        let snapshot = parse_forecast(&sample_payload().to_string()).unwrap();
        let hour = &snapshot.days[0].hours[0];

        assert_eq!(hour.time, DateTime::from_timestamp(1_719_792_000, 0).unwrap());
        assert_eq!(hour.temp_f, 58.3);
        assert_eq!(hour.condition.text, "Clear");
    }

    #[test]
    fn missing_hour_block_yields_empty_hours() {
        let mut payload = sample_payload();
        payload["forecast"]["forecastday"][2].as_object_mut().unwrap().remove("hour");

        let snapshot = parse_forecast(&payload.to_string()).unwrap();
        assert!(snapshot.days[2].hours.is_empty());
        assert!(!snapshot.days[0].hours.is_empty());
    }

    #[test]
    fn missing_astro_is_tolerated() {
        let mut payload = sample_payload();
        payload["forecast"]["forecastday"][0].as_object_mut().unwrap().remove("astro");

        let snapshot = parse_forecast(&payload.to_string()).unwrap();
        assert!(snapshot.days[0].astro.is_none());
    }

    #[test]
    fn defaulted_current_fields_do_not_fail() {
        let mut payload = sample_payload();
        payload["current"] = json!({ "temp_f": 50.0 });

        let snapshot = parse_forecast(&payload.to_string()).unwrap();
        let current = snapshot.current.unwrap();
        assert_eq!(current.temp_f, 50.0);
        assert_eq!(current.wind_dir, "");
        assert_eq!(current.humidity_pct, 0);
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_forecast("<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn truncate_body_leaves_short_bodies_alone() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // 100 euro signs are 300 bytes; byte 200 falls mid-character.
        let body = "€".repeat(100);

        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
        assert!(truncated.trim_end_matches("...").chars().all(|c| c == '€'));
    }
}
