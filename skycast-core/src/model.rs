use chrono::{DateTime, NaiveDate, Utc};

/// The provider's human-readable weather description plus its icon URL.
/// Shared by current conditions, day summaries and hourly entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub text: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub region: String,
}

/// Conditions observed at fetch time. The whole block is absent when the
/// provider returned no `current` data; that is a valid snapshot, not an
/// error, and consumers must handle the absent case explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temp_f: f64,
    pub condition: Condition,
    pub wind_mph: f64,
    pub wind_dir: String,
    pub humidity_pct: u8,
    pub pressure_mb: f64,
    pub feelslike_f: f64,
    pub vis_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourForecast {
    pub time: DateTime<Utc>,
    pub temp_f: f64,
    pub condition: Condition,
}

/// Sunrise/sunset exactly as the provider formats them, e.g. "06:12 AM".
#[derive(Debug, Clone, PartialEq)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub condition: Condition,
    pub maxtemp_f: f64,
    pub mintemp_f: f64,
    pub astro: Option<Astro>,
    /// Chronological hourly breakdown; empty when the provider omitted it.
    pub hours: Vec<HourForecast>,
}

/// One complete, immutable weather result set for a location at fetch time.
///
/// `days` is guaranteed non-empty, chronological and date-unique by the
/// client's parser, so a valid day index can always be selected.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: Option<CurrentConditions>,
    pub days: Vec<DayForecast>,
}
