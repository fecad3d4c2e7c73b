use std::fmt;

/// Named background treatment derived from the provider's condition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rain,
    Default,
}

impl Theme {
    /// Exact-match, case-sensitive lookup against the provider's condition
    /// text. Total: anything unrecognized, the empty string included, falls
    /// back to `Default`. Provider variants like "Light rain" deliberately
    /// do not match "Rain".
    pub fn for_condition(text: &str) -> Self {
        match text {
            "Sunny" => Theme::Sunny,
            "Partly Cloudy" => Theme::PartlyCloudy,
            "Cloudy" => Theme::Cloudy,
            "Rain" => Theme::Rain,
            _ => Theme::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::PartlyCloudy => "partly-cloudy",
            Theme::Cloudy => "cloudy",
            Theme::Rain => "rain",
            Theme::Default => "default",
        }
    }

    /// Background gradient stops in left-to-right order. Most themes use
    /// two; Partly Cloudy blends through a third grey stop.
    pub fn gradient(&self) -> &'static [&'static str] {
        match self {
            Theme::Sunny => &["#fdc830", "#fc4a1a"],
            Theme::PartlyCloudy => &["#fdc830", "#fc4a1a", "#d1d1d1"],
            Theme::Cloudy => &["#b0bec5", "#cfd8dc"],
            Theme::Rain => &["#f7b733", "#fc4a1a"],
            Theme::Default => &["#2980b9", "#6dd5fa"],
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
