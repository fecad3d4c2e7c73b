//! Human-friendly terminal output for the app state.

use chrono::Local;

use skycast_core::controller::AppState;
use skycast_core::model::{DayForecast, HourForecast, WeatherSnapshot};
use skycast_core::theme::Theme;

pub fn render_state(state: &AppState) {
    match state {
        AppState::Idle => {
            println!("Welcome to skycast");
            println!("Enter a city to get started (Esc quits)");
        }
        AppState::Loading => {
            println!("Fetching forecast...");
        }
        AppState::Failed { message } => {
            println!("{message}");
            println!("Please enter a valid city");
        }
        AppState::Success { snapshot, selected_day } => {
            render_snapshot(snapshot, *selected_day);
        }
    }
}

fn render_snapshot(snapshot: &WeatherSnapshot, selected_day: usize) {
    let condition_text =
        snapshot.current.as_ref().map(|c| c.condition.text.as_str()).unwrap_or("");
    let theme = Theme::for_condition(condition_text);

    println!();
    println!("{}, {}", snapshot.location.name, snapshot.location.region);
    println!("Today, {}", Local::now().format("%A, %B %-d"));
    println!("Theme: {theme} ({})", theme.gradient().join(" -> "));
    println!();

    match &snapshot.current {
        Some(current) => {
            println!("  {:.0}°F  {}", current.temp_f, current.condition.text);
            println!();
            println!("  Wind         {} mph {}", current.wind_mph, current.wind_dir);
            println!("  Humidity     {}%", current.humidity_pct);
            println!("  Pressure     {} hPa", current.pressure_mb);
            println!("  Feels like   {:.0}°F", current.feelslike_f);
            println!("  Visibility   {} km", current.vis_km);
        }
        None => println!("  No current data available"),
    }

    if let Some(astro) = snapshot.days.first().and_then(|d| d.astro.as_ref()) {
        println!("  Sunrise      {}", astro.sunrise);
        println!("  Sunset       {}", astro.sunset);
    }

    println!();
    for (index, day) in snapshot.days.iter().enumerate() {
        let marker = if index == selected_day { ">" } else { " " };
        println!(
            "{marker} {}  {:<22} High: {:.0}°  Low: {:.0}°",
            day.date.format("%a, %b %-d"),
            day.condition.text,
            day.maxtemp_f,
            day.mintemp_f,
        );
    }
    println!();
}

pub fn day_label(day: &DayForecast) -> String {
    format!("{} ({})", day.date.format("%a, %b %-d"), day.condition.text)
}

pub fn render_hours(hours: &[HourForecast]) {
    if hours.is_empty() {
        println!("No hourly breakdown for this day");
        return;
    }

    println!();
    for hour in hours {
        println!(
            "  {}  {:>4.0}°  {}",
            hour.time.format("%H:%M"),
            hour.temp_f,
            hour.condition.text
        );
    }
    println!();
}
