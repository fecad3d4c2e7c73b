use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};

use skycast_core::client::{ForecastSource, WeatherClient};
use skycast_core::config::Config;
use skycast_core::controller::{AppState, QueryController};
use skycast_core::navigator;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key used for forecast requests.
    Configure,

    /// Fetch and print the forecast for a city once, without the prompt loop.
    Show {
        /// City or location name, e.g. "London".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => {
                let client = client_from_config()?;
                let mut controller = QueryController::new();

                submit(&mut controller, &client, &city).await;
                render::render_state(controller.state());
                Ok(())
            }
            None => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Text::new("WeatherAPI.com key:")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn client_from_config() -> anyhow::Result<WeatherClient> {
    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;
    Ok(WeatherClient::new(api_key))
}

/// One submission lifecycle: issue a token, fetch, reconcile. The fetch
/// goes out exactly as typed (empty input included); any failure comes
/// back as the single "City not found" state.
async fn submit(controller: &mut QueryController, client: &WeatherClient, city: &str) {
    let token = controller.begin_query(city);
    let outcome = client.fetch_forecast(city).await;
    controller.resolve(token, outcome);
}

async fn interactive() -> anyhow::Result<()> {
    let client = client_from_config()?;
    let mut controller = QueryController::new();

    render::render_state(controller.state());

    loop {
        let city = match Text::new("City:").prompt() {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        submit(&mut controller, &client, &city).await;
        render::render_state(controller.state());

        if matches!(controller.state(), AppState::Success { .. }) {
            drill_down(&mut controller)?;
        }
    }

    Ok(())
}

/// Day-selection loop over the fetched week. Esc returns to the city prompt.
fn drill_down(controller: &mut QueryController) -> anyhow::Result<()> {
    loop {
        let labels: Vec<String> = match controller.state().snapshot() {
            Some(snapshot) => snapshot.days.iter().map(|d| render::day_label(d)).collect(),
            None => return Ok(()),
        };

        let choice = match Select::new("Hourly forecast for:", labels).raw_prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let before = controller.state().selected_day();
        controller.select_day(choice.index);

        if controller.state().selected_day() == before && Some(choice.index) != before {
            // The navigator refused the gesture: that day has elapsed.
            println!("That day has already passed; pick today or later.");
            continue;
        }

        render::render_hours(navigator::hourly_forecast(controller.state()));
    }
}
