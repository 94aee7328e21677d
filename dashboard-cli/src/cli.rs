use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use dashboard_core::{
    Config, ConfiguredLocation, Coordinates, Dashboard, DashboardState, TemperatureUnit,
    WeatherProvider, provider_from_config,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// Temperature unit: celsius (c) or fahrenheit (f).
    #[arg(long, value_parser = parse_unit)]
    pub unit: Option<TemperatureUnit>,

    /// Print the view model as JSON instead of the text dashboard.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and display defaults.
    Configure,

    /// Show the dashboard for a city.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Show the dashboard for the current position.
    Here {
        /// Latitude; overrides the configured position.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude; overrides the configured position.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Prompt for cities in a loop; `:unit` toggles units, `:here` uses your position.
    Interactive {
        #[arg(long, value_parser = parse_unit)]
        unit: Option<TemperatureUnit>,
    },
}

fn parse_unit(s: &str) -> Result<TemperatureUnit, String> {
    TemperatureUnit::try_from(s).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, display } => {
                let config = Config::load()?.with_env();
                let city = city.unwrap_or_else(|| config.default_city().to_string());
                let provider = provider_from_config(&config);

                let mut dash = Dashboard::new(display.unit.unwrap_or(config.unit));
                if !dash.load_city(provider.as_ref(), &city).await {
                    return Err(anyhow!("Please enter a city name."));
                }
                print_outcome(&dash, display.json)
            }
            Command::Here { lat, lon, display } => {
                let config = Config::load()?.with_env();
                let provider = provider_from_config(&config);
                let source = location_source(&config, lat, lon);

                let mut dash = Dashboard::new(display.unit.unwrap_or(config.unit));
                dash.load_here(provider.as_ref(), &source).await;
                print_outcome(&dash, display.json)
            }
            Command::Interactive { unit } => {
                let config = Config::load()?.with_env();
                let provider = provider_from_config(&config);
                let source = location_source(&config, None, None);

                let mut dash = Dashboard::new(unit.unwrap_or(config.unit));
                interactive(&mut dash, provider.as_ref(), &source, config.default_city()).await
            }
        }
    }
}

fn location_source(config: &Config, lat: Option<f64>, lon: Option<f64>) -> ConfiguredLocation {
    let explicit = lat.zip(lon).map(|(latitude, longitude)| Coordinates { latitude, longitude });
    ConfiguredLocation::from_config(&config.location).with_override(explicit)
}

fn print_outcome(dash: &Dashboard, json: bool) -> anyhow::Result<()> {
    match dash.state() {
        DashboardState::Errored { message } => Err(anyhow!("{message}")),
        _ => {
            let view = dash.view().ok_or_else(|| anyhow!("No weather data was loaded"))?;
            if json {
                let out = serde_json::to_string_pretty(&view)
                    .context("Failed to serialize dashboard view to JSON")?;
                println!("{out}");
            } else {
                let out = render::dashboard(&view).context("Failed to render dashboard")?;
                print!("{out}");
            }
            Ok(())
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    let units = vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];
    let start = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    config.unit = Select::new("Temperature unit:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read temperature unit")?;

    config.save()?;
    tracing::info!("Saved configuration to {}", path.display());
    println!("Configuration saved to {}", path.display());
    Ok(())
}

/// What a line typed at the interactive prompt asks for.
#[derive(Debug, PartialEq)]
enum Input {
    City(String),
    ToggleUnit,
    Here,
    Quit,
    Empty,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Empty,
        ":unit" | ":u" => Input::ToggleUnit,
        ":here" | ":h" => Input::Here,
        ":quit" | ":q" => Input::Quit,
        city => Input::City(city.to_string()),
    }
}

async fn interactive(
    dash: &mut Dashboard,
    provider: &dyn WeatherProvider,
    source: &ConfiguredLocation,
    default_city: &str,
) -> anyhow::Result<()> {
    dash.load_city(provider, default_city).await;
    print_state(dash)?;

    loop {
        let line = match Text::new("City (:unit, :here, :quit):").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Empty => println!("Please enter a city name."),
            Input::ToggleUnit => {
                let unit = dash.toggle_unit();
                tracing::debug!("Switched display unit to {unit}");
                print_state(dash)?;
            }
            Input::Here => {
                dash.load_here(provider, source).await;
                print_state(dash)?;
            }
            Input::City(city) => {
                dash.load_city(provider, &city).await;
                print_state(dash)?;
            }
        }
    }

    Ok(())
}

fn print_state(dash: &Dashboard) -> anyhow::Result<()> {
    match dash.state() {
        DashboardState::Errored { message } => eprintln!("Error: {message}"),
        DashboardState::Loaded(_) => {
            if let Some(view) = dash.view() {
                let out = render::dashboard(&view).context("Failed to render dashboard")?;
                print!("{out}");
            }
        }
        DashboardState::Idle | DashboardState::Loading { .. } => {}
    }
    Ok(())
}
