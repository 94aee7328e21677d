//! Dashboard state machine.
//!
//! A single [`DashboardState`] replaces independent loading/error/data flags.
//! Every submission hands out a [`RequestTicket`]; results carrying an older
//! ticket than the latest one are discarded, so the last request wins no
//! matter which response arrives last.

use chrono::Utc;

use crate::{
    error::FetchError,
    forecast,
    location::{self, LocationSource},
    model::{CurrentConditions, ForecastEntry, ForecastFeed, Query, WeatherSnapshot},
    provider::WeatherProvider,
    units::TemperatureUnit,
    view::DashboardView,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket {
    pub seq: u64,
    pub query: Query,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub snapshot: WeatherSnapshot,
    /// `None` until the forecast arrives, and for good if it fails.
    pub forecast: Option<Vec<ForecastEntry>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardState {
    #[default]
    Idle,
    Loading {
        request: RequestTicket,
    },
    Loaded(Box<Loaded>),
    Errored {
        message: String,
    },
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DashboardState::Errored { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn loaded(&self) -> Option<&Loaded> {
        match self {
            DashboardState::Loaded(loaded) => Some(loaded.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Dashboard {
    state: DashboardState,
    unit: TemperatureUnit,
    latest_seq: u64,
}

impl Dashboard {
    pub fn new(unit: TemperatureUnit) -> Self {
        Self { unit, ..Self::default() }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Changes presentation only; no request is made.
    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.unit = self.unit.toggled();
        self.unit
    }

    /// Start a new request. A blank city is rejected and leaves state as is.
    pub fn submit(&mut self, query: Query) -> Option<RequestTicket> {
        if query.is_blank() {
            tracing::debug!("Ignoring blank city submission");
            return None;
        }

        self.latest_seq += 1;
        let ticket = RequestTicket { seq: self.latest_seq, query };
        self.state = DashboardState::Loading { request: ticket.clone() };
        Some(ticket)
    }

    fn is_current(&self, ticket: &RequestTicket) -> bool {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "Discarding superseded response for {}",
                ticket.query
            );
            return false;
        }
        true
    }

    /// Apply the outcome of the current-conditions request.
    pub fn apply_current(
        &mut self,
        ticket: &RequestTicket,
        result: Result<CurrentConditions, FetchError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.state = match result {
            Ok(conditions) => {
                tracing::info!("Loaded current conditions for {}", conditions.location_name);
                DashboardState::Loaded(Box::new(Loaded {
                    snapshot: WeatherSnapshot::new(conditions, Utc::now()),
                    forecast: None,
                }))
            }
            Err(e) => {
                tracing::info!("Weather fetch for {} failed: {e}", ticket.query);
                DashboardState::Errored { message: e.user_message() }
            }
        };
        true
    }

    /// Apply the forecast outcome. Failures are logged and leave the
    /// forecast section absent.
    pub fn apply_forecast(
        &mut self,
        ticket: &RequestTicket,
        result: Result<ForecastFeed, FetchError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        let DashboardState::Loaded(loaded) = &mut self.state else {
            tracing::debug!("Forecast arrived without loaded conditions; dropping it");
            return false;
        };

        match result {
            Ok(feed) => {
                let days = forecast::sample_daily(&feed);
                tracing::info!("Loaded {} forecast days for {}", days.len(), loaded.snapshot.location_name);
                loaded.forecast = Some(days);
                true
            }
            Err(e) => {
                tracing::warn!("Forecast fetch for {} failed: {e}", loaded.snapshot.location_name);
                false
            }
        }
    }

    /// Move to the error state for a failure that happened outside a fetch.
    pub fn fail(&mut self, ticket: &RequestTicket, error: &FetchError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        tracing::info!("Request for {} failed: {error}", ticket.query);
        self.state = DashboardState::Errored { message: error.user_message() };
        true
    }

    /// The display-ready view, when data is loaded.
    pub fn view(&self) -> Option<DashboardView> {
        self.state.loaded().map(|loaded| {
            DashboardView::assemble(&loaded.snapshot, loaded.forecast.as_deref(), self.unit)
        })
    }

    /// Fetch conditions and then the forecast for `city`.
    ///
    /// Returns `false` if the city was blank and nothing happened.
    pub async fn load_city(&mut self, provider: &dyn WeatherProvider, city: &str) -> bool {
        let Some(ticket) = self.submit(Query::city(city.trim())) else {
            return false;
        };

        let result = provider.current(&ticket.query).await;
        let resolved = result.as_ref().ok().map(|c| forecast_city(c, city));
        self.apply_current(&ticket, result);

        if let Some(name) = resolved {
            let feed = provider.forecast(&name).await;
            self.apply_forecast(&ticket, feed);
        }
        true
    }

    /// Locate the user, resolve the position to a city and load it.
    pub async fn load_here(
        &mut self,
        provider: &dyn WeatherProvider,
        source: &dyn LocationSource,
    ) {
        let coords = match source.current_position().await {
            Ok(coords) => coords,
            Err(e) => {
                self.fail_now(&FetchError::from(e));
                return;
            }
        };

        let Some(ticket) = self.submit(Query::Coordinates(coords)) else {
            return;
        };

        match location::resolve_city(provider, coords).await {
            Ok(city) => {
                self.load_city(provider, &city).await;
            }
            Err(e) => {
                self.fail(&ticket, &e);
            }
        }
    }

    /// Enter the error state, superseding anything still in flight.
    fn fail_now(&mut self, error: &FetchError) {
        self.latest_seq += 1;
        tracing::info!("Location lookup failed: {error}");
        self.state = DashboardState::Errored { message: error.user_message() };
    }
}

/// Name to ask the forecast endpoint about: the echoed name when present.
fn forecast_city(conditions: &CurrentConditions, requested: &str) -> String {
    let echoed = conditions.location_name.trim();
    if echoed.is_empty() { requested.trim().to_string() } else { echoed.to_string() }
}
