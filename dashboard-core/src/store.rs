use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::model::WeatherRecord;
use crate::provider::{FetchError, WeatherProvider};
use crate::units::Units;

/// Lifecycle of the most recent lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// Nothing searched yet, or the last error was dismissed.
    #[default]
    Idle,
    /// A lookup is in flight.
    Loading,
    /// The last lookup produced this record.
    Succeeded(WeatherRecord),
    /// The last lookup failed with this user-facing message.
    Failed(String),
}

/// Handle for one issued fetch. Only the most recently issued ticket may
/// settle the store; older tickets are discarded on resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    id: u64,
}

/// Single-owner state container behind the dashboard: current request state,
/// session cache, and unit preference, fed by a [`WeatherProvider`].
#[derive(Debug)]
pub struct WeatherStore {
    provider: Box<dyn WeatherProvider>,
    state: RequestState,
    cache: CacheStore,
    units: Units,
    last_ticket: u64,
    in_flight: Option<u64>,
}

impl WeatherStore {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            state: RequestState::Idle,
            cache: CacheStore::new(),
            units: Units::default(),
            last_ticket: 0,
            in_flight: None,
        }
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn request_state(&self) -> &RequestState {
        &self.state
    }

    /// The displayed record, if the last lookup succeeded.
    pub fn current(&self) -> Option<&WeatherRecord> {
        match &self.state {
            RequestState::Succeeded(record) => Some(record),
            _ => None,
        }
    }

    /// The displayed error message, if the last lookup failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == RequestState::Loading
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Look up a city: served from cache when seen this session, fetched
    /// otherwise. Blank input leaves the store untouched.
    pub async fn submit(&mut self, city: &str) -> &RequestState {
        let city = city.trim();
        if city.is_empty() {
            debug!("ignoring blank city submission");
            return &self.state;
        }

        self.clear_error();

        if self.load_from_cache(city) {
            debug!(%city, "served from session cache");
            return &self.state;
        }

        let ticket = self.begin_fetch();
        let result = self.provider.current_weather(city).await;
        self.resolve_fetch(ticket, result);
        &self.state
    }

    /// Move to `Loading` and issue the ticket that is allowed to settle it.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_ticket += 1;
        let ticket = FetchTicket {
            id: self.last_ticket,
        };
        self.in_flight = Some(ticket.id);
        self.state = RequestState::Loading;
        debug!(ticket = ticket.id, "fetch started");
        ticket
    }

    /// Settle a fetch. Returns false (store untouched) when the ticket is no
    /// longer current, so a slow response can never clobber a newer one.
    pub fn resolve_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<WeatherRecord, FetchError>,
    ) -> bool {
        if self.in_flight != Some(ticket.id) {
            debug!(ticket = ticket.id, "discarding stale fetch result");
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(record) => {
                let key = self.cache.put(record.clone());
                info!(city = %record.name, %key, "weather updated");
                self.state = RequestState::Succeeded(record);
            }
            Err(err) => {
                warn!(error = %err, "weather lookup failed");
                self.state = RequestState::Failed(err.to_string());
            }
        }
        true
    }

    /// Dismiss a displayed error. Any other state is left as is.
    pub fn clear_error(&mut self) {
        if matches!(self.state, RequestState::Failed(_)) {
            self.state = RequestState::Idle;
        }
    }

    /// Flip the display units. Touches nothing else.
    pub fn toggle_units(&mut self) -> Units {
        self.units = self.units.toggled();
        self.units
    }

    /// Show a previously fetched city without a network round trip. Returns
    /// false (store untouched) when the city is not cached. A hit also
    /// invalidates any fetch still in flight.
    pub fn load_from_cache(&mut self, key: &str) -> bool {
        match self.cache.get(key) {
            Some(record) => {
                self.in_flight = None;
                self.state = RequestState::Succeeded(record.clone());
                true
            }
            None => false,
        }
    }
}
