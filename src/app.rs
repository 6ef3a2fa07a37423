//! Application state management for launchwx
//!
//! This module contains the main application state, handling keyboard
//! input, data loading, and the transition from the loading screen to the
//! dashboard. Fetch results are pushed through the pure summarizer here;
//! the UI only ever reads the resulting state.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use log::warn;

use crate::cache::CacheManager;
use crate::cli::StartupConfig;
use crate::data::{Observation, StationClient, StationError};
use crate::refresh::RefreshMessage;
use crate::summary::{Summarizer, SummaryError, WeatherSummary};

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// Dashboard view showing the weather cards
    Dashboard,
}

/// Outcome of the most recent load, driving the dashboard banners.
///
/// `NoData` (the station answered but reported nothing) and `Failed` (the
/// fetch itself broke) are deliberately separate states: the first is a
/// condition of the station, the second of the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardStatus {
    /// A summary was computed successfully
    Ready,
    /// The launch station carried no observations
    NoData,
    /// The fetch or summary failed; carries a displayable reason
    Failed(String),
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Outcome of the most recent load
    pub status: DashboardStatus,
    /// Most recent launch observation, kept for the raw-value cards
    pub observation: Option<Observation>,
    /// Derived metrics for the current observation
    pub summary: Option<WeatherSummary>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Timestamp of last data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Startup configuration (stations, TTLs)
    config: StartupConfig,
    /// Station API client
    station_client: StationClient,
    /// Derived-metrics summarizer
    summarizer: Summarizer,
}

impl App {
    /// Creates a new App instance from the startup configuration.
    ///
    /// Wires up the disk cache when an XDG cache directory is available;
    /// without one the client simply fetches every time.
    pub fn with_startup_config(config: StartupConfig) -> Self {
        let mut station_client = StationClient::new(config.api_key.clone());
        if let Some(cache) = CacheManager::new() {
            station_client = station_client.with_cache(cache);
        }
        Self::with_client(config, station_client)
    }

    /// Creates a new App instance with a custom station client.
    pub fn with_client(config: StartupConfig, station_client: StationClient) -> Self {
        Self {
            state: AppState::Loading,
            status: DashboardStatus::NoData,
            observation: None,
            summary: None,
            should_quit: false,
            show_help: false,
            last_refresh: None,
            refresh_requested: false,
            config,
            station_client,
            summarizer: Summarizer::new(),
        }
    }

    /// Returns the launch station ID being displayed.
    pub fn launch_station(&self) -> &str {
        &self.config.launch_station
    }

    /// Returns a clone of the station client, for the background refresher.
    pub fn station_client(&self) -> StationClient {
        self.station_client.clone()
    }

    /// Loads observations for both stations and recomputes the summary.
    ///
    /// The two fetches run concurrently; a missing or failed ground fetch
    /// only costs the lapse-rate card, never the dashboard. Transitions to
    /// the Dashboard state when complete.
    pub async fn load_all_data(&mut self) {
        let launch_future = self
            .station_client
            .fetch_current(&self.config.launch_station, self.config.launch_ttl);
        let ground_future = async {
            match &self.config.ground_station {
                Some(station) => Some(
                    self.station_client
                        .fetch_current(station, self.config.ground_ttl)
                        .await,
                ),
                None => None,
            }
        };

        let (launch, ground) = futures::future::join(launch_future, ground_future).await;
        self.apply_observations(launch, ground);

        self.last_refresh = Some(Local::now());
        self.state = AppState::Dashboard;
    }

    /// Applies a background refresh result.
    pub fn handle_refresh_message(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::ObservationsFetched { launch, ground } => {
                self.apply_observations(launch, ground);
                self.last_refresh = Some(Local::now());
            }
        }
    }

    /// Folds fetch results into the dashboard state via the summarizer.
    fn apply_observations(
        &mut self,
        launch: Result<Observation, StationError>,
        ground: Option<Result<Observation, StationError>>,
    ) {
        let ground_observation = match ground {
            Some(Ok(observation)) => Some(observation),
            Some(Err(err)) => {
                // Lapse rate degrades to "unavailable"; everything else still renders
                warn!("ground station fetch failed: {}", err);
                None
            }
            None => None,
        };

        match launch {
            Ok(observation) => {
                match self
                    .summarizer
                    .summarize(Some(&observation), ground_observation.as_ref())
                {
                    Ok(summary) => {
                        self.observation = Some(observation);
                        self.summary = Some(summary);
                        self.status = DashboardStatus::Ready;
                    }
                    Err(err @ SummaryError::InvalidInput(_))
                    | Err(err @ SummaryError::NoMatchingBand(_)) => {
                        // Classification tables are supposed to be total;
                        // surface the defect instead of papering over it.
                        warn!("summary computation failed: {}", err);
                        self.status = DashboardStatus::Failed(err.to_string());
                    }
                    Err(SummaryError::NoData) => {
                        self.status = DashboardStatus::NoData;
                    }
                }
            }
            Err(StationError::NoObservations(station)) => {
                warn!("station {} reported no observations", station);
                self.status = DashboardStatus::NoData;
            }
            Err(err) => {
                warn!("launch station fetch failed: {}", err);
                self.status = DashboardStatus::Failed(err.to_string());
            }
        }
    }

    /// Handles a keyboard event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('r') => {
                self.refresh_requested = true;
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            _ => {}
        }
    }
}
