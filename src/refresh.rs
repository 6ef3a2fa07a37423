//! Background data refresh system
//!
//! Periodically re-fetches both station observations in the background
//! using tokio channels to communicate results to the main application.
//! The task only performs fetches; summaries are recomputed on the main
//! side so the core stays a pure function of the observations.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::cli::StartupConfig;
use crate::data::{Observation, StationClient, StationError};

/// Messages sent from background refresh to main app
#[derive(Debug)]
pub enum RefreshMessage {
    /// A refresh cycle completed; carries both fetch results
    ObservationsFetched {
        /// Launch station result
        launch: Result<Observation, StationError>,
        /// Ground station result, if a ground station is configured
        ground: Option<Result<Observation, StationError>>,
    },
}

/// Configuration for refresh intervals
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between refresh cycles
    pub interval: Duration,
    /// Whether auto-refresh is enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            enabled: true,
        }
    }
}

/// Handle for controlling the background refresh system
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Creates a new RefreshHandle and spawns the background refresh task
    ///
    /// # Arguments
    /// * `config` - Refresh interval configuration
    /// * `client` - Station client used for the background fetches
    /// * `startup` - Station IDs and cache TTLs to fetch with
    ///
    /// # Returns
    /// A RefreshHandle that receives updates via the `receiver` channel
    pub fn spawn(config: RefreshConfig, client: StationClient, startup: StartupConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(8);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        if config.enabled {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(config.interval);
                // Skip the first tick (immediate); the app does its own initial load
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let launch = client
                                .fetch_current(&startup.launch_station, startup.launch_ttl)
                                .await;
                            let ground = match &startup.ground_station {
                                Some(station) => {
                                    Some(client.fetch_current(station, startup.ground_ttl).await)
                                }
                                None => None,
                            };

                            if msg_tx
                                .send(RefreshMessage::ObservationsFetched { launch, ground })
                                .await
                                .is_err()
                            {
                                // Receiver gone, the app is shutting down
                                break;
                            }
                        }
                        _ = shutdown_rx.recv() => {
                            break;
                        }
                    }
                }
            });
        }

        Self {
            receiver: msg_rx,
            shutdown_tx,
        }
    }

    /// Shuts down the background refresh task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Checks for pending refresh messages without blocking
///
/// # Arguments
/// * `handle` - The RefreshHandle to check
///
/// # Returns
/// * `Some(RefreshMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}
