//! Background polling of the aggregate endpoint
//!
//! A supervised task fetches the composite on a fixed interval and on
//! explicit refresh requests. At most one fetch runs at a time; a request
//! arriving while one is in flight is dropped. Each fetch retries with
//! bounded exponential backoff, and the outcome is published through a
//! `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use shared::models::CompositeResponse;
use thiserror::Error;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;

use crate::error::ErrorResponse;

/// Default polling interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);

/// Errors raised while fetching the composite
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PollError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Source of composite weather data
#[async_trait]
pub trait AggregateSource: Send + Sync {
    async fn fetch(&self) -> Result<CompositeResponse, PollError>;
}

/// Fetches `/api/weather/all` from a running server
#[derive(Clone)]
pub struct HttpAggregateSource {
    client: Client,
    url: String,
}

impl HttpAggregateSource {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, PollError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PollError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: format!("{}/api/weather/all", server_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl AggregateSource for HttpAggregateSource {
    async fn fetch(&self) -> Result<CompositeResponse, PollError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PollError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PollError::Request(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|err| err.message)
                .unwrap_or(body);
            return Err(PollError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| PollError::Decode(e.to_string()))
    }
}

/// Bounded exponential backoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): `min(base * 2^attempt, max)`
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

/// What the dashboard currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Ready {
        data: Arc<CompositeResponse>,
        fetched_at: DateTime<Utc>,
    },
    /// Retries exhausted; stays until the next successful fetch
    Failed { message: String },
}

/// Result of one refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    Failed,
    /// Another fetch was already in flight
    Skipped,
}

/// Polls an [`AggregateSource`] and publishes [`DashboardState`]
pub struct DashboardPoller {
    source: Arc<dyn AggregateSource>,
    retry: RetryPolicy,
    in_flight: Mutex<()>,
    state: watch::Sender<DashboardState>,
}

impl DashboardPoller {
    pub fn new(source: Arc<dyn AggregateSource>, retry: RetryPolicy) -> Self {
        let (state, _) = watch::channel(DashboardState::Loading);
        Self {
            source,
            retry,
            in_flight: Mutex::new(()),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Fetch once (with retries) unless a fetch is already running
    pub async fn refresh(&self) -> RefreshOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::debug!("refresh already in flight, dropping request");
            return RefreshOutcome::Skipped;
        };

        match self.fetch_with_retry().await {
            Ok(data) => {
                tracing::info!(
                    city = %data.current.city,
                    forecast_days = data.forecast.len(),
                    "dashboard data refreshed"
                );
                self.state.send_replace(DashboardState::Ready {
                    data: Arc::new(data),
                    fetched_at: Utc::now(),
                });
                RefreshOutcome::Updated
            }
            Err(err) => {
                tracing::error!(error = %err, "dashboard refresh failed");
                self.state.send_replace(DashboardState::Failed {
                    message: err.to_string(),
                });
                RefreshOutcome::Failed
            }
        }
    }

    async fn fetch_with_retry(&self) -> Result<CompositeResponse, PollError> {
        let mut attempt = 0;
        loop {
            match self.source.fetch().await {
                Ok(data) => return Ok(data),
                Err(err) if attempt < self.retry.max_retries => {
                    let delay = self.retry.delay(attempt);
                    tracing::warn!(error = %err, attempt, ?delay, "fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Start the periodic task. The first fetch happens immediately.
    pub fn spawn(self: Arc<Self>, interval: Duration) -> PollerHandle {
        let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    Some(()) = refresh_rx.recv() => {
                        tracing::debug!("manual refresh requested");
                    }
                    _ = shutdown_rx.recv() => break,
                }

                let poller = Arc::clone(&self);
                tokio::spawn(async move {
                    poller.refresh().await;
                });
            }

            tracing::debug!("poller stopped");
        });

        PollerHandle {
            refresh_tx,
            shutdown_tx,
            task,
        }
    }
}

/// Handle for controlling a spawned [`DashboardPoller`]
pub struct PollerHandle {
    refresh_tx: mpsc::Sender<()>,
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Ask for an immediate refresh; ignored if one is already pending
    pub fn request_refresh(&self) {
        let _ = self.refresh_tx.try_send(());
    }

    /// Stop the periodic task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}
