//! Boujdour Weather Dashboard - polling client
//!
//! Polls the aggregate endpoint of a running server and logs a localized
//! text rendering of the dashboard whenever new data arrives. Pressing
//! Enter requests an immediate refresh.

use std::sync::Arc;

use chrono::Local;
use shared::format::DashboardView;
use shared::i18n::{label, Label};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_backend::config::WatchConfig;
use weather_backend::poller::{
    DashboardPoller, DashboardState, HttpAggregateSource, RetryPolicy,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_watch=info,weather_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = WatchConfig::load()?;
    let lang = config.language()?;

    tracing::info!(server = %config.server_url, language = %lang, "Starting weather watch");

    let source = HttpAggregateSource::new(&config.server_url, config.request_timeout())?;
    let poller = Arc::new(DashboardPoller::new(
        Arc::new(source),
        RetryPolicy::default(),
    ));
    let mut states = poller.subscribe();
    let handle = Arc::clone(&poller).spawn(config.poll_interval());

    tracing::info!("{}", label(Label::Loading, lang));

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            line = input.next_line(), if stdin_open => {
                match line {
                    Ok(Some(_)) => {
                        tracing::info!("{}...", label(Label::Retry, lang));
                        handle.request_refresh();
                    }
                    // detached from a terminal; keep polling on the interval
                    Ok(None) | Err(_) => stdin_open = false,
                }
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                match state {
                    DashboardState::Loading => {
                        tracing::info!("{}", label(Label::Loading, lang));
                    }
                    DashboardState::Ready { data, fetched_at } => {
                        let view = DashboardView::build(&data, lang, Local::now().date_naive());
                        for line in view.lines() {
                            tracing::info!("{}", line);
                        }
                        tracing::info!(
                            "{}: {}",
                            label(Label::LastUpdated, lang),
                            fetched_at.with_timezone(&Local).format("%H:%M:%S")
                        );
                    }
                    DashboardState::Failed { message } => {
                        tracing::error!("{}: {}", label(Label::LoadError, lang), message);
                        tracing::info!("{}: press Enter", label(Label::Retry, lang));
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}
