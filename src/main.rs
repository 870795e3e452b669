//! ClientDesk - a terminal admin panel for client activity tickets.
//!
//! Activities live on a remote HTTP backend. The panel flips their paid
//! flag optimistically and edits ticket fields through a keyed buffer.

mod api;
mod app;
mod config;
mod error;
mod events;
mod logging;
mod state;
mod tasks;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::app::App;
use crate::config::Config;
use crate::error::AppError;
use crate::events::EventHandler;
use crate::tasks::{create_task_channel, ApiMessage, TaskSpawner};
use crate::tui::Tui;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "clientdesk", version, about)]
struct Cli {
    /// Backend base URL. Overrides API_BASE_URL and the config file.
    #[arg(long, value_name = "URL")]
    api_base_url: Option<String>,

    /// Path to an alternative config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Restore the last fetched paid value when an update fails.
    #[arg(long)]
    rollback_on_failure: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: failed to initialize logging: {e:#}");
    }

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let (mut config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            (Config::default(), Some(e))
        }
    };
    if cli.rollback_on_failure {
        config.settings.rollback_on_failure = true;
    }

    let base_url = config
        .resolve_base_url(cli.api_base_url.as_deref())
        .context("cannot start without a backend URL")?;
    let timeout = Duration::from_secs(config.settings.request_timeout_secs);
    let client = ApiClient::new(&base_url, timeout).context("invalid backend URL")?;
    info!(base_url = %client.base_url(), "Backend configured");

    let (mut rx, spawner) = create_task_channel(client);

    let mut app = App::new(&config.settings);
    if let Some(e) = config_error {
        app.handle_error(&AppError::Config(e));
    }
    app.request_refresh();

    let mut tui = Tui::enter()?;
    let result = run(&mut tui, &mut app, &mut rx, &spawner);
    tui.exit()?;

    logging::shutdown();
    result
}

/// Draw, poll one event, then drain task results until the app quits.
fn run(
    tui: &mut Tui,
    app: &mut App,
    rx: &mut UnboundedReceiver<ApiMessage>,
    spawner: &TaskSpawner,
) -> anyhow::Result<()> {
    let events = EventHandler::new();

    while !app.should_quit() {
        for effect in app.take_effects() {
            spawner.dispatch(effect);
        }

        tui.terminal.draw(|frame| app.view(frame))?;

        app.update(events.next()?);

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }
    }

    Ok(())
}
