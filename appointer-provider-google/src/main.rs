//! appointer-provider-google - Google Calendar provider for appointer
//!
//! Speaks the appointer provider protocol: one JSON request per line on
//! stdin, one JSON response per line on stdout. Logs go to stderr.
//!
//! Credentials and sessions live under:
//!   ~/.config/appointer/providers/google/app_config.toml
//!   ~/.config/appointer/providers/google/session/{account}.toml

mod app_config;
mod commands;
mod convert;
mod session;

use anyhow::Result;
use appointer_core::protocol::{Command, CreateEvent, ListEvents, Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("appointer_provider_google=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(request).await,
            Err(e) => {
                warn!(error = %e, "malformed request");
                Response::error(&format!("Failed to parse request: {}", e))
            }
        };

        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

async fn handle_request(request: Request) -> String {
    match request.command {
        Command::Authenticate => respond(commands::authenticate::handle().await),
        Command::ListEvents => match params::<ListEvents>(request.params) {
            Ok(cmd) => respond(commands::list_events::handle(cmd).await),
            Err(e) => e,
        },
        Command::CreateEvent => match params::<CreateEvent>(request.params) {
            Ok(cmd) => respond(commands::create_event::handle(cmd).await),
            Err(e) => e,
        },
    }
}

fn params<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, String> {
    serde_json::from_value(value).map_err(|e| Response::error(&format!("Invalid params: {}", e)))
}

fn respond<T: Serialize>(result: Result<T>) -> String {
    match result {
        Ok(data) => Response::success(data),
        Err(e) => {
            error!("{:#}", e);
            Response::error(&format!("{:#}", e))
        }
    }
}
