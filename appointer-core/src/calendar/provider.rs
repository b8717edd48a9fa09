//! Calendar backed by a provider binary.
//!
//! Each call spawns `appointer-provider-<name>`, writes one JSON request to
//! its stdin and reads one JSON response from its stdout. Providers own
//! their credentials; appointer only passes the account and calendar id.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::{debug, info};

use super::{Appointment, CalendarService};
use crate::constants::MAX_BUSY_RESULTS;
use crate::error::{BookingError, BookingResult};
use crate::protocol::{
    Authenticate, Command, CreateEvent, ListEvents, ProviderCommand, Request, Response,
};
use crate::slot::BusyInterval;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);
/// Login waits on the user finishing the browser flow.
const AUTH_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
pub struct ProviderCalendar {
    provider: String,
    account: String,
    calendar_id: String,
}

impl ProviderCalendar {
    pub fn new(provider: &str, account: &str, calendar_id: &str) -> Self {
        ProviderCalendar {
            provider: provider.to_string(),
            account: account.to_string(),
            calendar_id: calendar_id.to_string(),
        }
    }

    /// Run the provider's login flow and return the authenticated account.
    pub async fn authenticate(provider: &str) -> BookingResult<String> {
        let binary = binary_path(provider)?;
        call_with_timeout(&binary, Authenticate::command(), Authenticate {}, AUTH_TIMEOUT).await
    }

    /// Call a typed provider command; the response type follows the command.
    async fn call<C: ProviderCommand>(&self, cmd: C) -> BookingResult<C::Response> {
        let binary = binary_path(&self.provider)?;
        call_with_timeout(&binary, C::command(), cmd, PROVIDER_TIMEOUT).await
    }
}

impl CalendarService for ProviderCalendar {
    async fn list_events(
        &self,
        from: &DateTime<Tz>,
        to: &DateTime<Tz>,
    ) -> BookingResult<Vec<BusyInterval>> {
        let periods = self
            .call(ListEvents {
                account: self.account.clone(),
                calendar_id: self.calendar_id.clone(),
                from: from.fixed_offset(),
                to: to.fixed_offset(),
                max_results: MAX_BUSY_RESULTS,
            })
            .await
            .map_err(into_calendar_error)?;

        info!(
            from = %from.to_rfc3339(),
            to = %to.to_rfc3339(),
            count = periods.len(),
            "Fetched busy intervals"
        );

        Ok(periods.into_iter().map(BusyInterval::from).collect())
    }

    async fn create_event(&self, appointment: &Appointment) -> BookingResult<String> {
        let created = self
            .call(CreateEvent {
                account: self.account.clone(),
                calendar_id: self.calendar_id.clone(),
                appointment: appointment.clone(),
            })
            .await
            .map_err(into_calendar_error)?;

        Ok(created.link)
    }
}

/// Anything that goes wrong talking to the provider is a calendar failure
/// from the booking pipeline's point of view.
fn into_calendar_error(e: BookingError) -> BookingError {
    match e {
        BookingError::CalendarService(_) => e,
        other => BookingError::CalendarService(other.to_string()),
    }
}

fn binary_path(provider: &str) -> BookingResult<PathBuf> {
    let binary_name = format!("appointer-provider-{provider}");
    which::which(&binary_name).map_err(|_| {
        BookingError::ProviderNotInstalled(format!(
            "{provider}. Install it with:\n  cargo install {binary_name}"
        ))
    })
}

/// The provider process is killed if `limit` runs out.
async fn call_with_timeout<P: Serialize, R: DeserializeOwned>(
    binary: &Path,
    command: Command,
    params: P,
    limit: Duration,
) -> BookingResult<R> {
    timeout(limit, call_raw(binary, command, params))
        .await
        .map_err(|_| BookingError::ProviderTimeout(limit.as_secs()))?
}

async fn call_raw<P: Serialize, R: DeserializeOwned>(
    binary: &Path,
    command: Command,
    params: P,
) -> BookingResult<R> {
    let params =
        serde_json::to_value(params).map_err(|e| BookingError::Serialization(e.to_string()))?;
    let request_json = serde_json::to_string(&Request { command, params })
        .map_err(|e| BookingError::Serialization(e.to_string()))?;

    debug!(binary = %binary.display(), command = ?command, "Calling provider");

    let mut child = TokioCommand::new(binary)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            BookingError::CalendarService(format!("Failed to spawn {}: {e}", binary.display()))
        })?;

    let mut stdin = child.stdin.take().ok_or_else(|| {
        BookingError::CalendarService("Provider stdin was not captured".to_string())
    })?;
    stdin.write_all(format!("{request_json}\n").as_bytes()).await?;
    drop(stdin);

    let output = child.wait_with_output().await?;

    if !output.status.success() {
        return Err(BookingError::CalendarService(format!(
            "Provider exited with status: {}",
            output.status.code().unwrap_or(-1)
        )));
    }

    parse_response(&String::from_utf8_lossy(&output.stdout))
}

fn parse_response<R: DeserializeOwned>(raw: &str) -> BookingResult<R> {
    let line = raw.lines().find(|l| !l.trim().is_empty()).ok_or_else(|| {
        BookingError::CalendarService("Provider returned no response".to_string())
    })?;

    let response: Response<R> = serde_json::from_str(line).map_err(|e| {
        BookingError::CalendarService(format!("Failed to parse provider response: {e}"))
    })?;

    match response {
        Response::Success { data } => Ok(data),
        Response::Error { error } => Err(BookingError::CalendarService(error)),
    }
}
