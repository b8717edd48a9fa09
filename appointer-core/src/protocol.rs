//! JSON protocol spoken between appointer and provider binaries over
//! stdin/stdout, one request and one response per line.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::calendar::Appointment;

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Authenticate,
    ListEvents,
    CreateEvent,
}

/// Request sent from appointer to provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from provider to appointer.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap_or_else(|e| {
            Response::<()>::error(&format!("Failed to serialize response: {e}"))
        })
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::json!({ "status": "error", "error": msg }).to_string()
    }
}

/// Run the provider's interactive login. Responds with the account identifier.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Authenticate {}

impl ProviderCommand for Authenticate {
    type Response = String;
    fn command() -> Command {
        Command::Authenticate
    }
}

/// A busy period as reported by a provider.
///
/// Timestamps must carry an explicit offset; naive values fail to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyPeriod {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(default)]
    pub summary: String,
}

/// List busy periods overlapping `[from, to]`, ordered by start.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEvents {
    pub account: String,
    pub calendar_id: String,
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
    pub max_results: u32,
}

impl ProviderCommand for ListEvents {
    type Response = Vec<BusyPeriod>;
    fn command() -> Command {
        Command::ListEvents
    }
}

/// Create a new appointment.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    pub account: String,
    pub calendar_id: String,
    pub appointment: Appointment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedEvent {
    /// Link to the event in the provider's web UI.
    pub link: String,
}

impl ProviderCommand for CreateEvent {
    type Response = CreatedEvent;
    fn command() -> Command {
        Command::CreateEvent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_is_tagged() {
        let raw = Response::error("boom");
        let parsed: Response<CreatedEvent> = serde_json::from_str(&raw).unwrap();

        assert!(matches!(parsed, Response::Error { error } if error == "boom"));
    }

    #[test]
    fn busy_period_requires_offset() {
        let zoned = r#"{"start":"2025-03-21T09:00:00+01:00","end":"2025-03-21T09:30:00+01:00","summary":"Checkup"}"#;
        let naive = r#"{"start":"2025-03-21T09:00:00","end":"2025-03-21T09:30:00","summary":"Checkup"}"#;

        assert!(serde_json::from_str::<BusyPeriod>(zoned).is_ok());
        assert!(serde_json::from_str::<BusyPeriod>(naive).is_err());
    }

    #[test]
    fn command_names_are_snake_case() {
        let request = Request {
            command: ListEvents::command(),
            params: serde_json::Value::Null,
        };

        let raw = serde_json::to_string(&request).unwrap();
        assert!(raw.contains("\"list_events\""));
    }
}
