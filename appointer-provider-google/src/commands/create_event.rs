use anyhow::{Context, Result};
use appointer_core::protocol::{CreateEvent, CreatedEvent};
use google_calendar::types::SendUpdates;
use tracing::info;

use crate::convert::appointment_to_google;
use crate::session::Session;

pub async fn handle(cmd: CreateEvent) -> Result<CreatedEvent> {
    let client = Session::load_valid(&cmd.account).await?.client()?;

    let google_event = appointment_to_google(&cmd.appointment);

    // Only invite when there is someone to invite
    let send_updates = if google_event.attendees.is_empty() {
        SendUpdates::None
    } else {
        SendUpdates::All
    };

    let response = client
        .events()
        .insert(
            &cmd.calendar_id,
            0,
            0,
            false,
            send_updates,
            false,
            &google_event,
        )
        .await
        .with_context(|| format!("Failed to create event: {}", &google_event.summary))?;

    let link = response.body.html_link;
    info!(%link, "event created");

    Ok(CreatedEvent { link })
}
