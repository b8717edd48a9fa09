use anyhow::{Context, Result};
use appointer_core::protocol::{BusyPeriod, ListEvents};
use google_calendar::types::OrderBy;
use tracing::debug;

use crate::convert::busy_period_from_google;
use crate::session::Session;

pub async fn handle(cmd: ListEvents) -> Result<Vec<BusyPeriod>> {
    let client = Session::load_valid(&cmd.account).await?.client()?;

    let time_min = cmd.from.to_rfc3339();
    let time_max = cmd.to.to_rfc3339();

    let response = client
        .events()
        .list_all(
            &cmd.calendar_id,
            "",
            0,
            OrderBy::StartTime,
            &[],
            "",
            &[],
            false,
            false,
            true, // expand recurring events so each occurrence blocks its own time
            &time_max,
            &time_min,
            "",
            "",
        )
        .await
        .context("Failed to fetch events")?;

    let mut busy = Vec::new();
    for event in response.body.iter().take(cmd.max_results as usize) {
        match busy_period_from_google(event)? {
            Some(period) => busy.push(period),
            None => debug!(summary = %event.summary, "skipping non-blocking event"),
        }
    }

    busy.sort_by_key(|period| period.start);

    Ok(busy)
}
