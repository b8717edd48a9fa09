use anyhow::{Context, Result};
use appointer_core::calendar::ProviderCalendar;
use appointer_core::channel::InteractionChannel;
use appointer_core::config::AppointerConfig;
use appointer_core::{BookingOutcome, BookingPipeline, BookingSettings};

use crate::channel::{ConsoleChannel, VoiceChannel};
use crate::render::Render;

pub async fn run(text: Option<&str>, voice: bool, email: Option<String>) -> Result<()> {
    let config = AppointerConfig::load()?;
    let account = config.require_account()?;

    let calendar = ProviderCalendar::new(&config.provider, account, &config.calendar_id);

    let mut settings = BookingSettings::from(&config);
    settings.attendee_email = email;

    let outcome = if voice {
        let channel = VoiceChannel::from_config(&config.voice)?;
        converse(BookingPipeline::new(calendar, channel, settings), text).await?
    } else {
        converse(BookingPipeline::new(calendar, ConsoleChannel::default(), settings), text).await?
    };

    println!("\n{}", outcome.render());

    Ok(())
}

/// Book `text` directly, or hold a whole call when there is none.
async fn converse<I: InteractionChannel>(
    mut pipeline: BookingPipeline<ProviderCalendar, I>,
    text: Option<&str>,
) -> Result<BookingOutcome> {
    let outcome = match text {
        Some(text) => pipeline.run(text).await,
        None => pipeline.handle_call().await,
    };

    outcome.context("Booking failed")
}
