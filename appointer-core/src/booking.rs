//! Drives a request from raw text to a booked appointment.

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use tracing::{error, info, warn};

use crate::calendar::{Appointment, CalendarService};
use crate::channel::InteractionChannel;
use crate::config::AppointerConfig;
use crate::constants::{APPOINTMENT_TITLE, DEFAULT_LOCATION};
use crate::dialog::{DialogState, confirm};
use crate::error::BookingResult;
use crate::parse::parse_event;
use crate::request::EventRequest;
use crate::slot::{BusyInterval, find_slot};
use crate::time::today;

const GREETING: &str = "Hello. How may I assist you?";
const ASK_NAME: &str = "What's your name please?";
const BOOKED: &str = "Your appointment was booked successfully. Thank you.";
const HANDOVER: &str =
    "We could not handle your request. One of our assistants will call you shortly";
const NAME_PREFIX: &str = "my name is";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Booked { link: String },
    /// The caller did not accept a proposal; a human has to follow up.
    Escalated,
    /// No acceptable slot could be proposed.
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingSettings {
    pub title: String,
    pub location: String,
    pub max_rounds: u32,
    pub strict_slots: bool,
    pub request_secs: u64,
    pub answer_secs: u64,
    pub name_secs: u64,
    pub attendee_email: Option<String>,
}

impl Default for BookingSettings {
    fn default() -> Self {
        BookingSettings::from(&AppointerConfig::default())
    }
}

impl From<&AppointerConfig> for BookingSettings {
    fn from(config: &AppointerConfig) -> Self {
        BookingSettings {
            title: APPOINTMENT_TITLE.to_string(),
            location: if config.location.is_empty() {
                DEFAULT_LOCATION.to_string()
            } else {
                config.location.clone()
            },
            max_rounds: config.max_rounds.max(1),
            strict_slots: config.strict_slots,
            request_secs: config.listen.request_secs,
            answer_secs: config.listen.answer_secs,
            name_secs: config.listen.name_secs,
            attendee_email: None,
        }
    }
}

/// Owns the calendar and channel for one booking conversation.
pub struct BookingPipeline<C, I> {
    calendar: C,
    channel: I,
    settings: BookingSettings,
}

impl<C: CalendarService, I: InteractionChannel> BookingPipeline<C, I> {
    pub fn new(calendar: C, channel: I, settings: BookingSettings) -> Self {
        BookingPipeline {
            calendar,
            channel,
            settings,
        }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn channel(&self) -> &I {
        &self.channel
    }

    /// Full phone-style conversation: greet, take the request, book it and
    /// tell the caller how it went.
    pub async fn handle_call(&mut self) -> BookingResult<BookingOutcome> {
        self.channel.speak(GREETING).await?;
        let text = self.channel.listen(self.settings.request_secs).await?;
        info!(text = %text.trim(), "Caller request");

        let outcome = self.run(&text).await?;

        match outcome {
            BookingOutcome::Booked { .. } => self.channel.speak(BOOKED).await?,
            BookingOutcome::Escalated | BookingOutcome::Rejected => {
                self.channel.speak(HANDOVER).await?
            }
        }

        Ok(outcome)
    }

    pub async fn run(&mut self, raw_text: &str) -> BookingResult<BookingOutcome> {
        self.run_on(raw_text, today()).await
    }

    /// Like [`Self::run`], with relative dates resolved against `today`.
    pub async fn run_on(
        &mut self,
        raw_text: &str,
        today: NaiveDate,
    ) -> BookingResult<BookingOutcome> {
        let request = parse_event(raw_text, today)?;
        self.submit(request).await
    }

    /// Book a parsed request, negotiating a slot first if it is still flexible.
    pub async fn submit(&mut self, request: EventRequest) -> BookingResult<BookingOutcome> {
        info!(request = %request, "Interpreted request");

        if request.is_well_defined() {
            let link = self.book(&request, None).await?;
            return Ok(BookingOutcome::Booked { link });
        }

        let Some(request) = self.disambiguate(request).await? else {
            return Ok(BookingOutcome::Rejected);
        };

        if !request.is_well_defined() {
            info!(request = %request, "No proposal accepted, escalating");
            return Ok(BookingOutcome::Escalated);
        }

        self.channel.speak(ASK_NAME).await?;
        let answer = self.channel.listen(self.settings.name_secs).await?;
        let name = attendee_name(&answer);

        let link = self.book(&request, name.as_deref()).await?;
        Ok(BookingOutcome::Booked { link })
    }

    /// Propose free slots until one is accepted or the round budget runs out.
    ///
    /// Returns `None` when strict slots are enabled and no proposal fits.
    async fn disambiguate(&mut self, request: EventRequest) -> BookingResult<Option<EventRequest>> {
        let (window_start, window_end) = request.search_window()?;
        let duration = request.duration.to_duration();

        let mut busy = self
            .calendar
            .list_events(&window_start, &window_end)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to list busy intervals"))?;

        let mut request = request;

        for round in 1..=self.settings.max_rounds {
            let slot = find_slot(window_start, window_end, duration, &busy);

            if self.settings.strict_slots && !slot.is_validated() && slot.overruns(&window_end, duration)
            {
                warn!(start = %slot.start.to_rfc3339(), "No slot fits the window");
                return Ok(None);
            }

            info!(
                round,
                start = %slot.start.to_rfc3339(),
                validated = slot.is_validated(),
                "Proposing slot"
            );

            let (next, state) =
                confirm(request, &slot.start, &mut self.channel, self.settings.answer_secs).await?;
            request = next;

            if state == DialogState::Confirmed {
                break;
            }

            exclude_declined(&mut busy, slot.start, duration);
        }

        Ok(Some(request))
    }

    async fn book(&self, request: &EventRequest, attendee: Option<&str>) -> BookingResult<String> {
        let appointment = Appointment::new(
            &self.settings.title,
            attendee,
            &self.settings.location,
            &request.start()?,
            &request.end()?,
        )
        .with_attendee_email(self.settings.attendee_email.clone());

        match self.calendar.create_event(&appointment).await {
            Ok(link) => {
                info!(summary = %appointment.summary, link = %link, "Appointment booked");
                Ok(link)
            }
            Err(e) => {
                error!(summary = %appointment.summary, error = %e, "Failed to book appointment");
                Err(e)
            }
        }
    }
}

/// Treat a declined proposal as busy so the next round moves past it.
fn exclude_declined(busy: &mut Vec<BusyInterval>, start: DateTime<Tz>, duration: Duration) {
    let declined = BusyInterval {
        start,
        end: start + duration,
        summary: "Declined proposal".to_string(),
    };
    let pos = busy.partition_point(|b| b.start <= declined.start);
    busy.insert(pos, declined);
}

/// Extract a name from an answer like "My name is Alex."
fn attendee_name(answer: &str) -> Option<String> {
    let answer = answer.trim();
    let name = match answer.get(..NAME_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(NAME_PREFIX) => &answer[NAME_PREFIX.len()..],
        _ => answer,
    };

    let name = name.trim().trim_end_matches(['.', '!']).trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
