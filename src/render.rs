//! Colored terminal rendering for appointer-core types.

use appointer_core::{BookingOutcome, EventRequest};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventRequest {
    fn render(&self) -> String {
        let unset = || "-".dimmed().to_string();

        let date = self
            .date
            .map(|d| d.format("%A %d %B %Y").to_string())
            .unwrap_or_else(unset);
        let time = self
            .time_of_day
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(unset);
        let window = match self.flex_window_hours {
            Some(0) => "exact".to_string(),
            Some(hours) => format!("{hours}h"),
            None => unset(),
        };

        let mut lines = vec![
            format!("  {}     {}", "Date".bold(), date),
            format!("  {}     {}", "Time".bold(), time),
            format!("  {} {}h{:02}m", "Duration".bold(), self.duration.hours, self.duration.minutes),
            format!("  {}   {}", "Window".bold(), window),
        ];

        if !self.is_well_defined() {
            lines.push(format!("  {}", "A time will be negotiated with the caller".dimmed()));
        }

        lines.join("\n")
    }
}

impl Render for BookingOutcome {
    fn render(&self) -> String {
        match self {
            BookingOutcome::Booked { link } => {
                format!("{} {}", "Booked:".green(), link.underline())
            }
            BookingOutcome::Escalated => {
                "Caller declined the proposal, an assistant has to call back".yellow().to_string()
            }
            BookingOutcome::Rejected => "No fitting slot found".red().to_string(),
        }
    }
}
