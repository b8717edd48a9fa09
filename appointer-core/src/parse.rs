//! Turns free-form request text into an `EventRequest`.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::error::{BookingError, BookingResult};
use crate::phrase::{DateMarker, DayPart, DurationPhrase, Phrase, RelativeDay};
use crate::request::EventRequest;

/// Parse `text` relative to `today`.
///
/// Parts of the request that no phrase covers are left unset; callers decide
/// whether the result is complete enough to act on.
pub fn parse_event(text: &str, today: NaiveDate) -> BookingResult<EventRequest> {
    let text = text.to_lowercase();
    let mut request = EventRequest::new();

    if let Some(marker) = DateMarker::find_in(&text) {
        return Err(BookingError::ParseUnsupported(format!(
            "explicit dates (\"{}\") are not supported yet",
            marker.phrase()
        )));
    }

    if let Some(day) = RelativeDay::find_in(&text) {
        request.date = today.checked_add_days(Days::new(day.offset_days()));
    }

    if let Some(phrase) = DurationPhrase::find_in(&text) {
        request.duration = phrase.duration();
    }

    if let Some(part) = DayPart::find_in(&text) {
        request.time_of_day = Some(part.anchor());
        request.flex_window_hours = Some(part.flex_hours());
    }

    debug!(text = %text, request = %request, "Parsed request");

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MeetingDuration;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    fn parse(text: &str) -> EventRequest {
        parse_event(text, today()).unwrap()
    }

    #[test]
    fn tomorrow_morning() {
        let req = parse("Book an appointment tomorrow morning");

        assert_eq!(req.date, NaiveDate::from_ymd_opt(2025, 3, 21));
        assert_eq!(req.time_of_day, NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(req.duration, MeetingDuration::new(0, 30));
        assert_eq!(req.flex_window_hours, Some(4));
        assert!(!req.is_well_defined());
    }

    #[test]
    fn evening_with_word_duration() {
        let req = parse("Today in the evening, one hour");

        assert_eq!(req.date, Some(today()));
        assert_eq!(req.time_of_day, NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(req.duration, MeetingDuration::new(1, 0));
        assert_eq!(req.flex_window_hours, Some(6));
    }

    #[test]
    fn matching_ignores_case() {
        let req = parse("TOMORROW NIGHT, TWO HOURS");

        assert_eq!(req.date, NaiveDate::from_ymd_opt(2025, 3, 21));
        assert_eq!(req.time_of_day, NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(req.duration, MeetingDuration::new(2, 0));
    }

    #[test]
    fn duration_defaults_to_thirty_minutes() {
        assert_eq!(parse("tomorrow morning").duration, MeetingDuration::new(0, 30));
        assert_eq!(parse("").duration, MeetingDuration::new(0, 30));
    }

    #[test]
    fn explicit_date_fails_loudly() {
        let result = parse_event("Can I come on the 3rd of May in the morning", today());
        assert!(matches!(result, Err(BookingError::ParseUnsupported(_))));
    }

    #[test]
    fn explicit_date_wins_over_relative_day() {
        let result = parse_event("tomorrow or on the fifth", today());
        assert!(matches!(result, Err(BookingError::ParseUnsupported(_))));
    }

    #[test]
    fn missing_date_is_left_unset() {
        let req = parse("sometime in the morning");

        assert_eq!(req.date, None);
        assert_eq!(req.flex_window_hours, Some(4));
    }

    #[test]
    fn missing_day_part_is_left_unset() {
        let req = parse("tomorrow please, 1 hour");

        assert_eq!(req.date, NaiveDate::from_ymd_opt(2025, 3, 21));
        assert_eq!(req.time_of_day, None);
        assert_eq!(req.flex_window_hours, None);
        assert!(!req.is_well_defined());
    }

    #[test]
    fn parsing_is_deterministic() {
        let inputs = [
            "Book an appointment tomorrow morning",
            "today afternoon for 2 hours",
            "nothing useful here",
            "tonight, 30 minutes",
        ];

        for text in inputs {
            assert_eq!(parse(text), parse(text), "{text}");
        }
    }
}
