//! Closed phrase vocabularies recognized in a request.
//!
//! Each vocabulary is a small enum listed in declaration order. When a text
//! contains several phrases of the same vocabulary the first declared one
//! wins. The order is deterministic but otherwise arbitrary.

use chrono::NaiveTime;

use crate::request::MeetingDuration;

/// A vocabulary of phrases matched by substring containment.
pub trait Phrase: Copy + 'static {
    /// All variants, in tie-break order.
    const ALL: &'static [Self];

    fn phrase(self) -> &'static str;

    /// First variant whose phrase occurs in `text` (already lowercased).
    fn find_in(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| text.contains(p.phrase()))
    }
}

/// Phrases that name an explicit calendar date. Recognized, never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMarker {
    ExplicitDate,
}

impl Phrase for DateMarker {
    const ALL: &'static [Self] = &[DateMarker::ExplicitDate];

    fn phrase(self) -> &'static str {
        match self {
            DateMarker::ExplicitDate => "on the",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Tomorrow,
}

impl RelativeDay {
    pub fn offset_days(self) -> u64 {
        match self {
            RelativeDay::Today => 0,
            RelativeDay::Tomorrow => 1,
        }
    }
}

impl Phrase for RelativeDay {
    const ALL: &'static [Self] = &[RelativeDay::Today, RelativeDay::Tomorrow];

    fn phrase(self) -> &'static str {
        match self {
            RelativeDay::Today => "today",
            RelativeDay::Tomorrow => "tomorrow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationPhrase {
    ThirtyMinute,
    OneHour,
    OneHourWord,
    TwoHour,
    TwoHourWord,
}

impl DurationPhrase {
    pub fn duration(self) -> MeetingDuration {
        match self {
            DurationPhrase::ThirtyMinute => MeetingDuration::new(0, 30),
            DurationPhrase::OneHour | DurationPhrase::OneHourWord => MeetingDuration::new(1, 0),
            DurationPhrase::TwoHour | DurationPhrase::TwoHourWord => MeetingDuration::new(2, 0),
        }
    }
}

impl Phrase for DurationPhrase {
    const ALL: &'static [Self] = &[
        DurationPhrase::ThirtyMinute,
        DurationPhrase::OneHour,
        DurationPhrase::OneHourWord,
        DurationPhrase::TwoHour,
        DurationPhrase::TwoHourWord,
    ];

    fn phrase(self) -> &'static str {
        match self {
            DurationPhrase::ThirtyMinute => "30 minute",
            DurationPhrase::OneHour => "1 hour",
            DurationPhrase::OneHourWord => "one hour",
            DurationPhrase::TwoHour => "2 hour",
            DurationPhrase::TwoHourWord => "two hour",
        }
    }
}

const MORNING_ANCHOR: NaiveTime = on_the_hour(8);
const NOON_ANCHOR: NaiveTime = on_the_hour(12);
const NIGHT_ANCHOR: NaiveTime = on_the_hour(18);

/// Evaluated at compile time, so a bad hour fails the build.
const fn on_the_hour(hour: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, 0, 0) {
        Some(time) => time,
        None => panic!("anchor hour out of range"),
    }
}

/// Part of the day, with the anchor time and the width of the window that
/// starts there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Noon,
    Evening,
    Afternoon,
    Night,
}

impl DayPart {
    pub fn anchor(self) -> NaiveTime {
        match self {
            DayPart::Morning => MORNING_ANCHOR,
            DayPart::Noon | DayPart::Evening | DayPart::Afternoon => NOON_ANCHOR,
            DayPart::Night => NIGHT_ANCHOR,
        }
    }

    pub fn flex_hours(self) -> u32 {
        match self {
            DayPart::Morning | DayPart::Night => 4,
            DayPart::Noon | DayPart::Evening | DayPart::Afternoon => 6,
        }
    }
}

impl Phrase for DayPart {
    const ALL: &'static [Self] = &[
        DayPart::Morning,
        DayPart::Noon,
        DayPart::Evening,
        DayPart::Afternoon,
        DayPart::Night,
    ];

    fn phrase(self) -> &'static str {
        match self {
            DayPart::Morning => "morning",
            DayPart::Noon => "noon",
            DayPart::Evening => "evening",
            DayPart::Afternoon => "afternoon",
            DayPart::Night => "night",
        }
    }
}
