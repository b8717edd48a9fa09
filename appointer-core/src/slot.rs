//! Free-slot search over a flexible window.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use tracing::{debug, warn};

/// An existing calendar entry that constrains the search.
#[derive(Debug, Clone, PartialEq)]
pub struct BusyInterval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub summary: String,
}

/// How the resolver arrived at its candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSource {
    /// A gap of at least the requested duration was found before a busy interval.
    Gap,
    /// The scan ran out of intervals; the candidate was never checked against
    /// the window end or the space after the last interval.
    Fallback,
}

/// Candidate start time produced by [`find_slot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposedSlot {
    pub start: DateTime<Tz>,
    pub source: SlotSource,
}

impl ProposedSlot {
    pub fn is_validated(&self) -> bool {
        self.source == SlotSource::Gap
    }

    /// Whether a meeting starting here would end after `window_end`.
    pub fn overruns(&self, window_end: &DateTime<Tz>, duration: Duration) -> bool {
        self.start + duration > *window_end
    }
}

/// Single pass over `busy` (sorted by start) looking for the first gap of at
/// least `duration` after `window_start`.
///
/// When no gap is found the scan cursor is returned as a
/// [`SlotSource::Fallback`] candidate: the latest busy end seen, or
/// `window_start` when nothing is busy. It may not fit the window.
pub fn find_slot(
    window_start: DateTime<Tz>,
    window_end: DateTime<Tz>,
    duration: Duration,
    busy: &[BusyInterval],
) -> ProposedSlot {
    let mut cursor = window_start;

    for interval in busy {
        let gap = interval.start - cursor;
        debug!(
            summary = %interval.summary,
            gap_minutes = gap.num_minutes(),
            "Checking gap before busy interval"
        );

        if gap >= duration {
            return ProposedSlot {
                start: cursor,
                source: SlotSource::Gap,
            };
        }

        cursor = cursor.max(interval.end);
    }

    let slot = ProposedSlot {
        start: cursor,
        source: SlotSource::Fallback,
    };

    if slot.overruns(&window_end, duration) {
        warn!(
            start = %slot.start.to_rfc3339(),
            window_end = %window_end.to_rfc3339(),
            "Fallback slot does not fit the search window"
        );
    }

    slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TIME_ZONE;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Tz> {
        TIME_ZONE
            .with_ymd_and_hms(2025, 3, 21, hour, minute, 0)
            .unwrap()
    }

    fn busy(from: (u32, u32), to: (u32, u32), summary: &str) -> BusyInterval {
        BusyInterval {
            start: at(from.0, from.1),
            end: at(to.0, to.1),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn no_busy_intervals_returns_window_start() {
        let slot = find_slot(at(8, 0), at(12, 0), Duration::minutes(30), &[]);

        assert_eq!(slot.start, at(8, 0));
        assert_eq!(slot.source, SlotSource::Fallback);
        assert!(!slot.overruns(&at(12, 0), Duration::minutes(30)));
    }

    #[test]
    fn interval_at_window_start_pushes_cursor_to_its_end() {
        let intervals = [busy((9, 0), (9, 30), "Checkup")];
        let slot = find_slot(at(9, 0), at(13, 0), Duration::minutes(30), &intervals);

        assert_eq!(slot.start, at(9, 30));
        assert!(!slot.is_validated());
    }

    #[test]
    fn first_sufficient_gap_wins() {
        let intervals = [
            busy((8, 0), (8, 45), "A"),
            busy((9, 0), (10, 0), "B"),
            busy((11, 0), (11, 30), "C"),
        ];
        let slot = find_slot(at(8, 0), at(12, 0), Duration::minutes(30), &intervals);

        // 08:45-09:00 is too short, 10:00-11:00 fits
        assert_eq!(slot.start, at(10, 0));
        assert!(slot.is_validated());
    }

    #[test]
    fn exact_fit_counts_as_gap() {
        let intervals = [busy((8, 30), (9, 0), "A")];
        let slot = find_slot(at(8, 0), at(12, 0), Duration::minutes(30), &intervals);

        assert_eq!(slot.start, at(8, 0));
        assert_eq!(slot.source, SlotSource::Gap);
    }

    #[test]
    fn overlapping_intervals_never_move_cursor_back() {
        let intervals = [
            busy((8, 0), (10, 0), "Long"),
            busy((8, 30), (9, 0), "Nested"),
        ];
        let slot = find_slot(at(8, 0), at(12, 0), Duration::minutes(30), &intervals);

        assert_eq!(slot.start, at(10, 0));
    }

    #[test]
    fn interval_before_window_is_skipped() {
        let intervals = [busy((7, 0), (7, 30), "Early")];
        let slot = find_slot(at(8, 0), at(12, 0), Duration::minutes(30), &intervals);

        assert_eq!(slot.start, at(8, 0));
    }

    #[test]
    fn fallback_can_overrun_window() {
        let intervals = [busy((8, 0), (11, 50), "Surgery")];
        let slot = find_slot(at(8, 0), at(12, 0), Duration::minutes(30), &intervals);

        assert_eq!(slot.start, at(11, 50));
        assert_eq!(slot.source, SlotSource::Fallback);
        assert!(slot.overruns(&at(12, 0), Duration::minutes(30)));
    }

    #[test]
    fn never_earlier_than_window_start() {
        let lists: Vec<Vec<BusyInterval>> = vec![
            vec![],
            vec![busy((6, 0), (7, 0), "A")],
            vec![busy((6, 0), (9, 0), "A"), busy((9, 10), (9, 20), "B")],
            vec![busy((10, 0), (10, 15), "A"), busy((10, 30), (13, 0), "B")],
        ];

        for intervals in &lists {
            for minutes in [15, 30, 60, 120] {
                let slot = find_slot(at(8, 0), at(12, 0), Duration::minutes(minutes), intervals);
                assert!(slot.start >= at(8, 0));
            }
        }
    }
}
