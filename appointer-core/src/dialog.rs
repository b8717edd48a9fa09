//! Propose/confirm exchange that turns a flexible request into a fixed one.

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::info;

use crate::channel::InteractionChannel;
use crate::error::BookingResult;
use crate::request::EventRequest;
use crate::time::format_clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Proposed,
    Confirmed,
    Declined,
}

impl DialogState {
    /// Transition out of `Proposed` based on the caller's answer.
    pub fn answer(self, answer: &str) -> DialogState {
        match self {
            DialogState::Proposed if is_affirmative(answer) => DialogState::Confirmed,
            DialogState::Proposed => DialogState::Declined,
            settled => settled,
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.to_lowercase().contains("yes")
}

/// Propose `proposed` to the caller and wait for one answer.
///
/// On confirmation the request is fixed to the proposed start. Any other
/// answer, including silence, hands the request back untouched.
pub async fn confirm<I: InteractionChannel>(
    mut request: EventRequest,
    proposed: &DateTime<Tz>,
    channel: &mut I,
    listen_secs: u64,
) -> BookingResult<(EventRequest, DialogState)> {
    channel
        .speak(&format!("Would {} work for you?", format_clock(proposed)))
        .await?;

    let answer = channel.listen(listen_secs).await?;
    let state = DialogState::Proposed.answer(&answer);

    info!(answer = %answer.trim(), state = ?state, "Caller answered proposal");

    if state == DialogState::Confirmed {
        request.fix_start(proposed);
    }

    Ok((request, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TIME_ZONE;
    use crate::error::BookingError;
    use crate::request::MeetingDuration;
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedChannel {
        answers: VecDeque<String>,
        spoken: Vec<String>,
        listened: Vec<u64>,
    }

    impl ScriptedChannel {
        fn answering(answers: &[&str]) -> Self {
            ScriptedChannel {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl InteractionChannel for ScriptedChannel {
        async fn speak(&mut self, text: &str) -> BookingResult<()> {
            self.spoken.push(text.to_string());
            Ok(())
        }

        async fn listen(&mut self, duration_secs: u64) -> BookingResult<String> {
            self.listened.push(duration_secs);
            self.answers
                .pop_front()
                .ok_or_else(|| BookingError::Channel("no audio recorded".to_string()))
        }
    }

    fn morning_request() -> EventRequest {
        EventRequest {
            date: NaiveDate::from_ymd_opt(2025, 3, 21),
            time_of_day: NaiveTime::from_hms_opt(8, 0, 0),
            duration: MeetingDuration::default(),
            flex_window_hours: Some(4),
            utc_offset: None,
        }
    }

    fn proposed() -> DateTime<Tz> {
        TIME_ZONE.with_ymd_and_hms(2025, 3, 21, 9, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn yes_fixes_the_request() {
        let mut channel = ScriptedChannel::answering(&["Yes that works"]);

        let (req, state) = confirm(morning_request(), &proposed(), &mut channel, 2)
            .await
            .unwrap();

        assert_eq!(state, DialogState::Confirmed);
        assert!(req.is_well_defined());
        assert_eq!(req.time_of_day, NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(channel.spoken, vec!["Would 09:30 AM work for you?"]);
        assert_eq!(channel.listened, vec![2]);
    }

    #[tokio::test]
    async fn other_answers_leave_request_untouched() {
        for answer in ["no thanks", "", "what did you say?"] {
            let mut channel = ScriptedChannel::answering(&[answer]);

            let (req, state) = confirm(morning_request(), &proposed(), &mut channel, 2)
                .await
                .unwrap();

            assert_eq!(state, DialogState::Declined);
            assert_eq!(req, morning_request());
            assert_eq!(req.flex_window_hours, Some(4));
        }
    }

    #[tokio::test]
    async fn channel_failure_is_not_a_decline() {
        let mut channel = ScriptedChannel::default();

        let result = confirm(morning_request(), &proposed(), &mut channel, 2).await;

        assert!(matches!(result, Err(BookingError::Channel(_))));
    }

    #[test]
    fn settled_states_do_not_move() {
        assert_eq!(DialogState::Proposed.answer("YES!"), DialogState::Confirmed);
        assert_eq!(DialogState::Declined.answer("yes"), DialogState::Declined);
        assert_eq!(DialogState::Confirmed.answer("no"), DialogState::Confirmed);
    }
}
