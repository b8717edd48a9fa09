//! The caller-facing side of a booking: something that can talk and listen.

use crate::error::BookingResult;

/// Blocking speak/listen exchange with the caller.
///
/// Implementations report failures as [`crate::error::BookingError::Channel`].
#[allow(async_fn_in_trait)]
pub trait InteractionChannel {
    /// Say `text` and return once playback has finished.
    async fn speak(&mut self, text: &str) -> BookingResult<()>;

    /// Record for `duration_secs` seconds and return the transcription.
    async fn listen(&mut self, duration_secs: u64) -> BookingResult<String>;
}
