//! Ways of talking to the caller.

mod console;
mod voice;

pub use console::ConsoleChannel;
pub use voice::VoiceChannel;
