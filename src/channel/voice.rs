use std::process::Stdio;

use appointer_core::channel::InteractionChannel;
use appointer_core::config::VoiceConfig;
use appointer_core::error::{BookingError, BookingResult};
use tokio::process::Command;
use tracing::debug;

/// Speech through external programs.
///
/// `speak_command` gets the text as its last argument, `listen_command` the
/// recording length in seconds and prints what it heard on stdout. Both run
/// through `sh -c`, so they can be pipelines. A command that cannot start or
/// exits non-zero is a channel error; empty output is silence.
pub struct VoiceChannel {
    speak_command: String,
    listen_command: String,
}

impl VoiceChannel {
    pub fn new(speak_command: &str, listen_command: &str) -> Self {
        VoiceChannel {
            speak_command: speak_command.to_string(),
            listen_command: listen_command.to_string(),
        }
    }

    pub fn from_config(config: &VoiceConfig) -> BookingResult<Self> {
        match (&config.speak_command, &config.listen_command) {
            (Some(speak), Some(listen)) => Ok(VoiceChannel::new(speak, listen)),
            _ => Err(BookingError::Config(
                "Voice mode needs voice.speak_command and voice.listen_command in config.toml"
                    .to_string(),
            )),
        }
    }
}

async fn run_with_arg(command: &str, arg: &str) -> BookingResult<String> {
    debug!(command, arg, "running voice command");

    let output = Command::new("sh")
        .arg("-c")
        .arg(format!("{command} \"$1\""))
        .arg("appointer")
        .arg(arg)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .await
        .map_err(|e| BookingError::Channel(format!("Failed to run '{command}': {e}")))?;

    if !output.status.success() {
        return Err(BookingError::Channel(format!(
            "'{command}' exited with {}",
            output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

impl InteractionChannel for VoiceChannel {
    async fn speak(&mut self, text: &str) -> BookingResult<()> {
        run_with_arg(&self.speak_command, text).await.map(|_| ())
    }

    /// A silent caller comes back as an empty answer.
    async fn listen(&mut self, duration_secs: u64) -> BookingResult<String> {
        run_with_arg(&self.listen_command, &duration_secs.to_string()).await
    }
}
