use appointer_core::channel::InteractionChannel;
use appointer_core::error::{BookingError, BookingResult};
use dialoguer::Input;
use owo_colors::OwoColorize;

/// Terminal stand-in for a phone line: spoken text is printed and each
/// listen reads one line.
#[derive(Default)]
pub struct ConsoleChannel;

impl InteractionChannel for ConsoleChannel {
    async fn speak(&mut self, text: &str) -> BookingResult<()> {
        println!("{} {}", "appointer:".cyan().bold(), text);
        Ok(())
    }

    async fn listen(&mut self, duration_secs: u64) -> BookingResult<String> {
        let prompt = format!("you ({duration_secs}s)");

        tokio::task::spawn_blocking(move || {
            Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
        })
        .await
        .map_err(|e| BookingError::Channel(e.to_string()))?
        .map_err(|e| BookingError::Channel(e.to_string()))
    }
}
