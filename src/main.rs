mod channel;
mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "appointer")]
#[command(about = "Book appointments from spoken or typed requests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Auth {
        provider: String, // e.g. "google"
    },
    /// Show how a request would be understood, without booking anything
    Parse {
        text: String,

        /// Print the request as JSON
        #[arg(long)]
        json: bool,
    },
    /// Book an appointment; without TEXT, run a full call
    Book {
        text: Option<String>,

        /// Talk through the configured speak/listen commands instead of the terminal
        #[arg(long)]
        voice: bool,

        /// Invite this address to the created event
        #[arg(long)]
        email: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("appointer=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Auth { provider } => commands::auth::run(&provider).await,
        Commands::Parse { text, json } => commands::parse::run(&text, json),
        Commands::Book { text, voice, email } => {
            commands::book::run(text.as_deref(), voice, email).await
        }
    }
}
