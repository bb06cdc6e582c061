use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod plan;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "3333")]
        port: String,
    },
    /// Start a chat session with Sprout
    Chat {},
    /// Generate a garden plan
    Plan {
        /// Terrace size, e.g. "10x12 ft"
        #[arg(long, default_value = "10x12 ft")]
        size: String,

        /// Sunlight exposure, e.g. "6-8 hours (Full Sun)"
        #[arg(long, default_value = "6-8 hours (Full Sun)")]
        sunlight: String,

        /// Geographic location (city, country)
        #[arg(long, default_value = "New York, USA")]
        location: String,

        /// What the garden should primarily be
        #[arg(long, default_value = "low-maintenance and edible plants")]
        preference: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Chat {}) => {
            chat::run().await?;
        }
        Some(Command::Plan {
            size,
            sunlight,
            location,
            preference,
        }) => {
            plan::run(size, sunlight, location, preference).await?;
        }
        None => {}
    }

    Ok(())
}
