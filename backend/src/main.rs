use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use course_actions::ActionType;
use course_actions::runner;

/// Run a HubSpot workflow action against a single trigger event
#[derive(Debug, Parser)]
#[command(name = "course-actions", version)]
struct Cli {
    /// Action to run
    #[arg(value_enum)]
    action: ActionType,

    /// Workflow event JSON; read from stdin when omitted
    #[arg(long)]
    event: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout carries only the callback output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let output = runner::run(cli.action, cli.event.as_deref()).await;
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}
