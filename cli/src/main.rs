mod auth;
mod check_cmd;
mod documents_cmd;
mod feed_cmd;
mod insights_cmd;
mod relationships_cmd;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Command-line client for the Tandem coaching platform.
#[derive(Debug, clap::Parser)]
#[command(name = "tandem", version)]
struct TandemCli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Probe the backend and report reachability.
    Check(check_cmd::CheckArgs),
    /// Browse the journey feed.
    Feed(feed_cmd::FeedArgs),
    /// Show an insight's position in the journey and move to neighbors.
    Insights(insights_cmd::InsightsArgs),
    /// List coaching relationships or answer an invitation.
    Relationships(relationships_cmd::RelationshipsCli),
    /// List or upload documents.
    Documents(documents_cmd::DocumentsCli),
    /// Store an API token for subsequent commands.
    Login(auth::LoginArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = TandemCli::parse();
    match cli.command {
        Command::Check(args) => check_cmd::run(args).await,
        Command::Feed(args) => feed_cmd::run(args).await,
        Command::Insights(args) => insights_cmd::run(args).await,
        Command::Relationships(args) => relationships_cmd::run(args).await,
        Command::Documents(args) => documents_cmd::run(args).await,
        Command::Login(args) => auth::run_login(args),
    }
}
