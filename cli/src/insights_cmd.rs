use std::sync::Arc;

use anyhow::Result;
use tandem_navigator::InsightNavigator;
use tandem_navigator::Router;
use uuid::Uuid;

use crate::auth;

#[derive(Debug, clap::Parser)]
pub struct InsightsArgs {
    /// Insight id currently being viewed.
    pub id: Uuid,

    /// Route to the next (older) insight.
    #[arg(long, conflicts_with_all = ["previous", "index"])]
    pub next: bool,

    /// Route to the previous (newer) insight.
    #[arg(long, conflicts_with = "index")]
    pub previous: bool,

    /// Route to this position in the date-ordered list.
    #[arg(long)]
    pub index: Option<usize>,
}

/// Prints the detail route; a shell wrapper or the user follows it.
struct StdoutRouter;

impl Router for StdoutRouter {
    fn push(&self, path: &str) {
        println!("{path}");
    }
}

pub async fn run(args: InsightsArgs) -> Result<()> {
    let client = auth::build_client()?;
    let navigator = InsightNavigator::load(&client, args.id, Arc::new(StdoutRouter)).await?;

    match navigator.current_index() {
        Some(index) => eprintln!(
            "insight {position} of {count}",
            position = index + 1,
            count = navigator.entries().len()
        ),
        None => eprintln!("insight is not in the current journey snapshot"),
    }

    if args.next {
        navigator.navigate_to_next();
    } else if args.previous {
        navigator.navigate_to_previous();
    } else if let Some(index) = args.index {
        navigator.navigate_to_index(index);
    }
    Ok(())
}
