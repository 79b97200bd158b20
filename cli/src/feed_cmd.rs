use anyhow::Result;
use anyhow::bail;
use tandem_feed::DEFAULT_FEED_LIMIT;
use tandem_feed::FeedSession;
use tandem_feed::LoadOutcome;
use tandem_protocol::FeedFilter;
use tandem_protocol::FeedItem;
use tandem_protocol::SortKey;
use tandem_protocol::SortOrder;
use time::format_description::well_known::Rfc3339;

use crate::auth;

#[derive(Debug, clap::Parser)]
pub struct FeedArgs {
    /// Filter by category; repeat for multiple categories.
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Filter by tag; repeat for multiple tags.
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Free-text search query.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort field: created_at, updated_at or confidence.
    #[arg(long, value_name = "FIELD")]
    pub sort_by: Option<String>,

    /// Sort direction: asc or desc.
    #[arg(long, value_name = "DIR")]
    pub sort_order: Option<String>,

    /// Only insights at or above this confidence.
    #[arg(long)]
    pub min_confidence: Option<f32>,

    /// Only favorited insights.
    #[arg(long)]
    pub favorites_only: bool,

    /// Only actionable insights.
    #[arg(long)]
    pub actionable_only: bool,

    /// Page size.
    #[arg(long, default_value_t = DEFAULT_FEED_LIMIT)]
    pub limit: u64,

    /// Keep paging until the feed is exhausted.
    #[arg(long)]
    pub all: bool,

    /// Emit raw JSON instead of a rendered listing.
    #[arg(long)]
    pub json: bool,
}

pub fn build_filter(args: &FeedArgs) -> Result<FeedFilter> {
    let sort_by = match args.sort_by.as_deref() {
        None => None,
        Some("created_at") => Some(SortKey::CreatedAt),
        Some("updated_at") => Some(SortKey::UpdatedAt),
        Some("confidence") => Some(SortKey::Confidence),
        Some(other) => bail!("unknown sort field `{other}`"),
    };
    let sort_order = match args.sort_order.as_deref() {
        None => None,
        Some("asc") => Some(SortOrder::Asc),
        Some("desc") => Some(SortOrder::Desc),
        Some(other) => bail!("unknown sort direction `{other}`"),
    };
    Ok(FeedFilter {
        categories: args.categories.clone(),
        tags: args.tags.clone(),
        search: args.search.clone(),
        sort_by,
        sort_order,
        min_confidence: args.min_confidence,
        favorites_only: args.favorites_only,
        actionable_only: args.actionable_only,
        created_after: None,
        created_before: None,
    })
}

pub async fn run(args: FeedArgs) -> Result<()> {
    let filter = build_filter(&args)?;
    let client = auth::build_client()?;
    let session = FeedSession::with_limit(client, filter, args.limit);

    if session.load().await == LoadOutcome::Failed {
        return Err(session_error(&session));
    }
    if args.all {
        while session.snapshot().has_more {
            if session.load_more().await == LoadOutcome::Failed {
                return Err(session_error(&session));
            }
        }
    }

    let snapshot = session.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot.items)?);
        return Ok(());
    }

    for item in &snapshot.items {
        println!("{}", render_line(item));
    }
    println!(
        "showing {count} of {total}",
        count = snapshot.items.len(),
        total = snapshot.total_count
    );
    if let Some(facets) = &snapshot.facets
        && !facets.categories.is_empty()
    {
        let rendered: Vec<String> = facets
            .categories
            .iter()
            .map(|(name, count)| format!("{name} ({count})"))
            .collect();
        println!("categories: {}", rendered.join(", "));
    }
    Ok(())
}

fn session_error(session: &FeedSession) -> anyhow::Error {
    let message = session
        .snapshot()
        .last_error
        .unwrap_or_else(|| "feed fetch failed".to_string());
    anyhow::anyhow!(message)
}

fn render_line(item: &FeedItem) -> String {
    let date = item
        .effective_date()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "-".to_string());
    let kind = match item {
        FeedItem::Insight(_) => "insight",
        FeedItem::Reflection(_) => "reflection",
    };
    format!("{date}  {kind:<10}  {title}", title = item.title())
}
