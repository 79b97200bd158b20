use tandem_protocol::FeedItem;
use time::OffsetDateTime;
use uuid::Uuid;

/// Upper bound on the candidate snapshot. One page this size covers every
/// realistic journey; anchors beyond it fall out as benign not-found.
pub const NAV_FETCH_LIMIT: u64 = 100;

/// Lightweight summary the navigator orders and scans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationEntry {
    pub id: Uuid,
    pub date: OffsetDateTime,
    pub title: String,
}

/// Filters to navigable items, maps them to summaries and sorts by
/// effective date descending. Equal dates fall back to id order so a
/// rebuilt snapshot lands in the same sequence.
pub fn build_entries(items: Vec<FeedItem>) -> Vec<NavigationEntry> {
    let mut entries: Vec<NavigationEntry> = items
        .into_iter()
        .filter(FeedItem::has_insight)
        .map(|item| NavigationEntry {
            id: item.id(),
            date: item.effective_date(),
            title: item.title().to_string(),
        })
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    entries
}

/// Position of the anchor in the snapshot, if it made it in.
pub fn locate(entries: &[NavigationEntry], anchor: Uuid) -> Option<usize> {
    entries.iter().position(|entry| entry.id == anchor)
}
