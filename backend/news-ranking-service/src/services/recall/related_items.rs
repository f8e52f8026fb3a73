use super::ContentModel;
use std::sync::Arc;
use tracing::debug;

/// "Related articles" for a single item, straight from the content index.
///
/// Asks the index for `top_n + 1` neighbours and drops the first one, which is
/// the query item itself. `nearest_to_row` pins the query row to the front of
/// any distance-0 tie, so an identical TF-IDF vector under a different id is
/// kept as a related item rather than dropped in place of the query.
pub struct RelatedItemsLookup {
    content: Arc<ContentModel>,
}

impl RelatedItemsLookup {
    pub fn new(content: Arc<ContentModel>) -> Self {
        Self { content }
    }

    /// Up to `top_n` related item ids, closest first. Unknown ids yield an empty list.
    pub fn related(&self, item_id: &str, top_n: usize) -> Vec<String> {
        let Some(row) = self.content.row_of(item_id) else {
            debug!(item_id = %item_id, "Related lookup for unknown item");
            return Vec::new();
        };

        let neighbors = self.content.index().nearest_to_row(row, top_n.saturating_add(1));

        neighbors
            .into_iter()
            .skip(1)
            .filter_map(|n| self.content.item_at(n.index).map(str::to_string))
            .collect()
    }
}
