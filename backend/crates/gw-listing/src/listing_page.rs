use crate::{Cursor, Resource};

use serde::{Deserialize, Serialize};

/// One page of a listing, exactly as returned to (and cached for) clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub products: Vec<Resource>,
    /// `null` once the listing is exhausted
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// Resources matching search and filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// All of the tenant's resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_all_count: Option<u64>,
}

impl ListingPage {
    pub fn with_counts(mut self, total_count: u64, total_all_count: u64) -> Self {
        self.total_count = Some(total_count);
        self.total_all_count = Some(total_all_count);
        self
    }
}

/// Cut `rows` (fetched with `limit + 1`) down to a page.
///
/// The look-ahead row only signals that more data exists; it is dropped and
/// the cursor points at the last row actually returned.
pub fn paginate(mut rows: Vec<Resource>, limit: usize) -> ListingPage {
    let next_cursor = if rows.len() > limit {
        rows.truncate(limit);
        rows.last().map(|last| Cursor::after(last).encode())
    } else {
        None
    };

    ListingPage {
        products: rows,
        next_cursor,
        total_count: None,
        total_all_count: None,
    }
}
