use crate::{Cursor, ListingPage, ListingQuery, Resource, ResourceAuthority, SortColumn, paginate};

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::panic::Location;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use error_location::ErrorLocation;
use gw_core::TenantId;
use gw_rpc::{AuthorityStatus, CallContext, Result as RpcResult, RpcError};

const SERVICE: &str = "products";

/// Resource Authority backed by process memory.
///
/// Behaves like the products backend: search matches names
/// case-insensitively, filter matches the `category` attribute exactly
/// (ignoring case), and pages follow the requested sort with `id` as the
/// tie-break. Serves local development and tests.
#[derive(Default)]
pub struct InMemoryResourceAuthority {
    resources: Mutex<HashMap<TenantId, Vec<Resource>>>,
    calls: AtomicUsize,
}

impl InMemoryResourceAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, tenant: &TenantId, resource: Resource) {
        if let Ok(mut resources) = self.resources.lock() {
            resources.entry(tenant.clone()).or_default().push(resource);
        }
    }

    /// Number of `list` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn snapshot(&self, tenant: &TenantId) -> Vec<Resource> {
        self.resources
            .lock()
            .map(|resources| resources.get(tenant).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResourceAuthority for InMemoryResourceAuthority {
    async fn list(&self, query: &ListingQuery, ctx: &CallContext<'_>) -> RpcResult<ListingPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let tenant = ctx.tenant.ok_or_else(|| RpcError::MissingContext {
            service: SERVICE.to_string(),
            field: "tenant",
            location: ErrorLocation::from(Location::caller()),
        })?;
        let cursor = query.decoded_cursor().map_err(|e| {
            RpcError::status(
                SERVICE,
                AuthorityStatus::InvalidArgument,
                e.error_code(),
                e.to_string(),
            )
        })?;

        let all = self.snapshot(tenant);
        let total_all_count = all.len() as u64;

        let search = query.search.as_deref().map(str::to_lowercase);
        let mut matching: Vec<Resource> = all
            .into_iter()
            .filter(|r| {
                search
                    .as_deref()
                    .is_none_or(|needle| r.name.to_lowercase().contains(needle))
            })
            .filter(|r| {
                query.filter.as_deref().is_none_or(|wanted| {
                    r.category()
                        .is_some_and(|category| category.eq_ignore_ascii_case(wanted))
                })
            })
            .collect();
        let total_count = matching.len() as u64;

        let column = query.sort.column();
        let descending = query.sort.is_descending();
        matching.sort_by(|a, b| {
            let ordering = compare(a, b, column);
            if descending { ordering.reverse() } else { ordering }
        });

        let start = match cursor {
            None => 0,
            Some(cursor) => resume_position(&matching, &cursor, column, descending),
        };
        let window: Vec<Resource> = matching
            .into_iter()
            .skip(start)
            .take(query.limit as usize + 1)
            .collect();

        Ok(paginate(window, query.limit as usize).with_counts(total_count, total_all_count))
    }
}

fn compare(a: &Resource, b: &Resource, column: SortColumn) -> CmpOrdering {
    let primary = match column {
        SortColumn::Name => a.name.cmp(&b.name),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Index of the first row after `cursor` in the already sorted `rows`.
fn resume_position(
    rows: &[Resource],
    cursor: &Cursor,
    column: SortColumn,
    descending: bool,
) -> usize {
    match column {
        SortColumn::CreatedAt => rows.partition_point(|r| {
            let key = Cursor::after(r);
            if descending { key >= *cursor } else { key <= *cursor }
        }),
        // The cursor carries no name, so resume just past the row it names;
        // a row that no longer exists ends the listing.
        SortColumn::Name => rows
            .iter()
            .position(|r| r.id == cursor.id)
            .map_or(rows.len(), |i| i + 1),
    }
}
