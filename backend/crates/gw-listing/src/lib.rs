pub mod cursor;
pub mod error;
pub mod http_resource_authority;
pub mod in_memory_resource_authority;
pub mod listing_page;
pub mod listing_query;
pub mod listing_service;
pub mod page_limits;
pub mod resource;
pub mod resource_authority;
pub mod sort_order;

pub use cursor::Cursor;
pub use error::{ListingError, Result};
pub use http_resource_authority::HttpResourceAuthority;
pub use in_memory_resource_authority::InMemoryResourceAuthority;
pub use listing_page::{ListingPage, paginate};
pub use listing_query::{ListingParams, ListingQuery};
pub use listing_service::ListingService;
pub use page_limits::PageLimits;
pub use resource::Resource;
pub use resource_authority::ResourceAuthority;
pub use sort_order::{SortColumn, SortOrder};

#[cfg(test)]
mod tests;
