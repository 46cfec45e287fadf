pub mod bearer;
pub mod error;
pub mod http_identity_authority;
pub mod http_tenant_authority;
pub mod identity_authority;
pub mod identity_resolver;
pub mod permission;
pub mod rate_limit_config;
pub mod subject_rate_limiter;
pub mod tenant_authority;
pub mod tenant_resolver;

pub use bearer::bearer_token;
pub use error::{AuthError, Result};
pub use http_identity_authority::HttpIdentityAuthority;
pub use http_tenant_authority::HttpTenantAuthority;
pub use identity_authority::{IdentityAuthority, TokenValidation};
pub use identity_resolver::IdentityResolver;
pub use permission::{check_permissions, check_role};
pub use rate_limit_config::RateLimitConfig;
pub use subject_rate_limiter::SubjectRateLimiter;
pub use tenant_authority::{TenantAuthority, TenantGrant};
pub use tenant_resolver::TenantResolver;

#[cfg(test)]
mod tests;
