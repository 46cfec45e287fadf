/// One step of the authorization pipeline.
///
/// A route's stages always run in declaration order; see
/// [`RoutePolicy::stages`](crate::RoutePolicy::stages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Bearer credential to [`gw_core::Identity`]
    Authenticate,
    /// Per-subject request budget
    RateLimit,
    /// `X-Shop-Id` to a confirmed [`gw_core::TenantId`]
    ResolveTenant,
    RequireRoles,
    RequirePermissions,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::RateLimit => "rate_limit",
            Self::ResolveTenant => "resolve_tenant",
            Self::RequireRoles => "require_roles",
            Self::RequirePermissions => "require_permissions",
        }
    }
}
