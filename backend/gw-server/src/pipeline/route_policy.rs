use crate::{ApiResult, AppState, AuthorizedRequest, RequestContext, RequestState, Stage};

use axum::http::HeaderMap;
use gw_auth::{check_permissions, check_role};
use gw_rpc::CallContext;
use log::debug;

pub const AUTHORIZATION_HEADER: &str = "authorization";
pub const TENANT_HEADER: &str = "x-shop-id";

/// Declarative access rules for one route.
///
/// Handlers call [`RoutePolicy::authorize`] first thing; the policy expands
/// to an ordered list of [`Stage`]s so every route runs the same checks in
/// the same order.
#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    name: &'static str,
    tenant_scoped: bool,
    roles: &'static [&'static str],
    permissions: &'static [&'static str],
}

impl RoutePolicy {
    pub const fn authenticated(name: &'static str) -> Self {
        Self {
            name,
            tenant_scoped: false,
            roles: &[],
            permissions: &[],
        }
    }

    pub const fn tenant_scoped(mut self) -> Self {
        self.tenant_scoped = true;
        self
    }

    pub const fn roles(mut self, roles: &'static [&'static str]) -> Self {
        self.roles = roles;
        self
    }

    pub const fn permissions(mut self, permissions: &'static [&'static str]) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_tenant_scoped(&self) -> bool {
        self.tenant_scoped
    }

    /// Identity, then rate limit, then tenant, then roles, then permissions.
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = vec![Stage::Authenticate, Stage::RateLimit];
        if self.tenant_scoped {
            stages.push(Stage::ResolveTenant);
        }
        if !self.roles.is_empty() {
            stages.push(Stage::RequireRoles);
        }
        if !self.permissions.is_empty() {
            stages.push(Stage::RequirePermissions);
        }
        stages
    }

    /// Run every stage against the request; the first failure wins.
    pub async fn authorize(
        &self,
        state: &AppState,
        context: RequestContext,
        headers: &HeaderMap,
    ) -> ApiResult<AuthorizedRequest> {
        let mut request = RequestState::new(context);
        for stage in self.stages() {
            debug!(
                "{} {} stage {}",
                request.context.log_prefix(),
                self.name,
                stage.as_str()
            );
            self.run(stage, state, headers, &mut request).await?;
        }
        request.into_authorized()
    }

    async fn run(
        &self,
        stage: Stage,
        state: &AppState,
        headers: &HeaderMap,
        request: &mut RequestState,
    ) -> ApiResult<()> {
        match stage {
            Stage::Authenticate => {
                let ctx = CallContext::anonymous().with_request_id(&request.context.correlation_id);
                let identity = state
                    .identity
                    .resolve_header(header(headers, AUTHORIZATION_HEADER), &ctx)
                    .await?;
                request.identity = Some(identity);
            }
            Stage::RateLimit => {
                if let Some(limiter) = &state.rate_limiter {
                    limiter.check(&request.identity()?.subject_id)?;
                }
            }
            Stage::ResolveTenant => {
                let tenant = state
                    .tenants
                    .resolve(
                        request.identity()?,
                        header(headers, TENANT_HEADER),
                        Some(&request.context.correlation_id),
                    )
                    .await?;
                request.tenant = Some(tenant);
            }
            Stage::RequireRoles => check_role(request.identity()?, self.roles)?,
            Stage::RequirePermissions => check_permissions(request.identity()?, self.permissions)?,
        }
        Ok(())
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
