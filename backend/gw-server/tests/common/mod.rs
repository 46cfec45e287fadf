#![allow(dead_code)]

//! Test infrastructure for gw-server router tests

use gw_auth::{
    IdentityAuthority, IdentityResolver, RateLimitConfig, SubjectRateLimiter, TenantAuthority,
    TenantGrant, TenantResolver, TokenValidation,
};
use gw_cache::{CacheStore, MemoryCacheStore};
use gw_core::TenantId;
use gw_listing::{InMemoryResourceAuthority, ListingService, PageLimits, Resource};
use gw_rpc::{
    AuthorityStatus, CallContext, CircuitBreakerConfig, Result as RpcResult, RpcError,
    ServiceClient, ServiceScope,
};
use gw_server::{AppState, build_router};

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::MockServer;

pub const SELLER_TOKEN: &str = "seller-token";
pub const VIEWER_TOKEN: &str = "viewer-token";
pub const SELLER_ID: &str = "user-seller";
pub const VIEWER_ID: &str = "user-viewer";
pub const SELLER_SHOP: &str = "shop-1";
pub const VIEWER_SHOP: &str = "shop-2";

/// Identity Authority that knows two fixed credentials.
#[derive(Default)]
pub struct FakeIdentityAuthority {
    calls: AtomicUsize,
}

impl FakeIdentityAuthority {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityAuthority for FakeIdentityAuthority {
    async fn validate(&self, token: &str, _ctx: &CallContext<'_>) -> RpcResult<TokenValidation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (user_id, role, permissions): (&str, &str, &[&str]) = match token {
            SELLER_TOKEN => (
                SELLER_ID,
                "seller",
                &[
                    "shop:create",
                    "shop:read",
                    "shop:update",
                    "shop:delete",
                    "product:create",
                    "product:read",
                    "product:update",
                    "product:delete",
                ],
            ),
            VIEWER_TOKEN => (VIEWER_ID, "viewer", &["shop:read", "product:read"]),
            _ => {
                return Err(RpcError::status(
                    "auth",
                    AuthorityStatus::Unauthenticated,
                    "UNAUTHENTICATED",
                    "unknown token",
                ));
            }
        };
        Ok(TokenValidation {
            user_id: user_id.to_string(),
            role: role.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            expires_at: None,
        })
    }
}

/// Tenant Authority where every subject owns exactly one shop.
#[derive(Default)]
pub struct FakeTenantAuthority {
    owners: Mutex<HashMap<String, String>>,
    calls: AtomicUsize,
}

impl FakeTenantAuthority {
    pub fn with_owners(owners: &[(&str, &str)]) -> Self {
        Self {
            owners: Mutex::new(
                owners
                    .iter()
                    .map(|(subject, shop)| (subject.to_string(), shop.to_string()))
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TenantAuthority for FakeTenantAuthority {
    async fn owned_tenant(&self, ctx: &CallContext<'_>) -> RpcResult<TenantGrant> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let subject = ctx.identity.map(|identity| identity.subject_id.clone());
        let owned = subject.and_then(|subject| self.owners.lock().unwrap().get(&subject).cloned());
        match owned {
            Some(id) => Ok(TenantGrant { id }),
            None => Err(RpcError::status(
                "shops",
                AuthorityStatus::NotFound,
                "NOT_FOUND",
                "no shop",
            )),
        }
    }
}

pub struct TestGateway {
    pub state: AppState,
    pub backend: MockServer,
    pub identity: Arc<FakeIdentityAuthority>,
    pub tenants: Arc<FakeTenantAuthority>,
    pub resources: Arc<InMemoryResourceAuthority>,
}

#[derive(Default)]
pub struct GatewayOptions {
    /// Requests per minute per subject; unlimited when absent
    pub rate_limit: Option<u32>,
}

impl TestGateway {
    pub async fn start() -> Self {
        Self::start_with(GatewayOptions::default()).await
    }

    pub async fn start_with(options: GatewayOptions) -> Self {
        let backend = MockServer::start().await;
        let identity = Arc::new(FakeIdentityAuthority::default());
        let tenants = Arc::new(FakeTenantAuthority::with_owners(&[
            (SELLER_ID, SELLER_SHOP),
            (VIEWER_ID, VIEWER_SHOP),
        ]));
        let resources = Arc::new(InMemoryResourceAuthority::new());
        let cache: Arc<dyn CacheStore> = Arc::new(MemoryCacheStore::new(10_000));

        let client = |name: &str, scope: ServiceScope| {
            ServiceClient::new(
                name,
                &backend.uri(),
                scope,
                Duration::from_secs(2),
                CircuitBreakerConfig::default(),
            )
            .unwrap()
        };
        let shops = client("shops", ServiceScope::User);

        let state = AppState {
            identity: Arc::new(IdentityResolver::new(
                cache.clone(),
                identity.clone(),
                Duration::from_secs(600),
            )),
            tenants: Arc::new(TenantResolver::new(
                cache.clone(),
                tenants.clone(),
                Duration::from_secs(600),
            )),
            listings: Arc::new(ListingService::new(
                cache,
                resources.clone(),
                Duration::from_secs(30),
            )),
            page_limits: PageLimits::default(),
            auth: client("auth", ServiceScope::Anonymous),
            users: client("users", ServiceScope::User),
            tenant_shops: shops.with_scope(ServiceScope::UserAndTenant),
            shops,
            products: client("products", ServiceScope::UserAndTenant),
            rate_limiter: options.rate_limit.map(|max_requests| {
                Arc::new(SubjectRateLimiter::new(RateLimitConfig {
                    max_requests,
                    window_secs: 60,
                }))
            }),
            metrics: None,
        };

        Self {
            state,
            backend,
            identity,
            tenants,
            resources,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Store `count` products named `Product 00..` for `shop`, one second apart.
    pub fn seed_products(&self, shop: &str, count: usize) -> Vec<Resource> {
        let tenant: TenantId = shop.parse().unwrap();
        (0..count)
            .map(|i| {
                let resource = Resource::new(
                    Uuid::new_v4(),
                    format!("Product {:02}", i),
                    Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
                )
                .with_attribute("category", if i % 2 == 0 { "tools" } else { "garden" });
                self.resources.insert(&tenant, resource.clone());
                resource
            })
            .collect()
    }

    pub async fn send(&self, request: Request<Body>) -> (Response<Body>, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let (parts, body) = response.into_parts();
        let bytes = body.collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (Response::from_parts(parts, Body::empty()), json)
    }
}

pub fn get(uri: &str, token: Option<&str>, shop: Option<&str>) -> Request<Body> {
    request("GET", uri, token, shop, None)
}

pub fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    shop: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    if let Some(shop) = shop {
        builder = builder.header("x-shop-id", shop);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
