use crate::error::Result as ServerResult;

use gw_auth::{
    HttpIdentityAuthority, HttpTenantAuthority, IdentityResolver, SubjectRateLimiter,
    TenantResolver,
};
use gw_cache::CacheStore;
use gw_config::{Config, ServiceEndpoint};
use gw_listing::{HttpResourceAuthority, ListingService, PageLimits};
use gw_rpc::{CircuitBreakerConfig, ServiceClient, ServiceScope};

use std::sync::Arc;

use log::{info, warn};
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared state for every handler.
///
/// Resolvers and the listing service share one injected [`CacheStore`];
/// each downstream service gets its own client and circuit breaker.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityResolver>,
    pub tenants: Arc<TenantResolver>,
    pub listings: Arc<ListingService>,
    pub page_limits: PageLimits,
    /// Identity authority client, kept for breaker health
    pub auth: ServiceClient,
    /// User service, identity metadata
    pub users: ServiceClient,
    /// Shop service, identity metadata
    pub shops: ServiceClient,
    /// Shop service, identity and tenant metadata (shares the breaker with `shops`)
    pub tenant_shops: ServiceClient,
    /// Product service, identity and tenant metadata
    pub products: ServiceClient,
    pub rate_limiter: Option<Arc<SubjectRateLimiter>>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire the gateway against the HTTP authorities named in `config`.
    pub fn from_config(
        config: &Config,
        cache: Arc<dyn CacheStore>,
        metrics: Option<PrometheusHandle>,
    ) -> ServerResult<Self> {
        let breaker = CircuitBreakerConfig {
            failure_threshold: config.circuit_breaker.failure_threshold,
            open_duration: config.circuit_breaker.open_duration(),
            half_open_success_threshold: config.circuit_breaker.half_open_success_threshold,
            failure_window: config.circuit_breaker.failure_window(),
        };
        let client = |name: &str, endpoint: &ServiceEndpoint, scope: ServiceScope| {
            ServiceClient::new(name, &endpoint.url, scope, endpoint.timeout(), breaker.clone())
        };

        let services = &config.services;
        let auth = client("auth", &services.auth, ServiceScope::Anonymous)?;
        let users = client("users", &services.users, ServiceScope::User)?;
        let shops = client("shops", &services.shops, ServiceScope::User)?;
        let products = client("products", &services.products, ServiceScope::UserAndTenant)?;

        let identity = IdentityResolver::new(
            cache.clone(),
            Arc::new(HttpIdentityAuthority::new(auth.clone())),
            config.cache.identity_ttl(),
        );
        let tenants = TenantResolver::new(
            cache.clone(),
            Arc::new(HttpTenantAuthority::new(shops.clone())),
            config.cache.tenant_ttl(),
        );
        let listings = ListingService::new(
            cache,
            Arc::new(HttpResourceAuthority::new(products.clone())),
            config.cache.listing_ttl(),
        );

        let rate_limiter = if config.rate_limit.enabled {
            info!(
                "Rate limiting: {} requests per {}s per subject",
                config.rate_limit.max_requests, config.rate_limit.window_secs
            );
            Some(Arc::new(SubjectRateLimiter::new(gw_auth::RateLimitConfig {
                max_requests: config.rate_limit.max_requests,
                window_secs: config.rate_limit.window_secs,
            })))
        } else {
            warn!("Rate limiting DISABLED");
            None
        };

        Ok(Self {
            identity: Arc::new(identity),
            tenants: Arc::new(tenants),
            listings: Arc::new(listings),
            page_limits: PageLimits::new(config.listing.default_limit, config.listing.max_limit),
            auth,
            users,
            tenant_shops: shops.with_scope(ServiceScope::UserAndTenant),
            shops,
            products,
            rate_limiter,
            metrics,
        })
    }
}
