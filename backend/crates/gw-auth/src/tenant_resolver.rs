use crate::{AuthError, Result, TenantAuthority};

use std::panic::Location;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use gw_cache::{CacheKey, CacheStore};
use gw_core::{Identity, TenantId};
use gw_rpc::{CallContext, RpcError};
use log::{debug, warn};
use metrics::counter;

const CACHE_NAMESPACE: &str = "tenant_grant";
const GRANTED: &str = "1";

/// Confirms that the caller owns the tenant named in the request header.
///
/// Fails closed: anything other than an exact match against the Tenant
/// Authority's answer is denied. Confirmed `(subject, tenant)` pairs are
/// cached and trusted until they expire or are revoked.
pub struct TenantResolver {
    cache: Arc<dyn CacheStore>,
    authority: Arc<dyn TenantAuthority>,
    ttl: Duration,
}

impl TenantResolver {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        authority: Arc<dyn TenantAuthority>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            authority,
            ttl,
        }
    }

    pub async fn resolve(
        &self,
        identity: &Identity,
        header: Option<&str>,
        request_id: Option<&str>,
    ) -> Result<TenantId> {
        let tenant = header
            .and_then(|value| TenantId::from_str(value).ok())
            .ok_or_else(|| AuthError::TenantRequired {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let key = grant_key(identity, &tenant);
        match self.cache.get(&key.render()).await {
            Ok(Some(_)) => {
                counter!("gw.cache.hit", "cache" => CACHE_NAMESPACE).increment(1);
                return Ok(tenant);
            }
            Ok(None) => {}
            Err(e) => warn!("Tenant grant cache read failed, treating as miss: {}", e),
        }
        counter!("gw.cache.miss", "cache" => CACHE_NAMESPACE).increment(1);

        let mut ctx = CallContext::user(identity);
        if let Some(request_id) = request_id {
            ctx = ctx.with_request_id(request_id);
        }

        let grant = self
            .authority
            .owned_tenant(&ctx)
            .await
            .map_err(|e| map_authority_error(e, identity, &tenant))?;

        if grant.id != tenant.as_str() {
            warn!(
                "Tenant mismatch for subject {}: requested {}, owns {}",
                identity.subject_id, tenant, grant.id
            );
            return Err(AuthError::TenantAccessDenied {
                subject: identity.subject_id.clone(),
                tenant: tenant.to_string(),
                message: "tenant id mismatch".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match self
            .cache
            .set(&key.render(), GRANTED.to_string(), self.ttl)
            .await
        {
            Ok(()) => debug!(
                "Cached tenant grant {} for subject {}",
                tenant, identity.subject_id
            ),
            Err(e) => warn!("Tenant grant cache write failed: {}", e),
        }

        Ok(tenant)
    }

    /// Drop a cached grant, e.g. after the tenant was deleted.
    pub async fn revoke(&self, identity: &Identity, tenant: &TenantId) {
        if let Err(e) = self.cache.delete(&grant_key(identity, tenant).render()).await {
            warn!("Tenant grant cache delete failed: {}", e);
        }
    }
}

fn grant_key(identity: &Identity, tenant: &TenantId) -> CacheKey {
    CacheKey::new(CACHE_NAMESPACE)
        .part(identity.subject_id.as_str())
        .part(tenant.as_str())
}

#[track_caller]
fn map_authority_error(error: RpcError, identity: &Identity, tenant: &TenantId) -> AuthError {
    let location = ErrorLocation::from(Location::caller());
    if error.is_unavailable() {
        return AuthError::Authority {
            source: error,
            location,
        };
    }

    // Any definitive answer other than a matching tenant is a denial
    AuthError::TenantAccessDenied {
        subject: identity.subject_id.clone(),
        tenant: tenant.to_string(),
        message: error.to_string(),
        location,
    }
}
