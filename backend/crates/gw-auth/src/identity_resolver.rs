use crate::{AuthError, IdentityAuthority, Result, TokenValidation, bearer_token};

use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use error_location::ErrorLocation;
use gw_cache::{CacheKey, CacheStore, CacheStoreExt};
use gw_core::Identity;
use gw_rpc::{AuthorityStatus, CallContext, RpcError};
use log::{debug, warn};
use metrics::counter;

const CACHE_NAMESPACE: &str = "identity";
const TOKEN_EXPIRED_CODE: &str = "TOKEN_EXPIRED";

/// Turns a bearer credential into a verified [`Identity`].
///
/// Cache first, Identity Authority on miss. Cache failures count as misses
/// and cache writes are best-effort, so the cache can only save calls, never
/// fail a request.
pub struct IdentityResolver {
    cache: Arc<dyn CacheStore>,
    authority: Arc<dyn IdentityAuthority>,
    ttl: Duration,
}

impl IdentityResolver {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        authority: Arc<dyn IdentityAuthority>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            authority,
            ttl,
        }
    }

    /// Resolve from a raw `Authorization` header value.
    pub async fn resolve_header(
        &self,
        header: Option<&str>,
        ctx: &CallContext<'_>,
    ) -> Result<Identity> {
        let token = bearer_token(header)?;
        self.resolve(token, ctx).await
    }

    pub async fn resolve(&self, token: &str, ctx: &CallContext<'_>) -> Result<Identity> {
        if token.is_empty() {
            return Err(AuthError::EmptyToken {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let key = CacheKey::new(CACHE_NAMESPACE).part(token);
        let cached: gw_cache::Result<Option<Identity>> = self.cache.get_json(&key).await;
        match cached {
            Ok(Some(identity)) => {
                counter!("gw.cache.hit", "cache" => CACHE_NAMESPACE).increment(1);
                return Ok(identity);
            }
            Ok(None) => {}
            Err(e) => warn!("Identity cache read failed, treating as miss: {}", e),
        }
        counter!("gw.cache.miss", "cache" => CACHE_NAMESPACE).increment(1);

        let validation = self
            .authority
            .validate(token, ctx)
            .await
            .map_err(map_authority_error)?;

        let now = unix_now();
        if validation.expires_at.is_some_and(|expires_at| expires_at <= now) {
            return Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let ttl = self.ttl_for(&validation, now);
        let identity = into_identity(validation)?;

        if let Err(e) = self.cache.set_json(&key, &identity, ttl).await {
            warn!("Identity cache write failed: {}", e);
        } else {
            debug!(
                "Cached identity for subject {} ({}s)",
                identity.subject_id,
                ttl.as_secs()
            );
        }

        Ok(identity)
    }

    /// Configured TTL, shortened so the entry never outlives the credential.
    fn ttl_for(&self, validation: &TokenValidation, now: i64) -> Duration {
        match validation.expires_at {
            Some(expires_at) => {
                let remaining = u64::try_from(expires_at - now).unwrap_or(0);
                self.ttl.min(Duration::from_secs(remaining))
            }
            None => self.ttl,
        }
    }
}

#[track_caller]
fn into_identity(validation: TokenValidation) -> Result<Identity> {
    if validation.user_id.is_empty() {
        return Err(AuthError::InvalidToken {
            message: "authority returned an empty subject".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(Identity::new(
        validation.user_id,
        validation.role,
        validation.permissions,
    ))
}

#[track_caller]
fn map_authority_error(error: RpcError) -> AuthError {
    let location = ErrorLocation::from(Location::caller());
    match error.authority_status() {
        AuthorityStatus::Unauthenticated
        | AuthorityStatus::InvalidArgument
        | AuthorityStatus::PermissionDenied
        | AuthorityStatus::NotFound => {
            if error.authority_code() == Some(TOKEN_EXPIRED_CODE) {
                AuthError::TokenExpired { location }
            } else {
                AuthError::InvalidToken {
                    message: error.to_string(),
                    location,
                }
            }
        }
        _ => AuthError::Authority {
            source: error,
            location,
        },
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}
