
use crate::{IdentityAuthority, TenantAuthority, TenantGrant, TokenValidation};

use std::panic::Location;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use gw_cache::{CacheError, CacheStore};
use gw_rpc::{AuthorityStatus, CallContext, Result as RpcResult, RpcError};

/// Scripted authority reply
#[derive(Clone)]
pub(crate) enum Reply<T> {
    Ok(T),
    Reject(AuthorityStatus, &'static str),
    Unavailable,
}

impl<T: Clone> Reply<T> {
    fn produce(&self, service: &str) -> RpcResult<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Reject(status, code) => Err(RpcError::status(service, *status, *code, "rejected")),
            Reply::Unavailable => Err(RpcError::DeadlineExceeded {
                service: service.to_string(),
                timeout_ms: 3000,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

pub(crate) struct FakeIdentityAuthority {
    reply: Mutex<Reply<TokenValidation>>,
    calls: AtomicUsize,
}

impl FakeIdentityAuthority {
    pub(crate) fn new(reply: Reply<TokenValidation>) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn set_reply(&self, reply: Reply<TokenValidation>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityAuthority for FakeIdentityAuthority {
    async fn validate(&self, _token: &str, _ctx: &CallContext<'_>) -> RpcResult<TokenValidation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.reply.lock().unwrap().clone();
        reply.produce("auth")
    }
}

pub(crate) struct FakeTenantAuthority {
    reply: Mutex<Reply<TenantGrant>>,
    calls: AtomicUsize,
    last_subject: Mutex<Option<String>>,
}

impl FakeTenantAuthority {
    pub(crate) fn owning(tenant: &str) -> Self {
        Self::new(Reply::Ok(TenantGrant {
            id: tenant.to_string(),
        }))
    }

    pub(crate) fn new(reply: Reply<TenantGrant>) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
            last_subject: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_subject(&self) -> Option<String> {
        self.last_subject.lock().unwrap().clone()
    }
}

#[async_trait]
impl TenantAuthority for FakeTenantAuthority {
    async fn owned_tenant(&self, ctx: &CallContext<'_>) -> RpcResult<TenantGrant> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_subject.lock().unwrap() = ctx.identity.map(|identity| identity.subject_id.clone());
        let reply = self.reply.lock().unwrap().clone();
        reply.produce("shops")
    }
}

/// Cache whose every operation fails
pub(crate) struct BrokenCache;

#[async_trait]
impl CacheStore for BrokenCache {
    async fn get(&self, _key: &str) -> gw_cache::Result<Option<String>> {
        Err(CacheError::Backend {
            message: "connection refused".into(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> gw_cache::Result<()> {
        Err(CacheError::Backend {
            message: "connection refused".into(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn delete(&self, _key: &str) -> gw_cache::Result<()> {
        Err(CacheError::Backend {
            message: "connection refused".into(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

pub(crate) fn validation(user_id: &str, permissions: &[&str]) -> TokenValidation {
    TokenValidation {
        user_id: user_id.to_string(),
        role: "MERCHANT".to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        expires_at: None,
    }
}
