
use crate::{InMemoryResourceAuthority, Resource};

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use gw_core::TenantId;
use uuid::Uuid;

pub(crate) fn tenant(id: &str) -> TenantId {
    TenantId::from_str(id).unwrap()
}

pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// Resource `n` created `n` seconds after a fixed epoch, with a
/// deterministic id.
pub(crate) fn resource(n: u32, name: &str) -> Resource {
    Resource::new(Uuid::from_u128(u128::from(n) + 1), name, at(i64::from(n)))
}

pub(crate) fn seeded(tenant: &TenantId, count: u32) -> InMemoryResourceAuthority {
    let authority = InMemoryResourceAuthority::new();
    for n in 0..count {
        authority.insert(tenant, resource(n, &format!("item-{n:03}")));
    }
    authority
}
