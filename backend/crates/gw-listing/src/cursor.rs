use crate::{ListingError, Resource, Result};

use std::fmt;
use std::panic::Location;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use uuid::Uuid;

const FIELD_SEPARATOR: char = '|';

/// Keyset position of the last row a page returned.
///
/// Encoded as URL-safe base64 (no padding) of `<unix secs>.<nanos>|<uuid>`,
/// which covers the whole `DateTime<Utc>` range. RFC 3339 timestamps are
/// accepted on decode for cursors minted elsewhere.
/// The sort order is not part of the cursor: replaying a cursor under a
/// different `sort` than the page it came from is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl Cursor {
    pub fn new(created_at: DateTime<Utc>, id: Uuid) -> Self {
        Self { created_at, id }
    }

    /// Position just past `resource`.
    pub fn after(resource: &Resource) -> Self {
        Self::new(resource.created_at, resource.id)
    }

    pub fn encode(&self) -> String {
        let raw = format!(
            "{}.{:09}{}{}",
            self.created_at.timestamp(),
            self.created_at.timestamp_subsec_nanos(),
            FIELD_SEPARATOR,
            self.id
        );
        URL_SAFE_NO_PAD.encode(raw)
    }

    /// Decode an opaque cursor. Standard-alphabet and padded input is
    /// accepted too, since backends may mint cursors with either.
    ///
    /// Each malformation is reported as its own error so clients can tell
    /// a mangled token from a stale or foreign one.
    #[track_caller]
    pub fn decode(encoded: &str) -> Result<Self> {
        let normalized: String = encoded
            .trim()
            .trim_end_matches('=')
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                other => other,
            })
            .collect();

        let bytes = URL_SAFE_NO_PAD
            .decode(normalized.as_bytes())
            .map_err(|_| ListingError::CursorEncoding {
                location: ErrorLocation::from(Location::caller()),
            })?;
        let raw = String::from_utf8(bytes).map_err(|_| ListingError::CursorEncoding {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        let [created_at, id] = fields.as_slice() else {
            return Err(ListingError::CursorFormat {
                fields: fields.len(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let created_at = parse_timestamp(created_at).ok_or_else(|| ListingError::CursorTime {
            value: created_at.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let id = Uuid::parse_str(id).map_err(|_| ListingError::CursorId {
            value: id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { created_at, id })
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    let (secs, nanos) = raw.split_once('.')?;
    if nanos.len() != 9 || !nanos.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    DateTime::from_timestamp(secs.parse().ok()?, nanos.parse().ok()?)
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
