use crate::ErrorKind;

/// The client-visible projection of a failure.
///
/// Produced by every crate's error type; the HTTP layer renders it into the
/// response envelope without looking at the original error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFault {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
}

impl ClientFault {
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }

    /// Fault carrying the kind's default code and message.
    pub fn of_kind(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_code(), kind.default_message())
    }

    pub fn internal() -> Self {
        Self::of_kind(ErrorKind::Internal)
    }

    pub fn service_unavailable() -> Self {
        Self::of_kind(ErrorKind::ServiceUnavailable)
    }
}
