use crate::AuthorityStatus;

use gw_core::{ClientFault, ErrorKind, error_codes};

type Row = (AuthorityStatus, ErrorKind, &'static str, &'static str);

/// Authority status to client-facing fault. Anything not listed is internal.
const STATUS_TABLE: &[Row] = &[
    (
        AuthorityStatus::InvalidArgument,
        ErrorKind::BadRequest,
        error_codes::INVALID_INPUT,
        error_codes::INVALID_INPUT_MSG,
    ),
    (
        AuthorityStatus::OutOfRange,
        ErrorKind::BadRequest,
        error_codes::INVALID_INPUT,
        error_codes::INVALID_INPUT_MSG,
    ),
    (
        AuthorityStatus::FailedPrecondition,
        ErrorKind::BadRequest,
        error_codes::BAD_REQUEST,
        error_codes::BAD_REQUEST_MSG,
    ),
    (
        AuthorityStatus::Unauthenticated,
        ErrorKind::Unauthenticated,
        error_codes::UNAUTHORIZED,
        error_codes::UNAUTHORIZED_MSG,
    ),
    (
        AuthorityStatus::PermissionDenied,
        ErrorKind::Forbidden,
        error_codes::FORBIDDEN,
        error_codes::FORBIDDEN_MSG,
    ),
    (
        AuthorityStatus::NotFound,
        ErrorKind::NotFound,
        error_codes::NOT_FOUND,
        error_codes::NOT_FOUND_MSG,
    ),
    (
        AuthorityStatus::AlreadyExists,
        ErrorKind::Conflict,
        error_codes::CONFLICT,
        error_codes::CONFLICT_MSG,
    ),
    (
        AuthorityStatus::Aborted,
        ErrorKind::Conflict,
        error_codes::CONFLICT,
        error_codes::CONFLICT_MSG,
    ),
    (
        AuthorityStatus::ResourceExhausted,
        ErrorKind::RateLimited,
        error_codes::RATE_LIMITED,
        error_codes::RATE_LIMITED_MSG,
    ),
    (
        AuthorityStatus::Unavailable,
        ErrorKind::ServiceUnavailable,
        error_codes::SERVICE_UNAVAILABLE,
        error_codes::SERVICE_UNAVAILABLE_MSG,
    ),
    (
        AuthorityStatus::DeadlineExceeded,
        ErrorKind::ServiceUnavailable,
        error_codes::SERVICE_UNAVAILABLE,
        error_codes::SERVICE_UNAVAILABLE_MSG,
    ),
];

pub fn classify(status: AuthorityStatus) -> ClientFault {
    STATUS_TABLE
        .iter()
        .find(|(row_status, ..)| *row_status == status)
        .map(|&(_, kind, code, message)| ClientFault::new(kind, code, message))
        .unwrap_or_else(ClientFault::internal)
}
