use std::result::Result as StdResult;

use error_location::ErrorLocation;
use gw_core::{ClientFault, ErrorKind, error_codes};
use gw_rpc::RpcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Cursor is not valid base64 {location}")]
    CursorEncoding { location: ErrorLocation },

    #[error("Cursor has {fields} fields, expected 2 {location}")]
    CursorFormat {
        fields: usize,
        location: ErrorLocation,
    },

    #[error("Cursor timestamp '{value}' is not RFC 3339 {location}")]
    CursorTime {
        value: String,
        location: ErrorLocation,
    },

    #[error("Cursor id '{value}' is not a UUID {location}")]
    CursorId {
        value: String,
        location: ErrorLocation,
    },

    #[error("Resource authority call failed: {source} {location}")]
    Authority {
        #[source]
        source: RpcError,
        location: ErrorLocation,
    },
}

impl ListingError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CursorEncoding { .. } => error_codes::INVALID_CURSOR_ENCODING,
            Self::CursorFormat { .. } => error_codes::INVALID_CURSOR_FORMAT,
            Self::CursorTime { .. } => error_codes::INVALID_CURSOR_TIME,
            Self::CursorId { .. } => error_codes::INVALID_CURSOR_ID,
            Self::Authority { source, .. } => source.fault().code,
        }
    }

    pub fn fault(&self) -> ClientFault {
        let message = match self {
            Self::CursorEncoding { .. } => error_codes::INVALID_CURSOR_ENCODING_MSG,
            Self::CursorFormat { .. } => error_codes::INVALID_CURSOR_FORMAT_MSG,
            Self::CursorTime { .. } => error_codes::INVALID_CURSOR_TIME_MSG,
            Self::CursorId { .. } => error_codes::INVALID_CURSOR_ID_MSG,
            Self::Authority { source, .. } => return source.fault(),
        };
        ClientFault::new(ErrorKind::BadRequest, self.error_code(), message)
    }
}

pub type Result<T> = StdResult<T, ListingError>;
