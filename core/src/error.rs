//! Error types for the tracking API client.
//!
//! # Design
//! Only failures the caller cannot show to the end user live here. A
//! rejected login or an unreachable server is a normal `ApiResponse`, not
//! an `Err`: `ApiError` covers requests that could not be built or were
//! dispatched to a search the role does not have, plus session storage
//! failures. `TransportError` describes why no HTTP response was obtained;
//! it is folded into the 503 sentinel before reaching callers.

use std::time::Duration;

use thiserror::Error;

use crate::search::{SearchKind, SearchTarget};
use crate::session::SessionError;
use crate::types::Role;

/// Errors returned by `TrackerClient` and `TrackerApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The role has no search screen at all.
    #[error("role {role:?} has no search capability")]
    SearchNotPermitted { role: Role },

    /// The search target has no endpoint for this kind of query.
    #[error("{target:?} cannot be searched by {kind:?}")]
    UnsupportedSearch {
        target: SearchTarget,
        kind: SearchKind,
    },

    /// Reading or writing the current session failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Why a request produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),
}
