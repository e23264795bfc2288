//! Client core for the vehicle-tracking backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `TrackerApi` adds the
//! async round trip with a fixed timeout for hosts that let the core do
//! its own I/O; foreign hosts drive the pure client through the C ABI.
//!
//! # Design
//! - `TrackerClient` is stateless. It holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Every call yields an `ApiResponse`: a transport status plus an
//!   optional decoded body whose embedded `Status.code` is the domain
//!   result. `Outcome` classifies the two through the status taxonomy.
//! - Searches are dispatched on the user's `Role`; a role without a
//!   search is an `ApiError`, not a runtime branch.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod response;
pub mod search;
pub mod session;
pub mod status;
pub mod transport;
pub mod types;
pub mod validate;

pub use api::TrackerApi;
pub use client::TrackerClient;
pub use config::{ClientConfig, ConfigError};
pub use endpoint::Endpoint;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{ApiResponse, DomainError, Outcome, TransportFailure};
pub use search::{
    FioQuery, SearchFilters, SearchKind, SearchQuery, SearchResponse, SearchResults, SearchTarget,
};
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
pub use status::{
    domain_status_to_message, transport_status_to_message, DomainStatus, ErrorField,
};
pub use transport::{HttpTransport, Transport};
pub use types::{
    AuthRequest, AvgSpeedRequest, Car, Coordinate, Document, OwnerFio, PassportConfirmRequest,
    RegisterRequest, Role, Route, RoutePoint, RouteRequest, Status, TrackRecord, User,
};
