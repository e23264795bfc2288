//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use autotracker_core::http::HttpMethod;
use autotracker_core::response::ApiResponse;
use autotracker_core::status::domain_status_to_message;
use autotracker_core::types::WithStatus;
use autotracker_core::{Endpoint, HttpRequest};
use serde::Serialize;

/// Opaque handle to a `TrackerClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiTrackerClient {
    pub(crate) inner: autotracker_core::TrackerClient,
}

/// Allocate a C string, dropping interior NULs rather than failing.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut s = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Endpoint identifiers accepted by `at_build_request` and
/// `at_parse_response`, passed as their `u32` value.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiEndpoint {
    Auth = 0,
    Register = 1,
    PassportConfirm = 2,
    CarSearch = 3,
    CarSearchByFio = 4,
    CarSearchByPassport = 5,
    CarSearchByPlateMask = 6,
    TrackSearch = 7,
    TrackSearchByFio = 8,
    TrackSearchByPassport = 9,
    TrackSearchByDate = 10,
    TrackSearchByPlateMask = 11,
    Route = 12,
    AvgSpeed = 13,
}

impl FfiEndpoint {
    /// Map a raw id from C. Unknown ids yield `None`.
    pub(crate) fn from_raw(raw: u32) -> Option<Endpoint> {
        Endpoint::ALL.get(raw as usize).copied()
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Post = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `at_build_request`. The C caller executes the request and
/// passes the response back through `at_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let boxed: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(boxed) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(req.url),
            headers,
            headers_len,
            body: c_string(req.body),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing a request, then passes a
/// pointer to `at_parse_response`. The FFI layer reads but does not free
/// these fields. A null `body` counts as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Whether the call itself worked. Independent of the API outcome.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NullArg = 1,
    UnknownEndpoint = 2,
    Panic = 3,
}

/// Result envelope of `at_parse_response`.
///
/// With `error_code == Ok`:
/// - `http_status` is the transport status.
/// - `has_payload` tells whether the body matched the endpoint's shape;
///   `domain_code` and `payload_json` are only meaningful when it is set.
/// - `message` and `field` hold the display pair for the outcome
///   (`"Ok"` and `""` on success).
///
/// Otherwise `error_message` explains the failure and every other pointer
/// is null.
#[repr(C)]
pub struct FfiApiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub has_payload: bool,
    pub domain_code: i64,
    pub message: *mut c_char,
    pub field: *mut c_char,
    pub payload_json: *mut c_char,
}

impl FfiApiResult {
    pub(crate) fn from_response<T: WithStatus + Serialize>(resp: ApiResponse<T>) -> *mut Self {
        let (message, field) = resp
            .outcome()
            .error_message()
            .unwrap_or_else(|| domain_status_to_message(0));
        let domain_code = resp.domain_code().unwrap_or(0);
        let payload_json = resp
            .payload
            .as_ref()
            .and_then(|p| serde_json::to_string(p).ok())
            .map_or(std::ptr::null_mut(), |json| c_string(json));

        Box::into_raw(Box::new(FfiApiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: resp.http_status,
            has_payload: resp.payload.is_some(),
            domain_code,
            message: c_string(message),
            field: c_string(field),
            payload_json,
        }))
    }

    fn failure(error_code: FfiErrorCode, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiApiResult {
            error_code,
            error_message: c_string(msg),
            http_status: 0,
            has_payload: false,
            domain_code: 0,
            message: std::ptr::null_mut(),
            field: std::ptr::null_mut(),
            payload_json: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    pub(crate) fn unknown_endpoint(raw: u32) -> *mut Self {
        Self::failure(
            FfiErrorCode::UnknownEndpoint,
            format!("unknown endpoint id: {raw}"),
        )
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg.to_string())
    }
}

/// A `(message, field)` pair from the domain status table.
#[repr(C)]
pub struct FfiStatusMessage {
    pub message: *mut c_char,
    pub field: *mut c_char,
}

impl FfiStatusMessage {
    pub(crate) fn for_code(code: i64) -> *mut Self {
        let (message, field) = domain_status_to_message(code);
        Box::into_raw(Box::new(FfiStatusMessage {
            message: c_string(message),
            field: c_string(field),
        }))
    }
}
