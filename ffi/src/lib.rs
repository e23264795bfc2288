//! C-ABI wrapper around `autotracker-core`.
//!
//! # Overview
//! Exposes the tracking API through `extern "C"` functions so the mobile
//! host can build requests, parse responses, look up status messages and
//! run form validators without linking to Rust's async runtime or serde.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Endpoints are addressed by `FfiEndpoint` ids and inputs travel as JSON
//!   in the backend's wire shape, so one `at_build_request` and one
//!   `at_parse_response` cover the whole catalogue.
//! - `FfiApiResult` keeps the transport status and the embedded domain code
//!   separate, and carries the display pair already resolved.
//! - The C caller owns all returned pointers and must call the matching
//!   `at_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use autotracker_core::http::HttpResponse;
use autotracker_core::search::{SearchQuery, SearchTarget};
use autotracker_core::status::transport_status_to_message;
use autotracker_core::types::{
    AuthRequest, AvgSpeedRequest, Document, PassportConfirmRequest, RegisterRequest, Role,
    RouteRequest,
};
use autotracker_core::{validate, ApiError, Endpoint, HttpRequest, TrackerClient};

use types::*;

/// Borrow a C string as `&str`. Null and invalid UTF-8 yield `None`.
fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `TrackerClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or not UTF-8.
/// The caller must free the returned pointer with `at_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn at_client_new(base_url: *const c_char) -> *mut FfiTrackerClient {
    catch_unwind(|| match c_str(base_url) {
        Some(url) => Box::into_raw(Box::new(FfiTrackerClient {
            inner: TrackerClient::new(url),
        })),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `at_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn at_client_free(client: *mut FfiTrackerClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

fn build(client: &TrackerClient, endpoint: Endpoint, json: &str) -> Result<HttpRequest, ApiError> {
    let de = |e: serde_json::Error| ApiError::Serialization(e.to_string());
    match endpoint {
        Endpoint::Auth => client.build_auth(&serde_json::from_str::<AuthRequest>(json).map_err(de)?),
        Endpoint::Register => {
            client.build_register(&serde_json::from_str::<RegisterRequest>(json).map_err(de)?)
        }
        Endpoint::PassportConfirm => client.build_passport_confirm(
            &serde_json::from_str::<PassportConfirmRequest>(json).map_err(de)?,
        ),
        Endpoint::Route => {
            client.build_route(&serde_json::from_str::<RouteRequest>(json).map_err(de)?)
        }
        Endpoint::AvgSpeed => {
            client.build_avg_speed(&serde_json::from_str::<AvgSpeedRequest>(json).map_err(de)?)
        }
        search => {
            let (target, kind) = SearchTarget::for_endpoint(search)
                .ok_or_else(|| ApiError::Serialization(format!("{search:?} is not a search")))?;
            let query = SearchQuery::from_json(kind, json).map_err(de)?;
            client.build_search(target, &query)
        }
    }
}

/// Build the HTTP request for `endpoint` (an `FfiEndpoint` value) from a
/// JSON input in the backend's wire shape.
///
/// Returns null if an argument is null, the endpoint id is unknown, or the
/// input does not match the endpoint.
/// The caller must free the returned pointer with `at_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn at_build_request(
    client: *const FfiTrackerClient,
    endpoint: u32,
    input_json: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let (Some(endpoint), Some(json)) = (FfiEndpoint::from_raw(endpoint), c_str(input_json))
        else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        match build(&client.inner, endpoint, json) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    HttpResponse::new(resp.status, c_str(resp.body).unwrap_or(""))
}

/// Classify the response to a request built for `endpoint`.
///
/// Returns a result with `error_code = Ok` whenever the arguments are
/// usable, whatever the HTTP status. A C host that got no response at all
/// should pass status 503 with a null body.
#[unsafe(no_mangle)]
pub extern "C" fn at_parse_response(
    client: *const FfiTrackerClient,
    endpoint: u32,
    response: *const FfiHttpResponse,
) -> *mut FfiApiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiApiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiApiResult::null_arg("response");
        }
        let Some(parsed_endpoint) = FfiEndpoint::from_raw(endpoint) else {
            return FfiApiResult::unknown_endpoint(endpoint);
        };
        let client = &unsafe { &*client }.inner;
        let resp = ffi_response_to_core(unsafe { &*response });
        match parsed_endpoint {
            Endpoint::Auth => FfiApiResult::from_response(client.parse_auth(resp)),
            Endpoint::Register => FfiApiResult::from_response(client.parse_register(resp)),
            Endpoint::PassportConfirm => {
                FfiApiResult::from_response(client.parse_passport_confirm(resp))
            }
            Endpoint::Route => FfiApiResult::from_response(client.parse_route(resp)),
            Endpoint::AvgSpeed => FfiApiResult::from_response(client.parse_avg_speed(resp)),
            search => match SearchTarget::for_endpoint(search) {
                Some((target, _)) => FfiApiResult::from_response(client.parse_search(target, resp)),
                None => FfiApiResult::unknown_endpoint(endpoint),
            },
        }
    })
    .unwrap_or_else(|_| FfiApiResult::panic("panic in at_parse_response"))
}

// ---------------------------------------------------------------------------
// Status messages
// ---------------------------------------------------------------------------

/// Display sentence for a transport status. Free with `at_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn at_transport_status_message(status: u16) -> *mut c_char {
    catch_unwind(|| c_string(transport_status_to_message(status)))
        .unwrap_or(std::ptr::null_mut())
}

/// `(message, field)` for a domain code. Free with `at_free_status_message`.
#[unsafe(no_mangle)]
pub extern "C" fn at_domain_status_message(code: i64) -> *mut FfiStatusMessage {
    catch_unwind(|| FfiStatusMessage::for_code(code)).unwrap_or(std::ptr::null_mut())
}

/// Display name of a role: 0 = user, 1 = operator, 2 = auditor.
/// Unknown ids yield null. Free with `at_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn at_role_display_name(role: u32) -> *mut c_char {
    catch_unwind(|| {
        let role = match role {
            0 => Role::User,
            1 => Role::Operator,
            2 => Role::Auditor,
            _ => return std::ptr::null_mut(),
        };
        c_string(role.display_name())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

fn check(input: *const c_char, f: fn(&str) -> bool) -> bool {
    catch_unwind(|| c_str(input).is_some_and(f)).unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn at_is_valid_email(input: *const c_char) -> bool {
    check(input, validate::is_valid_email)
}

#[unsafe(no_mangle)]
pub extern "C" fn at_is_valid_date(input: *const c_char) -> bool {
    check(input, validate::is_valid_date)
}

#[unsafe(no_mangle)]
pub extern "C" fn at_is_valid_password(input: *const c_char) -> bool {
    check(input, validate::is_valid_password)
}

#[unsafe(no_mangle)]
pub extern "C" fn at_is_valid_plate(input: *const c_char) -> bool {
    check(input, validate::is_valid_plate)
}

#[unsafe(no_mangle)]
pub extern "C" fn at_is_valid_plate_mask(input: *const c_char) -> bool {
    check(input, validate::is_valid_plate_mask)
}

#[unsafe(no_mangle)]
pub extern "C" fn at_is_valid_passport(serial: *const c_char, number: *const c_char) -> bool {
    catch_unwind(|| match (c_str(serial), c_str(number)) {
        (Some(serial), Some(number)) => {
            validate::is_valid_passport(&Document::new(serial, number))
        }
        _ => false,
    })
    .unwrap_or(false)
}

/// Keystroke filter: true if `input` can still grow into a valid plate
/// (or mask, when `mask` is set).
#[unsafe(no_mangle)]
pub extern "C" fn at_is_plate_prefix(input: *const c_char, mask: bool) -> bool {
    catch_unwind(|| c_str(input).is_some_and(|s| validate::is_plate_prefix(s, mask)))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `at_build_request`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn at_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiApiResult` returned by `at_parse_response`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn at_free_result(result: *mut FfiApiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.message);
        free_c_string(result.field);
        free_c_string(result.payload_json);
    });
}

/// Free an `FfiStatusMessage`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn at_free_status_message(msg: *mut FfiStatusMessage) {
    if msg.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let msg = unsafe { Box::from_raw(msg) };
        free_c_string(msg.message);
        free_c_string(msg.field);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn at_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
