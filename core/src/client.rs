//! Stateless HTTP request builder and response parser for the tracking API.
//!
//! # Design
//! `TrackerClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Whoever executes the round trip (a `Transport` or a
//! foreign host) sits between the two, so this module stays free of I/O.
//!
//! Parsing never fails: the status is always taken from the response, and
//! the body is decoded against the endpoint's shape or dropped.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::ApiResponse;
use crate::search::{SearchQuery, SearchResponse, SearchTarget};
use crate::types::{
    AuthRequest, AuthResponse, AvgSpeedRequest, AvgSpeedResponse, CarSearchResponse,
    PassportConfirmRequest, RegisterRequest, RegisterResponse, RouteRequest, RouteResponse,
    StatusResponse, TrackRecordSearchResponse,
};

/// Synchronous, stateless client for the tracking API.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    base_url: String,
}

impl TrackerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    pub fn build_auth(&self, input: &AuthRequest) -> Result<HttpRequest, ApiError> {
        self.post(Endpoint::Auth, input)
    }

    pub fn build_register(&self, input: &RegisterRequest) -> Result<HttpRequest, ApiError> {
        self.post(Endpoint::Register, input)
    }

    pub fn build_passport_confirm(
        &self,
        input: &PassportConfirmRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.post(Endpoint::PassportConfirm, input)
    }

    pub fn build_route(&self, input: &RouteRequest) -> Result<HttpRequest, ApiError> {
        self.post(Endpoint::Route, input)
    }

    pub fn build_avg_speed(&self, input: &AvgSpeedRequest) -> Result<HttpRequest, ApiError> {
        self.post(Endpoint::AvgSpeed, input)
    }

    /// Build a search for `target`. Fails when the target has no endpoint
    /// for the query's kind.
    pub fn build_search(
        &self,
        target: SearchTarget,
        query: &SearchQuery,
    ) -> Result<HttpRequest, ApiError> {
        let kind = query.kind();
        let endpoint = target
            .endpoint(kind)
            .ok_or(ApiError::UnsupportedSearch { target, kind })?;
        let body = query
            .body(target)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(endpoint, body))
    }

    pub fn parse_auth(&self, response: HttpResponse) -> ApiResponse<AuthResponse> {
        decode(Endpoint::Auth, response)
    }

    pub fn parse_register(&self, response: HttpResponse) -> ApiResponse<RegisterResponse> {
        decode(Endpoint::Register, response)
    }

    pub fn parse_passport_confirm(&self, response: HttpResponse) -> ApiResponse<StatusResponse> {
        decode(Endpoint::PassportConfirm, response)
    }

    pub fn parse_route(&self, response: HttpResponse) -> ApiResponse<RouteResponse> {
        decode(Endpoint::Route, response)
    }

    pub fn parse_avg_speed(&self, response: HttpResponse) -> ApiResponse<AvgSpeedResponse> {
        decode(Endpoint::AvgSpeed, response)
    }

    /// Decode a search body into the target's result shape.
    pub fn parse_search(
        &self,
        target: SearchTarget,
        response: HttpResponse,
    ) -> ApiResponse<SearchResponse> {
        match target {
            SearchTarget::Cars => {
                decode::<CarSearchResponse>(Endpoint::CarSearch, response).map(Into::into)
            }
            SearchTarget::TrackRecords => {
                decode::<TrackRecordSearchResponse>(Endpoint::TrackSearch, response)
                    .map(Into::into)
            }
        }
    }

    fn post<B: Serialize>(&self, endpoint: Endpoint, input: &B) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(endpoint, body))
    }

    fn request(&self, endpoint: Endpoint, body: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url(endpoint),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

/// Keep the status, decode the body if it fits `T`.
fn decode<T: DeserializeOwned>(endpoint: Endpoint, response: HttpResponse) -> ApiResponse<T> {
    let payload = match serde_json::from_str::<T>(&response.body) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!(
                path = endpoint.path(),
                status = response.status,
                error = %e,
                "response body does not match expected shape"
            );
            None
        }
    };
    debug!(
        path = endpoint.path(),
        status = response.status,
        decoded = payload.is_some(),
        "parsed response"
    );
    ApiResponse::received(response.status, payload)
}
