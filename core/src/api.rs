//! Async orchestration: build, execute with a timeout, parse.
//!
//! # Design
//! `TrackerApi` pairs the pure `TrackerClient` with a `Transport`. Every
//! round trip is bounded by `tokio::time::timeout`, so the limit holds for
//! any transport. A request that produces no response becomes the 503
//! sentinel; nothing at this layer retries.
//!
//! The flow methods (`login`, `register_account`, `confirm_passport_for`,
//! `logout`) also maintain the session store and return an owned
//! `Outcome` ready for display.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::client::TrackerClient;
use crate::config::{ClientConfig, ConfigError};
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::response::{ApiResponse, DomainError, Outcome};
use crate::search::{SearchQuery, SearchResponse};
use crate::session::SessionStore;
use crate::status::DomainStatus;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    AuthRequest, AuthResponse, AvgSpeedRequest, AvgSpeedResponse, Document,
    PassportConfirmRequest, RegisterRequest, RegisterResponse, Role, RouteRequest, RouteResponse,
    StatusResponse, User,
};
use crate::validate::is_valid_passport;

pub struct TrackerApi<T = HttpTransport> {
    client: TrackerClient,
    transport: T,
    timeout: Duration,
}

impl TrackerApi<HttpTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::new(
            TrackerClient::new(config.base_url_str()),
            transport,
            config.timeout,
        ))
    }
}

impl<T: Transport> TrackerApi<T> {
    pub fn new(client: TrackerClient, transport: T, timeout: Duration) -> Self {
        Self {
            client,
            transport,
            timeout,
        }
    }

    pub fn client(&self) -> &TrackerClient {
        &self.client
    }

    pub async fn auth(&self, request: &AuthRequest) -> Result<ApiResponse<AuthResponse>, ApiError> {
        let http = self.client.build_auth(request)?;
        Ok(self.call(http, TrackerClient::parse_auth).await)
    }

    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<RegisterResponse>, ApiError> {
        let http = self.client.build_register(request)?;
        Ok(self.call(http, TrackerClient::parse_register).await)
    }

    pub async fn confirm_passport(
        &self,
        request: &PassportConfirmRequest,
    ) -> Result<ApiResponse<StatusResponse>, ApiError> {
        let http = self.client.build_passport_confirm(request)?;
        Ok(self.call(http, TrackerClient::parse_passport_confirm).await)
    }

    /// Search on behalf of `role`. Operators get cars, auditors get track
    /// records; a plain user has no search.
    pub async fn search(
        &self,
        role: Role,
        query: &SearchQuery,
    ) -> Result<ApiResponse<SearchResponse>, ApiError> {
        let target = role
            .search_target()
            .ok_or(ApiError::SearchNotPermitted { role })?;
        let http = self.client.build_search(target, query)?;
        Ok(self
            .call(http, |client, response| client.parse_search(target, response))
            .await)
    }

    pub async fn route(
        &self,
        request: &RouteRequest,
    ) -> Result<ApiResponse<RouteResponse>, ApiError> {
        let http = self.client.build_route(request)?;
        Ok(self.call(http, TrackerClient::parse_route).await)
    }

    pub async fn avg_speed(
        &self,
        request: &AvgSpeedRequest,
    ) -> Result<ApiResponse<AvgSpeedResponse>, ApiError> {
        let http = self.client.build_avg_speed(request)?;
        Ok(self.call(http, TrackerClient::parse_avg_speed).await)
    }

    /// Authenticate and store the user as the current session.
    pub async fn login(
        &self,
        store: &dyn SessionStore,
        email: &str,
        password: &str,
    ) -> Result<Outcome<User>, ApiError> {
        let request = AuthRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let outcome = self.auth(&request).await?.into_outcome();
        match outcome {
            Outcome::Success(AuthResponse { user: Some(user), .. }) => {
                store.save(&user)?;
                info!(email = %user.email, role = ?user.role, "logged in");
                Ok(Outcome::Success(user))
            }
            Outcome::Success(AuthResponse { status, .. }) => {
                warn!("auth succeeded without a user record");
                Ok(Outcome::Rejected(DomainError::unknown(status.code)))
            }
            Outcome::Rejected(err) => Ok(Outcome::Rejected(err)),
            Outcome::Unavailable(failure) => Ok(Outcome::Unavailable(failure)),
        }
    }

    /// Create an account. The session is stored only when the backend
    /// returns the new user.
    pub async fn register_account(
        &self,
        store: &dyn SessionStore,
        request: &RegisterRequest,
    ) -> Result<Outcome<Option<User>>, ApiError> {
        let outcome = self.register(request).await?.into_outcome();
        if let Outcome::Success(RegisterResponse { user: Some(user), .. }) = &outcome {
            store.save(user)?;
            info!(email = %user.email, "registered and logged in");
        }
        Ok(outcome.map(|response| response.user))
    }

    /// Confirm `passport` for `user`. An obviously malformed passport is
    /// rejected locally without a request. On success the user is updated
    /// and re-saved as the current session.
    ///
    /// The local rejection reuses code 2004, so it displays the server's
    /// "Некорректные пасспортные данные" rather than a separate
    /// format-error sentence.
    pub async fn confirm_passport_for(
        &self,
        store: &dyn SessionStore,
        user: &mut User,
        passport: Document,
    ) -> Result<Outcome<()>, ApiError> {
        if !is_valid_passport(&passport) {
            debug!(email = %user.email, "passport rejected before sending");
            return Ok(Outcome::Rejected(DomainError::from_code(
                DomainStatus::InvalidPassport.code(),
            )));
        }
        let request = PassportConfirmRequest {
            email: user.email.clone(),
            passport: passport.clone(),
        };
        let outcome = self.confirm_passport(&request).await?.into_outcome();
        if outcome.is_success() {
            user.confirm_passport(passport);
            store.save(user)?;
            info!(email = %user.email, "passport confirmed");
        }
        Ok(outcome.map(|_| ()))
    }

    /// Forget the current user. No request is sent.
    pub fn logout(&self, store: &dyn SessionStore) -> Result<(), ApiError> {
        store.clear()?;
        info!("logged out");
        Ok(())
    }

    async fn call<R>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(&TrackerClient, HttpResponse) -> ApiResponse<R>,
    ) -> ApiResponse<R> {
        let url = request.url.clone();
        match self.round_trip(request).await {
            Ok(response) => {
                debug!(%url, status = response.status, "received response");
                parse(&self.client, response)
            }
            Err(err) => {
                warn!(%url, error = %err, "no response from server");
                ApiResponse::unavailable(err)
            }
        }
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        match tokio::time::timeout(self.timeout, self.transport.execute(request)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(self.timeout)),
        }
    }
}
