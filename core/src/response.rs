//! The two-tier result of an API call.
//!
//! A call yields a transport status (real HTTP status, or 503 when nothing
//! came back) and, separately, a decoded body whose embedded `Status.code`
//! is the domain result. The two are kept in named fields so they cannot be
//! confused; `outcome` folds them through the taxonomy.

use crate::error::TransportError;
use crate::status::{
    transport_status_to_message, DomainStatus, ErrorField, SERVICE_UNAVAILABLE, UNKNOWN_ERROR,
};
use crate::types::WithStatus;

/// Result of one endpoint call.
///
/// `payload` is present whenever the body decoded against the expected
/// shape, whatever `http_status` is. Callers must branch on the embedded
/// domain status, not on `http_status`, to detect domain errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub http_status: u16,
    pub payload: Option<T>,
    /// Set when no response was received; `http_status` is then 503.
    pub transport_error: Option<TransportError>,
}

/// A transport-level failure ready for display. No field association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub http_status: u16,
    pub message: &'static str,
}

/// A domain-level failure ready to attach to an input group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub status: DomainStatus,
    pub message: &'static str,
    pub field: ErrorField,
}

impl DomainError {
    pub fn from_code(code: i64) -> Self {
        let status = DomainStatus::from_code(code);
        Self {
            status,
            message: status.message(),
            field: status.field(),
        }
    }

    /// A response that reported success but lacked what the flow needs.
    pub fn unknown(code: i64) -> Self {
        Self {
            status: DomainStatus::Unknown(code),
            message: UNKNOWN_ERROR,
            field: ErrorField::All,
        }
    }
}

/// What the caller should do with a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Rejected(DomainError),
    Unavailable(TransportFailure),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Rejected(err) => Outcome::Rejected(err),
            Outcome::Unavailable(failure) => Outcome::Unavailable(failure),
        }
    }

    /// `(message, field tag)` for display; `None` on success.
    pub fn error_message(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Rejected(err) => Some((err.message, err.field.as_str())),
            Outcome::Unavailable(failure) => Some((failure.message, ErrorField::All.as_str())),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn received(http_status: u16, payload: Option<T>) -> Self {
        Self {
            http_status,
            payload,
            transport_error: None,
        }
    }

    /// No response at all: the 503 sentinel.
    pub fn unavailable(error: TransportError) -> Self {
        Self {
            http_status: SERVICE_UNAVAILABLE,
            payload: None,
            transport_error: Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            http_status: self.http_status,
            payload: self.payload.map(f),
            transport_error: self.transport_error,
        }
    }
}

impl<T: WithStatus> ApiResponse<T> {
    /// Embedded domain code, if a body was decoded.
    pub fn domain_code(&self) -> Option<i64> {
        self.payload.as_ref().map(|p| p.status().code)
    }

    /// Classify by payload first, then by embedded code.
    pub fn outcome(&self) -> Outcome<&T> {
        match &self.payload {
            None => Outcome::Unavailable(TransportFailure {
                http_status: self.http_status,
                message: transport_status_to_message(self.http_status),
            }),
            Some(payload) if payload.status().is_success() => Outcome::Success(payload),
            Some(payload) => Outcome::Rejected(DomainError::from_code(payload.status().code)),
        }
    }

    pub fn into_outcome(self) -> Outcome<T> {
        let http_status = self.http_status;
        match self.payload {
            None => Outcome::Unavailable(TransportFailure {
                http_status,
                message: transport_status_to_message(http_status),
            }),
            Some(payload) if payload.status().is_success() => Outcome::Success(payload),
            Some(payload) => Outcome::Rejected(DomainError::from_code(payload.status().code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Status, StatusResponse};

    fn body(code: i64) -> StatusResponse {
        StatusResponse {
            status: Status::with_code(code),
        }
    }

    #[test]
    fn missing_payload_is_unavailable() {
        let resp: ApiResponse<StatusResponse> = ApiResponse::received(404, None);
        let outcome = resp.outcome();
        assert_eq!(
            outcome,
            Outcome::Unavailable(TransportFailure {
                http_status: 404,
                message: "Не найдено",
            })
        );
        assert_eq!(outcome.error_message(), Some(("Не найдено", "all")));
    }

    #[test]
    fn unavailable_sentinel_is_503() {
        let resp: ApiResponse<StatusResponse> =
            ApiResponse::unavailable(TransportError::Connect("refused".to_string()));
        assert_eq!(resp.http_status, 503);
        assert!(resp.payload.is_none());
        assert_eq!(
            resp.outcome().error_message(),
            Some(("Сервер не запущен", "all"))
        );
    }

    #[test]
    fn embedded_code_wins_over_transport_status() {
        // Non-2xx with a decodable body still carries the domain code.
        let resp = ApiResponse::received(500, Some(body(0)));
        assert!(resp.outcome().is_success());

        let resp = ApiResponse::received(200, Some(body(2000)));
        assert_eq!(resp.domain_code(), Some(2000));
        match resp.into_outcome() {
            Outcome::Rejected(err) => {
                assert_eq!(err.status, DomainStatus::InvalidCredentials);
                assert_eq!(err.message, "Неверный логин или пароль");
                assert_eq!(err.field.as_str(), "login or pswd");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn outcome_map_keeps_failures() {
        let outcome: Outcome<i32> = Outcome::Rejected(DomainError::from_code(3001));
        let mapped = outcome.map(|v| v + 1);
        assert_eq!(mapped.error_message(), Some(("Пользователь с данной почтой уже существует", "email")));
        assert_eq!(Outcome::Success(1).map(|v| v + 1), Outcome::Success(2));
    }
}
