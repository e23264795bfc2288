//! Domain DTOs for the vehicle-tracking API.
//!
//! # Design
//! These types mirror the backend's JSON schema. Field names that differ
//! from the wire (`pswd`, `cords`, `mark`) are renamed with serde so Rust
//! code reads naturally while the JSON stays byte-compatible. Absent
//! optional request fields are omitted rather than sent as `null`.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Core entities
// ---------------------------------------------------------------------------

/// Identity document: passports and the two vehicle certificates (STS/PTS).
///
/// Lengths are not enforced here; `validate::is_valid_passport` is a
/// pre-submission check only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub serial: String,
    pub number: String,
}

impl Document {
    pub fn new(serial: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            number: number.into(),
        }
    }
}

/// Account role. Decides which search endpoints a user may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "operator")]
    Operator,
    #[serde(rename = "audit")]
    Auditor,
}

impl Role {
    /// Localized name shown next to the user's FIO.
    pub fn display_name(self) -> &'static str {
        match self {
            Role::User => "Пользователь",
            Role::Operator => "Оператор",
            Role::Auditor => "Аудитор",
        }
    }
}

/// The authenticated account, persisted as the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub lastname: Option<String>,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
    #[serde(default)]
    pub passport: Option<Document>,
}

impl User {
    /// Record a confirmed passport. Sets both fields together so a verified
    /// user always carries a passport.
    pub fn confirm_passport(&mut self, passport: Document) {
        self.passport = Some(passport);
        self.is_verified = true;
    }
}

/// Owner's full name, encoded on the wire as `[surname, name, lastname?]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerFio {
    pub surname: String,
    pub name: String,
    pub lastname: Option<String>,
}

impl Serialize for OwnerFio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.surname)?;
        tuple.serialize_element(&self.name)?;
        tuple.serialize_element(&self.lastname)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for OwnerFio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FioVisitor;

        impl<'de> Visitor<'de> for FioVisitor {
            type Value = OwnerFio;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array [surname, name, lastname?]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<OwnerFio, A::Error> {
                let surname = seq
                    .next_element::<String>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let name = seq
                    .next_element::<String>()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                // The third slot may be missing entirely or null.
                let lastname = seq.next_element::<Option<String>>()?.flatten();
                Ok(OwnerFio {
                    surname,
                    name,
                    lastname,
                })
            }
        }

        deserializer.deserialize_seq(FioVisitor)
    }
}

/// A registered vehicle as returned by car searches. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub owner_fio: OwnerFio,
    #[serde(rename = "gos_num")]
    pub license_plate: String,
    pub model: String,
    #[serde(rename = "mark")]
    pub make: String,
    pub color: String,
    pub year: u16,
    pub vin: String,
    pub sts: Document,
    pub pts: Document,
}

/// A logged association between a user, a vehicle and a tracking event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub user: User,
    pub car: Car,
    pub track_time: String,
    pub route_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    #[serde(rename = "cords")]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub speed: Option<u16>,
}

/// Points of one trip in temporal order. Empty means no route was found.
///
/// The order is the backend's array order and must be kept as is; points
/// are never re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub points: Vec<RoutePoint>,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Domain status embedded in every response body. `code == 0` is success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            code: 0,
            message: None,
        }
    }

    pub fn with_code(code: i64) -> Self {
        Self {
            code,
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    #[serde(rename = "pswd")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "firstname")]
    pub first_name: String,
    pub surname: String,
    pub lastname: String,
    pub email: String,
    #[serde(rename = "pswd")]
    pub password: String,
    #[serde(rename = "rep_pswd")]
    pub repeated_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportConfirmRequest {
    pub email: String,
    pub passport: Document,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// `DD.MM.YYYY`.
    pub date: String,
    #[serde(rename = "gos_num")]
    pub license_plate: String,
    /// Email of the user whose trip is requested.
    pub user_login: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvgSpeedRequest {
    #[serde(rename = "gos_num")]
    pub license_plate: String,
    pub location: Coordinate,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Every response body carries a domain `Status`.
pub trait WithStatus {
    fn status(&self) -> &Status;
}

macro_rules! impl_with_status {
    ($($ty:ty),* $(,)?) => {
        $(impl WithStatus for $ty {
            fn status(&self) -> &Status {
                &self.status
            }
        })*
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: Status,
    #[serde(default)]
    pub user: Option<User>,
}

/// Registration answer. The backend sends only `status`; a `user` is
/// picked up when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: Status,
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of endpoints that answer with nothing but a status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarSearchResponse {
    pub status: Status,
    #[serde(default)]
    pub cars: Vec<Car>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecordSearchResponse {
    pub status: Status,
    #[serde(default)]
    pub track_info: Vec<TrackRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub status: Status,
    #[serde(default)]
    pub route: Option<Vec<RoutePoint>>,
}

impl RouteResponse {
    /// The trip as a `Route`; a missing `route` field becomes empty.
    pub fn route(&self) -> Route {
        Route {
            points: self.route.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvgSpeedResponse {
    pub status: Status,
    #[serde(default)]
    pub avg_speed: Option<f64>,
}

impl_with_status!(
    AuthResponse,
    RegisterResponse,
    StatusResponse,
    CarSearchResponse,
    TrackRecordSearchResponse,
    RouteResponse,
    AvgSpeedResponse,
);
