//! Role-based search dispatch.
//!
//! Operators search vehicles, auditors search track records, plain users
//! have no search. Each query kind maps to one endpoint per target; the
//! mapping is an exhaustive match so a new role or query kind fails to
//! compile until it is routed.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::types::{
    Car, CarSearchResponse, Document, Role, Status, TrackRecord, TrackRecordSearchResponse,
    WithStatus,
};

/// What a role searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchTarget {
    Cars,
    TrackRecords,
}

/// Which discriminating input a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Filters,
    Fio,
    Passport,
    Date,
    PlateMask,
}

impl Role {
    pub fn search_target(self) -> Option<SearchTarget> {
        match self {
            Role::Operator => Some(SearchTarget::Cars),
            Role::Auditor => Some(SearchTarget::TrackRecords),
            Role::User => None,
        }
    }
}

impl SearchTarget {
    /// Endpoint for `kind`, or `None` when the backend has no such search.
    pub fn endpoint(self, kind: SearchKind) -> Option<Endpoint> {
        match (self, kind) {
            (SearchTarget::Cars, SearchKind::Filters) => Some(Endpoint::CarSearch),
            (SearchTarget::Cars, SearchKind::Fio) => Some(Endpoint::CarSearchByFio),
            (SearchTarget::Cars, SearchKind::Passport) => Some(Endpoint::CarSearchByPassport),
            (SearchTarget::Cars, SearchKind::Date) => None,
            (SearchTarget::Cars, SearchKind::PlateMask) => Some(Endpoint::CarSearchByPlateMask),
            (SearchTarget::TrackRecords, SearchKind::Filters) => Some(Endpoint::TrackSearch),
            (SearchTarget::TrackRecords, SearchKind::Fio) => Some(Endpoint::TrackSearchByFio),
            (SearchTarget::TrackRecords, SearchKind::Passport) => {
                Some(Endpoint::TrackSearchByPassport)
            }
            (SearchTarget::TrackRecords, SearchKind::Date) => Some(Endpoint::TrackSearchByDate),
            (SearchTarget::TrackRecords, SearchKind::PlateMask) => {
                Some(Endpoint::TrackSearchByPlateMask)
            }
        }
    }

    /// Reverse lookup used when only the endpoint is known (C ABI).
    pub fn for_endpoint(endpoint: Endpoint) -> Option<(SearchTarget, SearchKind)> {
        let pair = match endpoint {
            Endpoint::CarSearch => (SearchTarget::Cars, SearchKind::Filters),
            Endpoint::CarSearchByFio => (SearchTarget::Cars, SearchKind::Fio),
            Endpoint::CarSearchByPassport => (SearchTarget::Cars, SearchKind::Passport),
            Endpoint::CarSearchByPlateMask => (SearchTarget::Cars, SearchKind::PlateMask),
            Endpoint::TrackSearch => (SearchTarget::TrackRecords, SearchKind::Filters),
            Endpoint::TrackSearchByFio => (SearchTarget::TrackRecords, SearchKind::Fio),
            Endpoint::TrackSearchByPassport => (SearchTarget::TrackRecords, SearchKind::Passport),
            Endpoint::TrackSearchByDate => (SearchTarget::TrackRecords, SearchKind::Date),
            Endpoint::TrackSearchByPlateMask => {
                (SearchTarget::TrackRecords, SearchKind::PlateMask)
            }
            Endpoint::Auth
            | Endpoint::Register
            | Endpoint::PassportConfirm
            | Endpoint::Route
            | Endpoint::AvgSpeed => return None,
        };
        Some(pair)
    }
}

/// Owner name filter. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FioQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FioQuery {
    /// Build from raw form inputs: trimmed, empty parts dropped, each word
    /// capitalised.
    pub fn from_form(surname: &str, name: &str, lastname: &str) -> Self {
        Self {
            lastname: normalize_name(lastname),
            surname: normalize_name(surname),
            name: normalize_name(name),
        }
    }
}

/// Combined filter search. Dates are only sent for track records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(flatten)]
    pub fio: FioQuery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        rename = "gos_num",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub license_plate: Option<String>,
}

impl SearchFilters {
    /// Normalise raw form inputs. The passport is kept only when both its
    /// serial and number were typed.
    pub fn from_form(
        fio: FioQuery,
        passport_serial: &str,
        passport_number: &str,
        date: &str,
        license_plate: &str,
    ) -> Self {
        let passport = if passport_serial.trim().is_empty() || passport_number.trim().is_empty() {
            None
        } else {
            Some(Document::new(passport_serial.trim(), passport_number.trim()))
        };
        Self {
            fio,
            passport,
            date: non_empty(date),
            license_plate: non_empty(license_plate),
        }
    }
}

/// A search request, tagged by its discriminating input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Filters(SearchFilters),
    Fio(FioQuery),
    Passport(Document),
    Date(String),
    PlateMask(String),
}

#[derive(Deserialize)]
struct PassportBody {
    passport: Document,
}

#[derive(Deserialize)]
struct DateBody {
    date: String,
}

#[derive(Deserialize)]
struct PlateMaskBody {
    gos_num: String,
}

impl SearchQuery {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchQuery::Filters(_) => SearchKind::Filters,
            SearchQuery::Fio(_) => SearchKind::Fio,
            SearchQuery::Passport(_) => SearchKind::Passport,
            SearchQuery::Date(_) => SearchKind::Date,
            SearchQuery::PlateMask(_) => SearchKind::PlateMask,
        }
    }

    /// JSON body for `target`. Filters drop the date for car searches.
    pub(crate) fn body(&self, target: SearchTarget) -> Result<String, serde_json::Error> {
        match self {
            SearchQuery::Filters(filters) => match target {
                SearchTarget::Cars => {
                    let without_date = SearchFilters {
                        date: None,
                        ..filters.clone()
                    };
                    serde_json::to_string(&without_date)
                }
                SearchTarget::TrackRecords => serde_json::to_string(filters),
            },
            SearchQuery::Fio(fio) => serde_json::to_string(fio),
            SearchQuery::Passport(passport) => {
                serde_json::to_string(&serde_json::json!({ "passport": passport }))
            }
            SearchQuery::Date(date) => serde_json::to_string(&serde_json::json!({ "date": date })),
            SearchQuery::PlateMask(mask) => {
                serde_json::to_string(&serde_json::json!({ "gos_num": mask }))
            }
        }
    }

    /// Parse a wire-shaped JSON body back into a query of `kind`.
    pub fn from_json(kind: SearchKind, json: &str) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            SearchKind::Filters => SearchQuery::Filters(serde_json::from_str(json)?),
            SearchKind::Fio => SearchQuery::Fio(serde_json::from_str(json)?),
            SearchKind::Passport => {
                SearchQuery::Passport(serde_json::from_str::<PassportBody>(json)?.passport)
            }
            SearchKind::Date => SearchQuery::Date(serde_json::from_str::<DateBody>(json)?.date),
            SearchKind::PlateMask => {
                SearchQuery::PlateMask(serde_json::from_str::<PlateMaskBody>(json)?.gos_num)
            }
        })
    }
}

/// Search hits, shaped by the role's target. Serializes as
/// `{"target": "cars" | "track_records", "items": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", content = "items", rename_all = "snake_case")]
pub enum SearchResults {
    Cars(Vec<Car>),
    TrackRecords(Vec<TrackRecord>),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Cars(cars) => cars.len(),
            SearchResults::TrackRecords(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decoded search body of either target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub status: Status,
    pub results: SearchResults,
}

impl WithStatus for SearchResponse {
    fn status(&self) -> &Status {
        &self.status
    }
}

impl From<CarSearchResponse> for SearchResponse {
    fn from(resp: CarSearchResponse) -> Self {
        Self {
            status: resp.status,
            results: SearchResults::Cars(resp.cars),
        }
    }
}

impl From<TrackRecordSearchResponse> for SearchResponse {
    fn from(resp: TrackRecordSearchResponse) -> Self {
        Self {
            status: resp.status,
            results: SearchResults::TrackRecords(resp.track_info),
        }
    }
}

fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn normalize_name(input: &str) -> Option<String> {
    non_empty(input).map(|s| capitalize_words(&s))
}

/// Upper-case the first letter of every word (words split on whitespace
/// and hyphens), lower-case the rest.
fn capitalize_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = ch.is_whitespace() || ch == '-';
    }
    out
}
