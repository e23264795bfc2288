use std::sync::{Arc, LazyLock};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub serial: String,
    pub number: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Operator,
    Audit,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub surname: String,
    pub lastname: Option<String>,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
    pub passport: Option<Document>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Car {
    /// `[surname, name, lastname]`.
    pub owner_fio: (String, String, Option<String>),
    pub gos_num: String,
    pub model: String,
    pub mark: String,
    pub color: String,
    pub year: u16,
    pub vin: String,
    pub sts: Document,
    pub pts: Document,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackInfo {
    pub user: User,
    pub car: Car,
    pub track_time: String,
    pub route_date: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoutePoint {
    pub cords: Location,
    pub speed: Option<u16>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Status {
    pub code: i64,
    pub message: String,
}

impl Status {
    fn ok() -> Self {
        Self {
            code: 0,
            message: "OK".to_string(),
        }
    }

    fn error(code: i64, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}

// Backend result codes.
pub const INVALID_DATE: i64 = 1001;
pub const INVALID_GOS_NUM: i64 = 1002;
pub const INVALID_GOS_NUM_MASK: i64 = 1003;
pub const INVALID_AUTH_DATA: i64 = 2000;
pub const INVALID_EMAIL: i64 = 2001;
pub const INVALID_PSWD: i64 = 2002;
pub const INVALID_PSWDS: i64 = 2003;
pub const INVALID_PASSPORT: i64 = 2004;
pub const PASSPORT_EXIST: i64 = 2005;
pub const EMAIL_EXIST: i64 = 3001;
pub const EMAIL_NOT_FOUND: i64 = 3002;
pub const CAMERA_NOT_FOUND: i64 = 4002;
pub const AVG_SPEED_NOT_FOUND: i64 = 4003;

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub pswd: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub firstname: String,
    pub surname: String,
    #[serde(default)]
    pub lastname: Option<String>,
    pub email: String,
    pub pswd: String,
    pub rep_pswd: String,
}

#[derive(Deserialize)]
pub struct PassportConfirmRequest {
    pub email: String,
    pub passport: Document,
}

#[derive(Default, Deserialize)]
pub struct FioFilter {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
}

#[derive(Deserialize)]
pub struct FilterRequest {
    #[serde(flatten)]
    pub fio: FioFilter,
    pub passport: Option<Document>,
    pub date: Option<String>,
    pub gos_num: Option<String>,
}

#[derive(Deserialize)]
pub struct PassportRequest {
    pub passport: Document,
}

#[derive(Deserialize)]
pub struct DateRequest {
    pub date: String,
}

#[derive(Deserialize)]
pub struct MaskRequest {
    pub gos_num: String,
}

#[derive(Deserialize)]
pub struct RouteRequest {
    pub date: String,
    pub gos_num: String,
    pub user_login: String,
}

#[derive(Deserialize)]
pub struct AvgSpeedRequest {
    pub gos_num: String,
    pub location: Location,
}

#[derive(Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Status,
}

#[derive(Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: Status,
    pub user: Option<User>,
}

#[derive(Serialize, Deserialize)]
pub struct CarsResponse {
    pub status: Status,
    pub cars: Vec<Car>,
}

#[derive(Serialize, Deserialize)]
pub struct TrackInfoResponse {
    pub status: Status,
    pub track_info: Vec<TrackInfo>,
}

#[derive(Serialize, Deserialize)]
pub struct RouteResponse {
    pub status: Status,
    pub route: Option<Vec<RoutePoint>>,
}

#[derive(Serialize, Deserialize)]
pub struct AvgSpeedResponse {
    pub status: Status,
    pub avg_speed: Option<f64>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("valid date regex"));
static GOS_NUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[АВЕКМНОРСТУХ]\d{3}[АВЕКМНОРСТУХ]{2}\d{2,3}$").expect("valid plate regex")
});
static GOS_NUM_MASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[АВЕКМНОРСТУХ*](\d|\*){3}[АВЕКМНОРСТУХ*]{2}(\d{2,3}|\*)$")
        .expect("valid mask regex")
});

fn valid_password(pswd: &str) -> bool {
    pswd.chars().count() >= 8
}

fn valid_passport(passport: &Document) -> bool {
    let digits = |s: &str, len: usize| s.len() == len && s.chars().all(|c| c.is_ascii_digit());
    digits(&passport.serial, 4) && digits(&passport.number, 6)
}

/// `*` matches one position; a lone `*` region matches any region.
pub fn matches_mask(mask: &str, gos_num: &str) -> bool {
    let mask: Vec<char> = mask.chars().collect();
    let plate: Vec<char> = gos_num.chars().collect();
    if mask.len() < 7 || plate.len() < 8 {
        return false;
    }
    let head = mask[..6]
        .iter()
        .zip(&plate[..6])
        .all(|(m, p)| *m == '*' || m == p);
    let region = &mask[6..];
    head && (region == ['*'] || region == &plate[6..])
}

fn same_name(filter: &Option<String>, value: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(wanted) => value.is_some_and(|v| v.to_lowercase() == wanted.to_lowercase()),
    }
}

impl FioFilter {
    fn matches(&self, surname: &str, name: &str, lastname: Option<&str>) -> bool {
        same_name(&self.surname, Some(surname))
            && same_name(&self.name, Some(name))
            && same_name(&self.lastname, lastname)
    }

    fn matches_car(&self, car: &Car) -> bool {
        let (surname, name, lastname) = &car.owner_fio;
        self.matches(surname, name, lastname.as_deref())
    }

    fn matches_user(&self, user: &User) -> bool {
        self.matches(&user.surname, &user.name, user.lastname.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Account {
    pub user: User,
    pub pswd: String,
}

#[derive(Clone, Debug)]
pub struct RegisteredCar {
    pub car: Car,
    pub owner_passport: Option<Document>,
}

#[derive(Clone, Debug)]
pub struct StoredRoute {
    pub gos_num: String,
    pub user_login: String,
    pub date: String,
    pub points: Vec<RoutePoint>,
}

#[derive(Clone, Debug)]
pub struct SpeedReading {
    pub gos_num: String,
    pub camera: Location,
    pub avg_speed: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Store {
    pub accounts: Vec<Account>,
    pub cars: Vec<RegisteredCar>,
    pub track_info: Vec<TrackInfo>,
    pub routes: Vec<StoredRoute>,
    pub cameras: Vec<Location>,
    pub speeds: Vec<SpeedReading>,
}

pub type Db = Arc<RwLock<Store>>;

fn doc(serial: &str, number: &str) -> Document {
    Document {
        serial: serial.to_string(),
        number: number.to_string(),
    }
}

fn loc(latitude: f64, longitude: f64) -> Location {
    Location {
        latitude,
        longitude,
    }
}

impl Store {
    /// One account per role, two cars, two track records, one route and one
    /// camera with a recorded average speed.
    pub fn seeded() -> Self {
        let ivanov = User {
            name: "Иван".to_string(),
            surname: "Иванов".to_string(),
            lastname: Some("Иванович".to_string()),
            email: "ivanov@example.ru".to_string(),
            role: Role::Operator,
            is_verified: true,
            passport: Some(doc("4510", "123456")),
        };
        let smirnova = User {
            name: "Анна".to_string(),
            surname: "Смирнова".to_string(),
            lastname: None,
            email: "smirnova@example.ru".to_string(),
            role: Role::Audit,
            is_verified: true,
            passport: Some(doc("4511", "654321")),
        };
        let petrov = User {
            name: "Пётр".to_string(),
            surname: "Петров".to_string(),
            lastname: None,
            email: "petrov@example.ru".to_string(),
            role: Role::User,
            is_verified: false,
            passport: None,
        };

        let granta = Car {
            owner_fio: (
                "Иванов".to_string(),
                "Иван".to_string(),
                Some("Иванович".to_string()),
            ),
            gos_num: "А123ВС77".to_string(),
            model: "Granta".to_string(),
            mark: "Lada".to_string(),
            color: "белый".to_string(),
            year: 2019,
            vin: "XTA219000K0000001".to_string(),
            sts: doc("7701", "100001"),
            pts: doc("7702", "200001"),
        };
        let rio = Car {
            owner_fio: ("Петров".to_string(), "Пётр".to_string(), None),
            gos_num: "М456ОР199".to_string(),
            model: "Rio".to_string(),
            mark: "Kia".to_string(),
            color: "чёрный".to_string(),
            year: 2021,
            vin: "Z94CB41AAMR000002".to_string(),
            sts: doc("7703", "100002"),
            pts: doc("7704", "200002"),
        };

        let camera = loc(55.7558, 37.6173);

        Self {
            accounts: vec![
                Account {
                    user: ivanov.clone(),
                    pswd: "operator1".to_string(),
                },
                Account {
                    user: smirnova,
                    pswd: "auditor12".to_string(),
                },
                Account {
                    user: petrov.clone(),
                    pswd: "password1".to_string(),
                },
            ],
            cars: vec![
                RegisteredCar {
                    car: granta.clone(),
                    owner_passport: ivanov.passport.clone(),
                },
                RegisteredCar {
                    car: rio.clone(),
                    owner_passport: None,
                },
            ],
            track_info: vec![
                TrackInfo {
                    user: ivanov,
                    car: granta,
                    track_time: "08:15".to_string(),
                    route_date: "01.02.2024".to_string(),
                },
                TrackInfo {
                    user: petrov,
                    car: rio,
                    track_time: "18:40".to_string(),
                    route_date: "02.02.2024".to_string(),
                },
            ],
            routes: vec![StoredRoute {
                gos_num: "А123ВС77".to_string(),
                user_login: "ivanov@example.ru".to_string(),
                date: "01.02.2024".to_string(),
                points: vec![
                    RoutePoint {
                        cords: loc(55.7512, 37.6184),
                        speed: Some(40),
                    },
                    RoutePoint {
                        cords: camera,
                        speed: Some(62),
                    },
                    RoutePoint {
                        cords: loc(55.7601, 37.6250),
                        speed: None,
                    },
                ],
            }],
            cameras: vec![camera],
            speeds: vec![SpeedReading {
                gos_num: "А123ВС77".to_string(),
                camera,
                avg_speed: 62.5,
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/user/auth", post(auth))
        .route("/user/registr", post(register))
        .route("/user/passport-confirm", post(passport_confirm))
        .route("/car/search", post(car_search))
        .route("/car/search/by-fio", post(car_search_by_fio))
        .route("/car/search/by-passport", post(car_search_by_passport))
        .route("/car/search/by-gos-num-mask", post(car_search_by_mask))
        .route("/track-info/search", post(track_search))
        .route("/track-info/search/by-fio", post(track_search_by_fio))
        .route("/track-info/search/by-passport", post(track_search_by_passport))
        .route("/track-info/search/by-date", post(track_search_by_date))
        .route("/track-info/search/by-gos-num-mask", post(track_search_by_mask))
        .route("/car/route", post(route))
        .route("/camera/avg-speed", post(avg_speed))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn auth(State(db): State<Db>, Json(input): Json<AuthRequest>) -> Json<AuthResponse> {
    info!(email = %input.email, "POST /user/auth");
    let store = db.read().await;
    let user = EMAIL
        .is_match(&input.email)
        .then(|| {
            store
                .accounts
                .iter()
                .find(|a| a.user.email == input.email && a.pswd == input.pswd)
        })
        .flatten()
        .map(|a| a.user.clone());
    let status = match user {
        Some(_) => Status::ok(),
        None => Status::error(INVALID_AUTH_DATA, "Invalid email or password"),
    };
    Json(AuthResponse { status, user })
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterRequest>,
) -> Json<StatusResponse> {
    info!(email = %input.email, "POST /user/registr");
    let status = if !EMAIL.is_match(&input.email) {
        Status::error(INVALID_EMAIL, "Invalid email")
    } else if !valid_password(&input.pswd) {
        Status::error(INVALID_PSWD, "Invalid password")
    } else if input.pswd != input.rep_pswd {
        Status::error(INVALID_PSWDS, "Invalid passwords unmatch")
    } else {
        let mut store = db.write().await;
        if store.accounts.iter().any(|a| a.user.email == input.email) {
            Status::error(EMAIL_EXIST, "email already exists")
        } else {
            store.accounts.push(Account {
                user: User {
                    name: input.firstname,
                    surname: input.surname,
                    lastname: input.lastname.filter(|l| !l.is_empty()),
                    email: input.email,
                    role: Role::User,
                    is_verified: false,
                    passport: None,
                },
                pswd: input.pswd,
            });
            Status::ok()
        }
    };
    Json(StatusResponse { status })
}

async fn passport_confirm(
    State(db): State<Db>,
    Json(input): Json<PassportConfirmRequest>,
) -> Json<StatusResponse> {
    info!(email = %input.email, "POST /user/passport-confirm");
    if !EMAIL.is_match(&input.email) {
        return Json(StatusResponse {
            status: Status::error(INVALID_EMAIL, "Invalid email"),
        });
    }
    if !valid_passport(&input.passport) {
        return Json(StatusResponse {
            status: Status::error(INVALID_PASSPORT, "Invalid passport"),
        });
    }
    let mut store = db.write().await;
    let taken = store
        .accounts
        .iter()
        .any(|a| a.user.email != input.email && a.user.passport.as_ref() == Some(&input.passport));
    let status = match store.accounts.iter_mut().find(|a| a.user.email == input.email) {
        None => Status::error(EMAIL_NOT_FOUND, "email not found"),
        Some(_) if taken => Status::error(PASSPORT_EXIST, "passport already exists"),
        Some(account) => {
            account.user.passport = Some(input.passport);
            account.user.is_verified = true;
            Status::ok()
        }
    };
    Json(StatusResponse { status })
}

fn cars_response(result: Result<Vec<Car>, Status>) -> Json<CarsResponse> {
    Json(match result {
        Ok(cars) => CarsResponse {
            status: Status::ok(),
            cars,
        },
        Err(status) => CarsResponse {
            status,
            cars: Vec::new(),
        },
    })
}

fn track_response(result: Result<Vec<TrackInfo>, Status>) -> Json<TrackInfoResponse> {
    Json(match result {
        Ok(track_info) => TrackInfoResponse {
            status: Status::ok(),
            track_info,
        },
        Err(status) => TrackInfoResponse {
            status,
            track_info: Vec::new(),
        },
    })
}

fn check_mask(mask: &str) -> Result<(), Status> {
    if GOS_NUM_MASK.is_match(mask) {
        Ok(())
    } else {
        Err(Status::error(INVALID_GOS_NUM_MASK, "Invalid gos number mask"))
    }
}

fn check_passport(passport: &Document) -> Result<(), Status> {
    if valid_passport(passport) {
        Ok(())
    } else {
        Err(Status::error(INVALID_PASSPORT, "Invalid passport"))
    }
}

fn check_date(date: &str) -> Result<(), Status> {
    if DATE.is_match(date) {
        Ok(())
    } else {
        Err(Status::error(INVALID_DATE, "Invalid date"))
    }
}

fn check_filters(input: &FilterRequest) -> Result<(), Status> {
    if let Some(mask) = &input.gos_num {
        check_mask(mask)?;
    }
    if let Some(passport) = &input.passport {
        check_passport(passport)?;
    }
    if let Some(date) = &input.date {
        check_date(date)?;
    }
    Ok(())
}

async fn car_search(State(db): State<Db>, Json(input): Json<FilterRequest>) -> Json<CarsResponse> {
    info!("POST /car/search");
    let store = db.read().await;
    cars_response(check_filters(&input).map(|()| {
        store
            .cars
            .iter()
            .filter(|c| input.fio.matches_car(&c.car))
            .filter(|c| input.passport.is_none() || c.owner_passport == input.passport)
            .filter(|c| {
                input
                    .gos_num
                    .as_deref()
                    .map_or(true, |mask| matches_mask(mask, &c.car.gos_num))
            })
            .map(|c| c.car.clone())
            .collect()
    }))
}

async fn car_search_by_fio(
    State(db): State<Db>,
    Json(input): Json<FioFilter>,
) -> Json<CarsResponse> {
    info!("POST /car/search/by-fio");
    let store = db.read().await;
    cars_response(Ok(store
        .cars
        .iter()
        .filter(|c| input.matches_car(&c.car))
        .map(|c| c.car.clone())
        .collect()))
}

async fn car_search_by_passport(
    State(db): State<Db>,
    Json(input): Json<PassportRequest>,
) -> Json<CarsResponse> {
    info!("POST /car/search/by-passport");
    let store = db.read().await;
    cars_response(check_passport(&input.passport).map(|()| {
        store
            .cars
            .iter()
            .filter(|c| c.owner_passport.as_ref() == Some(&input.passport))
            .map(|c| c.car.clone())
            .collect()
    }))
}

async fn car_search_by_mask(
    State(db): State<Db>,
    Json(input): Json<MaskRequest>,
) -> Json<CarsResponse> {
    info!(mask = %input.gos_num, "POST /car/search/by-gos-num-mask");
    let store = db.read().await;
    cars_response(check_mask(&input.gos_num).map(|()| {
        store
            .cars
            .iter()
            .filter(|c| matches_mask(&input.gos_num, &c.car.gos_num))
            .map(|c| c.car.clone())
            .collect()
    }))
}

async fn track_search(
    State(db): State<Db>,
    Json(input): Json<FilterRequest>,
) -> Json<TrackInfoResponse> {
    info!("POST /track-info/search");
    let store = db.read().await;
    track_response(check_filters(&input).map(|()| {
        store
            .track_info
            .iter()
            .filter(|t| input.fio.matches_user(&t.user))
            .filter(|t| input.passport.is_none() || t.user.passport == input.passport)
            .filter(|t| input.date.as_deref().map_or(true, |d| t.route_date == d))
            .filter(|t| {
                input
                    .gos_num
                    .as_deref()
                    .map_or(true, |mask| matches_mask(mask, &t.car.gos_num))
            })
            .cloned()
            .collect()
    }))
}

async fn track_search_by_fio(
    State(db): State<Db>,
    Json(input): Json<FioFilter>,
) -> Json<TrackInfoResponse> {
    info!("POST /track-info/search/by-fio");
    let store = db.read().await;
    track_response(Ok(store
        .track_info
        .iter()
        .filter(|t| input.matches_user(&t.user))
        .cloned()
        .collect()))
}

async fn track_search_by_passport(
    State(db): State<Db>,
    Json(input): Json<PassportRequest>,
) -> Json<TrackInfoResponse> {
    info!("POST /track-info/search/by-passport");
    let store = db.read().await;
    track_response(check_passport(&input.passport).map(|()| {
        store
            .track_info
            .iter()
            .filter(|t| t.user.passport.as_ref() == Some(&input.passport))
            .cloned()
            .collect()
    }))
}

async fn track_search_by_date(
    State(db): State<Db>,
    Json(input): Json<DateRequest>,
) -> Json<TrackInfoResponse> {
    info!(date = %input.date, "POST /track-info/search/by-date");
    let store = db.read().await;
    track_response(check_date(&input.date).map(|()| {
        store
            .track_info
            .iter()
            .filter(|t| t.route_date == input.date)
            .cloned()
            .collect()
    }))
}

async fn track_search_by_mask(
    State(db): State<Db>,
    Json(input): Json<MaskRequest>,
) -> Json<TrackInfoResponse> {
    info!(mask = %input.gos_num, "POST /track-info/search/by-gos-num-mask");
    let store = db.read().await;
    track_response(check_mask(&input.gos_num).map(|()| {
        store
            .track_info
            .iter()
            .filter(|t| matches_mask(&input.gos_num, &t.car.gos_num))
            .cloned()
            .collect()
    }))
}

async fn route(State(db): State<Db>, Json(input): Json<RouteRequest>) -> Json<RouteResponse> {
    info!(gos_num = %input.gos_num, date = %input.date, "POST /car/route");
    if !GOS_NUM.is_match(&input.gos_num) {
        return Json(RouteResponse {
            status: Status::error(INVALID_GOS_NUM, "Invalid gos number"),
            route: None,
        });
    }
    if !DATE.is_match(&input.date) {
        return Json(RouteResponse {
            status: Status::error(INVALID_DATE, "Invalid date"),
            route: None,
        });
    }
    let store = db.read().await;
    let route = store
        .routes
        .iter()
        .find(|r| {
            r.gos_num == input.gos_num && r.user_login == input.user_login && r.date == input.date
        })
        .map(|r| r.points.clone());
    Json(RouteResponse {
        status: Status::ok(),
        route,
    })
}

/// Not-found results carry their body with a 404, as the real backend does.
async fn avg_speed(State(db): State<Db>, Json(input): Json<AvgSpeedRequest>) -> Response {
    info!(gos_num = %input.gos_num, "POST /camera/avg-speed");
    if !GOS_NUM.is_match(&input.gos_num) {
        return Json(AvgSpeedResponse {
            status: Status::error(INVALID_GOS_NUM, "Invalid gos number"),
            avg_speed: None,
        })
        .into_response();
    }
    let store = db.read().await;
    if !store.cameras.contains(&input.location) {
        let body = AvgSpeedResponse {
            status: Status::error(CAMERA_NOT_FOUND, "camera not found"),
            avg_speed: None,
        };
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    let reading = store
        .speeds
        .iter()
        .find(|s| s.gos_num == input.gos_num && s.camera == input.location);
    match reading {
        Some(reading) => Json(AvgSpeedResponse {
            status: Status::ok(),
            avg_speed: Some(reading.avg_speed),
        })
        .into_response(),
        None => {
            let body = AvgSpeedResponse {
                status: Status::error(AVG_SPEED_NOT_FOUND, "average speed not found"),
                avg_speed: None,
            };
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    }
}
