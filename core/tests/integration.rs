//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `TrackerApi` with the
//! default reqwest transport over real HTTP. Validates that request building,
//! the two-tier status handling and the session flows work with the actual
//! server.

use autotracker_core::{
    ApiError, AvgSpeedRequest, ClientConfig, Coordinate, Document, FileSessionStore, FioQuery,
    MemorySessionStore, Outcome, RegisterRequest, Role, RouteRequest, SearchKind, SearchQuery,
    SearchResults, SearchTarget, SessionStore, TrackerApi,
};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn api(base_url: &str) -> TrackerApi {
    TrackerApi::from_config(&ClientConfig::new(base_url).unwrap()).unwrap()
}

fn session_file(dir: &std::path::Path) -> std::path::PathBuf {
    FileSessionStore::new(dir).path().to_path_buf()
}

#[tokio::test]
async fn operator_logs_in_and_searches_cars() {
    let base = start_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::new(&base)
        .unwrap()
        .with_session_dir(dir.path());
    let api = TrackerApi::from_config(&config).unwrap();
    let store = config.session_store();
    assert_eq!(api.client().base_url(), base);

    let user = match api
        .login(store.as_ref(), "ivanov@example.ru", "operator1")
        .await
        .unwrap()
    {
        Outcome::Success(user) => user,
        other => panic!("login failed: {other:?}"),
    };
    assert_eq!(user.role, Role::Operator);
    assert_eq!(store.load().unwrap(), Some(user.clone()));
    assert!(session_file(dir.path()).exists());

    let query = SearchQuery::Fio(FioQuery::from_form("иванов", "", ""));
    let response = api.search(user.role, &query).await.unwrap();
    assert_eq!(response.http_status, 200);
    match &response.payload.unwrap().results {
        SearchResults::Cars(cars) => {
            assert_eq!(cars.len(), 1);
            assert_eq!(cars[0].license_plate, "А123ВС77");
            assert_eq!(cars[0].owner_fio.lastname.as_deref(), Some("Иванович"));
        }
        other => panic!("operator got {other:?}"),
    }

    let err = api
        .search(user.role, &SearchQuery::Date("01.02.2024".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::UnsupportedSearch {
            target: SearchTarget::Cars,
            kind: SearchKind::Date
        }
    ));
}

#[tokio::test]
async fn wrong_password_is_rejected_without_session() {
    let base = start_server().await;
    let api = api(&base);
    let store = MemorySessionStore::new();

    let outcome = api
        .login(&store, "ivanov@example.ru", "not-the-password")
        .await
        .unwrap();
    assert_eq!(
        outcome.error_message(),
        Some(("Неверный логин или пароль", "login or pswd"))
    );
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn auditor_searches_track_records() {
    let base = start_server().await;
    let api = api(&base);

    let response = api
        .search(Role::Auditor, &SearchQuery::PlateMask("М456ОР*".to_string()))
        .await
        .unwrap();
    let payload = response.payload.unwrap();
    match payload.results {
        SearchResults::TrackRecords(records) => {
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].user.email, "petrov@example.ru");
            assert_eq!(records[0].route_date, "02.02.2024");
        }
        other => panic!("auditor got {other:?}"),
    }

    let response = api
        .search(Role::Auditor, &SearchQuery::Date("2024/02/02".to_string()))
        .await
        .unwrap();
    assert_eq!(response.domain_code(), Some(1001));
    assert_eq!(
        response.outcome().error_message(),
        Some(("Неверный формат даты", "date"))
    );
}

#[tokio::test]
async fn route_keeps_point_order_and_missing_route_is_empty() {
    let base = start_server().await;
    let api = api(&base);

    let request = RouteRequest {
        date: "01.02.2024".to_string(),
        license_plate: "А123ВС77".to_string(),
        user_login: "ivanov@example.ru".to_string(),
    };
    let response = api.route(&request).await.unwrap();
    let route = response.payload.unwrap().route();
    assert_eq!(route.len(), 3);
    assert_eq!(route.points[0].speed, Some(40));
    assert_eq!(route.points[2].speed, None);

    let response = api
        .route(&RouteRequest {
            date: "05.02.2024".to_string(),
            ..request
        })
        .await
        .unwrap();
    assert!(response.outcome().is_success());
    assert!(response.payload.unwrap().route().is_empty());
}

#[tokio::test]
async fn not_found_body_keeps_both_statuses() {
    let base = start_server().await;
    let api = api(&base);

    let response = api
        .avg_speed(&AvgSpeedRequest {
            license_plate: "М456ОР199".to_string(),
            location: Coordinate {
                latitude: 55.7558,
                longitude: 37.6173,
            },
        })
        .await
        .unwrap();
    assert_eq!(response.http_status, 404);
    assert_eq!(response.domain_code(), Some(4003));
    assert_eq!(
        response.outcome().error_message(),
        Some(("Средняя скорость не найдена", "speed"))
    );
}

#[tokio::test]
async fn register_then_confirm_passport() {
    let base = start_server().await;
    let api = api(&base);
    let store = MemorySessionStore::new();

    let request = RegisterRequest {
        first_name: "Ольга".to_string(),
        surname: "Орлова".to_string(),
        lastname: String::new(),
        email: "orlova@example.ru".to_string(),
        password: "password1".to_string(),
        repeated_password: "password1".to_string(),
    };
    let outcome = api.register_account(&store, &request).await.unwrap();
    assert_eq!(outcome, Outcome::Success(None));
    assert_eq!(store.load().unwrap(), None);

    let again = api.register_account(&store, &request).await.unwrap();
    assert_eq!(
        again.error_message(),
        Some(("Пользователь с данной почтой уже существует", "email"))
    );

    let mut user = match api.login(&store, "orlova@example.ru", "password1").await.unwrap() {
        Outcome::Success(user) => user,
        other => panic!("login failed: {other:?}"),
    };
    assert!(!user.is_verified);

    let outcome = api
        .confirm_passport_for(&store, &mut user, Document::new("4000", "111111"))
        .await
        .unwrap();
    assert!(outcome.is_success());
    let saved = store.load().unwrap().unwrap();
    assert!(saved.is_verified);
    assert_eq!(saved.passport, Some(Document::new("4000", "111111")));

    api.logout(&store).unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn unreachable_server_is_503() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = api(&format!("http://{addr}"));
    let store = MemorySessionStore::new();
    let outcome = api
        .login(&store, "ivanov@example.ru", "operator1")
        .await
        .unwrap();
    match outcome {
        Outcome::Unavailable(failure) => {
            assert_eq!(failure.http_status, 503);
            assert_eq!(failure.message, "Сервер не запущен");
        }
        other => panic!("expected unavailable, got {other:?}"),
    }
}
