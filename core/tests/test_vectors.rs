//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected classification. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use autotracker_core::{
    domain_status_to_message, transport_status_to_message, AuthRequest, HttpMethod, HttpRequest,
    HttpResponse, Role, RouteRequest, SearchKind, SearchQuery, SearchResults, TrackerClient,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> TrackerClient {
    TrackerClient::new(BASE_URL)
}

fn load(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap()
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Compare method, URL, headers (when listed) and JSON body.
fn check_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    if let Some(method) = expected["method"].as_str() {
        assert_eq!(req.method.as_str(), method, "{name}: method");
    } else {
        assert_eq!(req.method, HttpMethod::Post, "{name}: method");
    }
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );
    if let Some(headers) = expected["headers"].as_array() {
        let expected_headers: Vec<(String, String)> = headers
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (
                    arr[0].as_str().unwrap().to_string(),
                    arr[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, expected["body"], "{name}: body");
}

fn expected_error(expected: &serde_json::Value) -> Option<(String, String)> {
    expected["error"].as_array().map(|pair| {
        (
            pair[0].as_str().unwrap().to_string(),
            pair[1].as_str().unwrap().to_string(),
        )
    })
}

fn owned(pair: Option<(&str, &str)>) -> Option<(String, String)> {
    pair.map(|(m, f)| (m.to_string(), f.to_string()))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[test]
fn auth_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/auth.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: AuthRequest = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_auth(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let parsed = c.parse_auth(simulated(case));
        let expected = &case["expected"];
        assert_eq!(
            u64::from(parsed.http_status),
            expected["http_status"].as_u64().unwrap(),
            "{name}: http status"
        );
        assert_eq!(
            parsed.payload.is_some(),
            expected["has_payload"].as_bool().unwrap(),
            "{name}: payload"
        );
        assert_eq!(
            parsed.domain_code(),
            expected["domain_code"].as_i64(),
            "{name}: domain code"
        );
        assert_eq!(
            owned(parsed.outcome().error_message()),
            expected_error(expected),
            "{name}: error"
        );
    }
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

#[test]
fn route_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/route.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: RouteRequest = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_route(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let parsed = c.parse_route(simulated(case));
        let expected = &case["expected"];
        assert_eq!(
            parsed.domain_code(),
            expected["domain_code"].as_i64(),
            "{name}: domain code"
        );
        let latitudes: Vec<f64> = parsed
            .payload
            .as_ref()
            .unwrap()
            .route()
            .points
            .iter()
            .map(|p| p.coordinate.latitude)
            .collect();
        let expected_latitudes: Vec<f64> = expected["latitudes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        assert_eq!(latitudes, expected_latitudes, "{name}: point order");
        assert_eq!(
            owned(parsed.outcome().error_message()),
            expected_error(expected),
            "{name}: error"
        );
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn parse_role(s: &str) -> Role {
    serde_json::from_value(serde_json::Value::String(s.to_string())).unwrap()
}

fn parse_kind(s: &str) -> SearchKind {
    match s {
        "filters" => SearchKind::Filters,
        "fio" => SearchKind::Fio,
        "passport" => SearchKind::Passport,
        "date" => SearchKind::Date,
        "plate_mask" => SearchKind::PlateMask,
        other => panic!("unknown search kind: {other}"),
    }
}

#[test]
fn search_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/search.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let role = parse_role(case["role"].as_str().unwrap());
        let kind = parse_kind(case["kind"].as_str().unwrap());
        let query = SearchQuery::from_json(kind, &case["query"].to_string()).unwrap();
        let target = role.search_target().unwrap();

        let req = c.build_search(target, &query).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let parsed = c.parse_search(target, simulated(case));
        let expected = &case["expected"];
        let payload = parsed.payload.unwrap();
        assert_eq!(
            Some(payload.status.code),
            expected["domain_code"].as_i64(),
            "{name}: domain code"
        );
        let target_name = match &payload.results {
            SearchResults::Cars(_) => "cars",
            SearchResults::TrackRecords(_) => "track_records",
        };
        assert_eq!(target_name, expected["target"].as_str().unwrap(), "{name}: target");
        assert_eq!(
            payload.results.len() as u64,
            expected["count"].as_u64().unwrap(),
            "{name}: count"
        );
    }
}

// ---------------------------------------------------------------------------
// Status taxonomy
// ---------------------------------------------------------------------------

#[test]
fn status_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/status.json"));

    for entry in vectors["domain"].as_array().unwrap() {
        let code = entry["code"].as_i64().unwrap();
        assert_eq!(
            domain_status_to_message(code),
            (
                entry["message"].as_str().unwrap(),
                entry["field"].as_str().unwrap()
            ),
            "domain code {code}"
        );
    }
    for entry in vectors["transport"].as_array().unwrap() {
        let status = entry["status"].as_u64().unwrap() as u16;
        assert_eq!(
            transport_status_to_message(status),
            entry["message"].as_str().unwrap(),
            "transport status {status}"
        );
    }
}
