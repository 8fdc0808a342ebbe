//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use movies_core::{HttpMethod, HttpRequest, HttpResponse, Movie, MovieClientError, MovieUpdate, MoviesClient};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8081";

fn client() -> MoviesClient {
    MoviesClient::new(BASE_URL)
}

fn load(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Compare a parse outcome with `expected_result` or `expected_error`.
fn check_outcome<T>(name: &str, case: &Value, result: Result<T, MovieClientError>)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    match case.get("expected_error") {
        Some(Value::String(kind)) => {
            let err = result.unwrap_err();
            match kind.as_str() {
                "Decode" => assert!(matches!(err, MovieClientError::Decode(_)), "{name}: expected Decode"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        }
        Some(expected) => {
            let err = result.unwrap_err();
            assert_eq!(
                err.status(),
                expected["status"].as_u64().map(|s| s as u16),
                "{name}: status"
            );
            assert_eq!(err.status_text(), expected["status_text"].as_str(), "{name}: status text");
        }
        None => {
            let value = result.unwrap();
            let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(value, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/list.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_retrieve_all_movies().unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_retrieve_all_movies(simulated_response(case));
        check_outcome::<Vec<Movie>>(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/get.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        let req = c.build_retrieve_movie_by_id(id).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_retrieve_movie_by_id(simulated_response(case));
        check_outcome::<Movie>(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Find by name / year
// ---------------------------------------------------------------------------

#[test]
fn find_by_name_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/find.json"));

    let c = client();
    for case in vectors["by_name"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let movie_name = case["input_name"].as_str().unwrap();

        let req = c.build_retrieve_movies_by_name(movie_name).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_retrieve_movies_by_name(simulated_response(case));
        check_outcome::<Vec<Movie>>(name, case, result);
    }
}

#[test]
fn find_by_year_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/find.json"));

    let c = client();
    for case in vectors["by_year"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let year = case["input_year"].as_i64().unwrap() as i32;

        let req = c.build_retrieve_movies_by_year(year).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_retrieve_movies_by_year(simulated_response(case));
        check_outcome::<Vec<Movie>>(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/create.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: Movie = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_add_movie(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_add_movie(simulated_response(case));
        check_outcome::<Movie>(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/update.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();
        let input: MovieUpdate = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_movie(id, &input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_movie(simulated_response(case));
        check_outcome::<Movie>(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/delete.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        let req = c.build_delete_movie_by_id(id).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_movie_by_id(simulated_response(case));
        check_outcome::<String>(name, case, result);
    }
}
