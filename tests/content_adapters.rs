//! Exercise and nutrition adapters against a local HTTP responder.

mod common;

use common::OneShotServer;
use heart_companion::adapters::edamam::EdamamClient;
use heart_companion::adapters::exercisedb::ExerciseDbClient;
use heart_companion::adapters::FetchError;
use heart_companion::application::{Analysis, ContentService};
use heart_companion::domain::{ExerciseFetch, NutritionFetch, RecipeRequest};
use heart_companion::ports::{ExerciseCatalog, NutritionAnalyzer};
use pretty_assertions::assert_eq;
use std::time::Duration;
use zeroize::Zeroizing;

fn exercise_client(url: &str) -> ExerciseDbClient {
    ExerciseDbClient::new(
        url,
        "exercisedb.p.rapidapi.com",
        Zeroizing::new("test-rapid-key".to_string()),
        Some(Duration::from_secs(5)),
    )
    .expect("Should build client")
}

fn nutrition_client(url: &str) -> EdamamClient {
    EdamamClient::new(
        url,
        Zeroizing::new("955037bf".to_string()),
        Zeroizing::new("test-app-key".to_string()),
        Some(Duration::from_secs(5)),
    )
    .expect("Should build client")
}

#[test]
fn test_exercise_request_sends_credential_headers() {
    let body = r#"[{"name":"push up","bodyPart":"chest","equipment":"body weight","target":"pectorals","instructions":["Lower.","Push."],"gifUrl":"https://example.test/p.gif"}]"#;
    let server = OneShotServer::start("/exercises", 200, body);

    let outcome = exercise_client(&server.url)
        .fetch_exercises()
        .expect("Should fetch");
    let request = server.finish();

    assert_eq!(request.request_line, "GET /exercises HTTP/1.1");
    assert_eq!(
        request.header("x-rapidapi-host"),
        Some("exercisedb.p.rapidapi.com")
    );
    assert_eq!(request.header("x-rapidapi-key"), Some("test-rapid-key"));

    let ExerciseFetch::Exercises(list) = outcome else {
        panic!("expected exercises");
    };
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "push up");
    assert_eq!(list[0].instructions, vec!["Lower.", "Push."]);
}

#[test]
fn test_exercise_404_renders_status() {
    let server = OneShotServer::start("/exercises", 404, r#"{"message":"not found"}"#);

    let outcome = exercise_client(&server.url)
        .fetch_exercises()
        .expect("A non-200 status is not an error");
    server.finish();

    assert_eq!(outcome, ExerciseFetch::Failed { status: 404 });
    assert_eq!(
        outcome.message().as_deref(),
        Some("Failed to fetch data. Status Code: 404")
    );
}

#[test]
fn test_exercise_empty_list() {
    let server = OneShotServer::start("/exercises", 200, "[]");
    let outcome = exercise_client(&server.url)
        .fetch_exercises()
        .expect("Should fetch");
    server.finish();

    assert_eq!(
        outcome.message().as_deref(),
        Some("No exercises found in the response.")
    );
}

#[test]
fn test_nutrition_request_shape() {
    let body = r#"{"totalNutrients":{"ENERC_KCAL":{"label":"Energy","quantity":412.5,"unit":"kcal"},"FAT":{"label":"Fat","quantity":10.123,"unit":"g"}}}"#;
    let server = OneShotServer::start("/api/nutrition-details", 200, body);

    let recipe = RecipeRequest::parse("Fried Rice", "1 cup rice, 2 eggs");
    let outcome = nutrition_client(&server.url)
        .analyze(&recipe)
        .expect("Should analyze");
    let request = server.finish();

    assert!(request
        .request_line
        .starts_with("POST /api/nutrition-details?"));
    assert!(request.request_line.contains("app_id=955037bf"));
    assert!(request.request_line.contains("app_key=test-app-key"));
    assert_eq!(request.body, r#"{"ingr":["1 cup rice","2 eggs"]}"#);

    assert_eq!(
        outcome.lines(),
        vec![
            "Nutritional Information for Fried Rice",
            "Energy: 412.50 kcal",
            "Fat: 10.12 g",
        ]
    );
}

#[test]
fn test_nutrition_failure_keeps_raw_body() {
    let server = OneShotServer::start("/nutrition", 401, "bad credentials");

    let recipe = RecipeRequest::parse("Soup", "1 carrot");
    let outcome = nutrition_client(&server.url)
        .analyze(&recipe)
        .expect("A non-200 status is not an error");
    server.finish();

    assert_eq!(
        outcome,
        NutritionFetch::Failed {
            status: 401,
            body: "bad credentials".to_string()
        }
    );
    assert_eq!(
        outcome.lines(),
        vec![
            "Failed to fetch data. Status Code: 401",
            "Error: bad credentials",
        ]
    );
}

#[test]
fn test_nutrition_without_totals() {
    let server = OneShotServer::start("/nutrition", 200, r#"{"calories":0}"#);

    let service = ContentService::new(
        std::sync::Arc::new(exercise_client("http://127.0.0.1:9/unused")),
        std::sync::Arc::new(nutrition_client(&server.url)),
    );
    let outcome = service.analyze("Water", "1 glass water").expect("Should analyze");
    server.finish();

    assert_eq!(outcome, Analysis::Fetched(NutritionFetch::NoData));
    assert_eq!(outcome.lines(), vec!["No nutritional information available."]);
}

#[test]
fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind")
        .local_addr()
        .expect("addr")
        .port();

    let err = exercise_client(&format!("http://127.0.0.1:{port}/exercises"))
        .fetch_exercises()
        .expect_err("Nothing is listening");
    assert!(matches!(err, FetchError::Transport(_)));
}

#[test]
fn test_invalid_body_on_200_is_decode_error() {
    let server = OneShotServer::start("/exercises", 200, "<html>");
    let err = exercise_client(&server.url)
        .fetch_exercises()
        .expect_err("Body is not JSON");
    server.finish();

    assert!(matches!(err, FetchError::Decode(_)));
}
