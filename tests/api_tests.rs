use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use users_api::{
    app::{build_router, users::IdStrategy, users::User, AppState},
    core::MessageResponse,
    Config,
};

fn create_test_server(config: Config) -> TestServer {
    let state = AppState::from_config(&config);
    TestServer::new(build_router(state, &config)).unwrap()
}

fn default_server() -> TestServer {
    create_test_server(Config::default())
}

fn new_user() -> Value {
    json!({
        "firstName": "X",
        "lastName": "Y",
        "email": "x.y@example.com",
        "age": 33,
        "city": "Lisbon"
    })
}

#[tokio::test]
async fn test_root_greeting() {
    let server = default_server();

    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "Hello World!");
}

#[tokio::test]
async fn test_info() {
    let mut config = Config::default();
    config.app.environment = "staging".to_string();
    let server = create_test_server(config);

    let response = server.get("/info").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["name"], "users-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["environment"], "staging");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_info_name_and_version_from_env() {
    let mut config = Config::default();
    config
        .apply_env(vec![
            (
                "APP_NAME".to_string(),
                "NestJS AWS ECS Application".to_string(),
            ),
            ("APP_VERSION".to_string(), "1.0.0".to_string()),
        ])
        .unwrap();
    let server = create_test_server(config);

    let body: Value = server.get("/info").await.json();
    assert_eq!(body["name"], "NestJS AWS ECS Application");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_health_without_environment() {
    let server = default_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
    assert!(body.get("environment").is_none());
}

#[tokio::test]
async fn test_health_with_masked_environment() {
    let mut config = Config::default();
    config
        .apply_env(vec![
            ("HEALTH_EXPOSE_ENV".to_string(), "true".to_string()),
            ("NODE_ENV".to_string(), "production".to_string()),
            (
                "MONGODB_URI".to_string(),
                "mongodb://db.internal:27017".to_string(),
            ),
            ("JWT_SECRET".to_string(), "short".to_string()),
        ])
        .unwrap();
    let server = create_test_server(config);

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(
        body["environment"],
        json!({
            "NODE_ENV": "production",
            "MONGODB_URI": "mong***7017",
            "JWT_SECRET": "***"
        })
    );
}

#[tokio::test]
async fn test_list_seeded_users() {
    let server = default_server();

    let response = server.get("/users").await;
    response.assert_status_ok();

    let users: Vec<User> = response.json();
    let ids: Vec<u64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let raw: Value = server.get("/users").await.json();
    assert_eq!(raw[0]["firstName"], "John");
    assert_eq!(raw[0]["createdAt"], "2024-01-15T00:00:00.000Z");
}

#[tokio::test]
async fn test_list_without_seed_is_empty() {
    let mut config = Config::default();
    config.users.seed = false;
    let server = create_test_server(config);

    let users: Vec<User> = server.get("/users").await.json();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_get_user() {
    let server = default_server();

    let response = server.get("/users/2").await;
    response.assert_status_ok();

    let user: User = response.json();
    assert_eq!(user.id, 2);
    assert_eq!(user.first_name, "Jane");
    assert_eq!(user.city, "San Francisco");
}

#[tokio::test]
async fn test_get_unknown_user_is_404() {
    let server = default_server();

    for path in ["/users/42", "/users/abc", "/users/-1"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["message"], "User not found");
        assert_eq!(body["code"], 404);
    }
}

#[tokio::test]
async fn test_create_and_get_user() {
    let server = default_server();

    let response = server.post("/users").json(&new_user()).await;
    response.assert_status(StatusCode::CREATED);

    let created: User = response.json();
    assert_eq!(created.id, 6);
    assert_eq!(created.first_name, "X");
    assert_eq!(created.last_name, "Y");
    assert_eq!(created.email, "x.y@example.com");
    assert_eq!(created.age, 33);
    assert_eq!(created.city, "Lisbon");

    let fetched: User = server.get("/users/6").await.json();
    assert_eq!(fetched, created);

    let users: Vec<User> = server.get("/users").await.json();
    assert_eq!(users.len(), 6);
    assert_eq!(users.last(), Some(&created));
}

#[tokio::test]
async fn test_create_accepts_unvalidated_values() {
    let server = default_server();

    let mut body = new_user();
    body["email"] = json!("not-an-email");
    body["firstName"] = json!("");

    let response = server.post("/users").json(&body).await;
    response.assert_status(StatusCode::CREATED);

    let created: User = response.json();
    assert_eq!(created.email, "not-an-email");
    assert_eq!(created.first_name, "");
}

#[tokio::test]
async fn test_negative_age_is_accepted() {
    let server = default_server();

    let mut body = new_user();
    body["age"] = json!(-1);

    let response = server.post("/users").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    let created: User = response.json();
    assert_eq!(created.age, -1);

    let response = server.put("/users/1").json(&json!({ "age": -5 })).await;
    response.assert_status_ok();
    let updated: User = response.json();
    assert_eq!(updated.age, -5);
    assert_eq!(updated.first_name, "John");
}

#[tokio::test]
async fn test_create_with_missing_fields_is_rejected() {
    let server = default_server();

    let response = server.post("/users").json(&json!({ "firstName": "X" })).await;
    assert!(response.status_code().is_client_error());

    let users: Vec<User> = server.get("/users").await.json();
    assert_eq!(users.len(), 5);
}

#[tokio::test]
async fn test_update_only_changes_given_fields() {
    let server = default_server();

    let before: User = server.get("/users/3").await.json();

    let response = server
        .put("/users/3")
        .json(&json!({ "age": 99, "id": 77, "createdAt": "1999-01-01T00:00:00.000Z" }))
        .await;
    response.assert_status_ok();

    let after: User = response.json();
    assert_eq!(after, User { age: 99, ..before });

    let fetched: User = server.get("/users/3").await.json();
    assert_eq!(fetched, after);
}

#[tokio::test]
async fn test_update_unknown_user_is_404() {
    let server = default_server();

    let response = server.put("/users/42").json(&json!({ "age": 1 })).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_delete_user() {
    let server = default_server();

    let response = server.delete("/users/3").await;
    response.assert_status_ok();
    let body: MessageResponse = response.json();
    assert_eq!(body, MessageResponse::new("User deleted successfully"));

    server
        .get("/users/3")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete("/users/3")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let users: Vec<User> = server.get("/users").await.json();
    assert_eq!(users.len(), 4);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let server = default_server();

    server.delete("/users/3").await.assert_status_ok();
    let created: User = server.post("/users").json(&new_user()).await.json();
    assert_eq!(created.id, 6);
}

#[tokio::test]
async fn test_count_based_ids_match_legacy_behaviour() {
    let mut config = Config::default();
    config.users.id_strategy = IdStrategy::CountBased;
    let server = create_test_server(config);

    server.delete("/users/3").await.assert_status_ok();
    let created: User = server.post("/users").json(&new_user()).await.json();
    assert_eq!(created.id, 5);

    // 第一个 id 为 5 的仍是原有用户
    let fetched: User = server.get("/users/5").await.json();
    assert_eq!(fetched.first_name, "David");
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let mut config = Config::default();
    config.cors.origins = vec!["https://app.example".to_string()];
    config.cors.credentials = true;
    let server = create_test_server(config);

    let response = server
        .get("/users")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://app.example"),
        )
        .await;
    response.assert_status_ok();

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "https://app.example"
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );

    let other = server
        .get("/users")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://evil.example"),
        )
        .await;
    assert!(other.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_cors_wildcard_by_default() {
    let server = default_server();

    let response = server
        .get("/")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://anywhere.example"),
        )
        .await;

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
