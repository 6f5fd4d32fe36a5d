//! Router-level tests against the in-memory repository

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::domain::entity::{password_reset_token::NewPasswordResetToken, user::UserChanges};
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    reset_token::ResetToken,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::infra::memory::InMemoryAuthRepository;
use crate::presentation::router::{auth_router_generic, users_router_generic};

fn test_config() -> AuthConfig {
    AuthConfig {
        bcrypt_cost: 4,
        ..AuthConfig::development()
    }
}

fn app(repo: &InMemoryAuthRepository) -> Router {
    app_with(repo, test_config())
}

fn app_with(repo: &InMemoryAuthRepository, config: AuthConfig) -> Router {
    Router::new()
        .nest("/auth", auth_router_generic(repo.clone(), config.clone()))
        .nest("/users", users_router_generic(repo.clone(), config))
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn registration(email: &str) -> Value {
    json!({
        "email": email,
        "password": "password123",
        "confirmPassword": "password123",
        "firstName": "Ada",
        "lastName": "Lovelace"
    })
}

async fn register(app: &Router, email: &str) -> (Value, String) {
    let (status, body) = send(
        app,
        request(Method::POST, "/auth/register", None, Some(registration(email))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let token = body["token"].as_str().unwrap().to_string();
    (body["user"].clone(), token)
}

async fn register_admin(app: &Router, repo: &InMemoryAuthRepository, email: &str) -> String {
    let (_, token) = register(app, email).await;
    let user = repo
        .find_by_email(&Email::new(email).unwrap())
        .await
        .unwrap()
        .unwrap();
    let changes = UserChanges {
        role: Some(UserRole::Admin),
        ..UserChanges::default()
    };
    repo.update(user.id, &changes).await.unwrap();
    token
}

async fn forgot(app: &Router, email: &str) -> Value {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/auth/forgot-password",
            None,
            Some(json!({ "email": email })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn reset(token: &str, password: &str) -> Request<Body> {
    request(
        Method::POST,
        "/auth/reset-password",
        None,
        Some(json!({ "token": token, "password": password })),
    )
}

fn login(email: &str, password: &str) -> Request<Body> {
    request(
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
}

// ============================================================================
// Register / Login / Me
// ============================================================================

#[tokio::test]
async fn test_register_then_me_resolves_same_user() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);

    let (user, token) = register(&app, "  Ada@Example.COM ").await;
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["role"], "user");
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());

    let (status, me) = send(&app, request(Method::GET, "/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["uuid"], user["uuid"]);
    assert_eq!(me["firstName"], "Ada");
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/auth/register",
            None,
            Some(registration("ADA@example.com")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already in use");
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);

    let mut payload = registration("ada@example.com");
    payload["confirmPassword"] = json!("different123");
    let (status, body) = send(
        &app,
        request(Method::POST, "/auth/register", None, Some(payload)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "confirmPassword");
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": "nope", "password": "short" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
    assert!(fields.contains(&"firstName"));
    assert!(fields.contains(&"lastName"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, "ada@example.com").await;

    let wrong_password = send(&app, login("ada@example.com", "wrongpass1")).await;
    let unknown_email = send(&app, login("nobody@example.com", "password123")).await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_extended_profile_required_when_enabled() {
    let repo = InMemoryAuthRepository::new();
    let app = app_with(
        &repo,
        AuthConfig {
            require_extended_profile: true,
            ..test_config()
        },
    );

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/auth/register",
            None,
            Some(registration("ada@example.com")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["userName", "gender", "dob", "phone"]);
    assert!(repo.list().await.unwrap().is_empty());

    let mut complete = registration("ada@example.com");
    complete["userName"] = json!("ada");
    complete["gender"] = json!("female");
    complete["dob"] = json!("1990-01-02");
    complete["phone"] = json!("555-0100");
    let (status, body) = send(
        &app,
        request(Method::POST, "/auth/register", None, Some(complete)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_rejects_password_extended_past_bcrypt_limit() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    let password = "a".repeat(72);

    let mut payload = registration("ada@example.com");
    payload["password"] = json!(password);
    payload["confirmPassword"] = json!(password);
    let (status, body) = send(
        &app,
        request(Method::POST, "/auth/register", None, Some(payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = send(
        &app,
        login("ada@example.com", &format!("{password}WRONG-SUFFIX")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");

    let (status, _) = send(&app, login("ada@example.com", &password)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_returns_working_token() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, "ada@example.com").await;

    let (status, body) = send(&app, login("ADA@example.com", "password123")).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let (status, _) = send(&app, request(Method::GET, "/auth/me", Some(token), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);

    let (status, body) = send(&app, request(Method::GET, "/auth/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");

    let (status, _) = send(
        &app,
        request(Method::GET, "/auth/me", Some("not.a.jwt"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    let (_, token) = register(&app, "ada@example.com").await;

    let user = repo
        .find_by_email(&Email::new("ada@example.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(repo.delete(user.id).await.unwrap());

    let (status, _) = send(&app, request(Method::GET, "/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

// ============================================================================
// Forgot / Reset Password
// ============================================================================

#[tokio::test]
async fn test_forgot_password_unknown_email_issues_nothing() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);

    let body = forgot(&app, "nobody@example.com").await;
    assert_eq!(
        body["message"],
        crate::application::forgot_password::UNKNOWN_EMAIL_MESSAGE
    );
    assert!(body.get("token").is_none());
    assert!(repo.reset_tokens().unwrap().is_empty());
}

#[tokio::test]
async fn test_reset_password_flow() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, "ada@example.com").await;

    let body = forgot(&app, "ada@example.com").await;
    let token = body["token"].as_str().unwrap().to_string();
    assert!(body["expiresAt"].is_string());

    let (status, body) = send(&app, reset(&token, "newpassword1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        crate::application::reset_password::PASSWORD_UPDATED_MESSAGE
    );

    let (status, _) = send(&app, login("ada@example.com", "password123")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, login("ada@example.com", "newpassword1")).await;
    assert_eq!(status, StatusCode::OK);

    // Spent
    let (status, body) = send(&app, reset(&token, "anotherpass1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_reset_token_is_rejected() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, "ada@example.com").await;

    let body = forgot(&app, "ada@example.com").await;
    let token = body["token"].as_str().unwrap().to_string();
    let parsed = ResetToken::parse(&token).unwrap();
    assert!(
        repo.set_reset_token_expiry(&parsed, chrono::Utc::now() - chrono::Duration::seconds(1))
            .unwrap()
    );

    let (status, body) = send(&app, reset(&token, "newpassword1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or expired token");

    let (status, _) = send(&app, login("ada@example.com", "password123")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_short_new_password_does_not_spend_token() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, "ada@example.com").await;

    let token = forgot(&app, "ada@example.com").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _) = send(&app, reset(&token, "short")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, reset(&token, "longenough1")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_concurrent_resets_consume_token_once() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    register(&app, "ada@example.com").await;

    let token = forgot(&app, "ada@example.com").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (first, second) = tokio::join!(
        send(&app, reset(&token, "firstpass1")),
        send(&app, reset(&token, "secondpass1")),
    );
    let successes = [first.0, second.0]
        .iter()
        .filter(|s| **s == StatusCode::OK)
        .count();
    assert_eq!(successes, 1);

    let used: Vec<_> = repo.reset_tokens().unwrap();
    assert_eq!(used.len(), 1);
    assert!(used[0].used);
}

#[tokio::test]
async fn test_reset_for_missing_owner_leaves_token_unspent() {
    let repo = InMemoryAuthRepository::new();
    let issued = NewPasswordResetToken::issue(
        UserId::new(404),
        chrono::Utc::now(),
        chrono::Duration::minutes(15),
    );
    repo.create_reset_token(&issued).await.unwrap();

    let raw = RawPassword::new("newpassword1".to_string()).unwrap();
    let password = UserPassword::hash(raw, 4).await.unwrap();
    let result = repo.reset_password(&issued.token, &password).await;
    assert!(matches!(result, Err(crate::error::AuthError::UserNotFound)));

    let stored = repo.reset_tokens().unwrap();
    assert_eq!(stored.len(), 1);
    assert!(!stored[0].used);
}

// ============================================================================
// User administration
// ============================================================================

#[tokio::test]
async fn test_users_routes_require_admin() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    let (_, token) = register(&app, "ada@example.com").await;

    let (status, body) = send(&app, request(Method::GET, "/users", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden");

    let (status, _) = send(&app, request(Method::GET, "/users", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_lists_and_creates_users() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    let admin = register_admin(&app, &repo, "root@example.com").await;

    let (status, created) = send(
        &app,
        request(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({
                "email": "grace@example.com",
                "password": "password123",
                "firstName": "Grace",
                "lastName": "Hopper",
                "role": "admin"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["role"], "admin");

    let (status, list) = send(&app, request(Method::GET, "/users", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, _) = send(&app, login("grace@example.com", "password123")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_create_rejects_unknown_role() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    let admin = register_admin(&app, &repo, "root@example.com").await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({
                "email": "x@example.com",
                "password": "password123",
                "firstName": "X",
                "lastName": "Y",
                "role": "superuser"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "role");
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    let admin = register_admin(&app, &repo, "root@example.com").await;
    let (user, _) = register(&app, "ada@example.com").await;
    let uri = format!("/users/{}", user["uuid"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        request(
            Method::PATCH,
            &uri,
            Some(&admin),
            Some(json!({ "firstName": "Augusta" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["firstName"], "Augusta");
    assert_eq!(updated["lastName"], "Lovelace");
    assert_eq!(updated["email"], "ada@example.com");
    assert_eq!(updated["role"], "user");

    // Password untouched
    let (status, _) = send(&app, login("ada@example.com", "password123")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_email_conflict() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    let admin = register_admin(&app, &repo, "root@example.com").await;
    let (user, _) = register(&app, "ada@example.com").await;
    let uri = format!("/users/{}", user["uuid"].as_str().unwrap());

    let (status, body) = send(
        &app,
        request(
            Method::PATCH,
            &uri,
            Some(&admin),
            Some(json!({ "email": "root@example.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already in use");
}

#[tokio::test]
async fn test_get_and_delete_user() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    let admin = register_admin(&app, &repo, "root@example.com").await;
    let (user, _) = register(&app, "ada@example.com").await;
    let uri = format!("/users/{}", user["uuid"].as_str().unwrap());

    let (status, fetched) = send(&app, request(Method::GET, &uri, Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "ada@example.com");

    let (status, body) = send(&app, request(Method::DELETE, &uri, Some(&admin), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, request(Method::DELETE, &uri, Some(&admin), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_malformed_uuid_is_bad_request() {
    let repo = InMemoryAuthRepository::new();
    let app = app(&repo);
    let admin = register_admin(&app, &repo, "root@example.com").await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/users/not-a-uuid", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["message"], "Valid uuid required");
}
