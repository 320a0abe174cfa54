mod common;

use common::*;
use sea_orm::{ConnectionTrait, Statement};

#[tokio::test]
async fn test_register_login_and_profile() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "email": "alice@example.com",
            "password": "secure_password_1",
            "name": "Alice"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "alice@example.com");
    assert_eq!(body["data"]["user"]["role"], "CUSTOMER");
    assert!(body["data"]["user"]["password_hash"].is_null());
    assert!(body["data"]["token"].as_str().is_some());

    // Login with the same credentials
    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({
            "email": "alice@example.com",
            "password": "secure_password_1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert!(body["data"]["user"]["last_login_at"].as_str().is_some());

    // Fetch own profile with the token
    let resp = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["name"], "Alice");
}

#[tokio::test]
async fn test_register_duplicate_email_conflict() {
    let app = spawn_app().await;

    let payload = serde_json::json!({
        "email": "dup@example.com",
        "password": "secure_password_1"
    });

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "email": "short@example.com",
            "password": "short"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "email": "wrongpw@example.com",
            "password": "secure_password_1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({
            "email": "wrongpw@example.com",
            "password": "not_the_password"
        }))
        .send()
        .await
        .unwrap();
    // Unknown email and bad password are indistinguishable to the caller
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({
            "email": "nobody@example.com",
            "password": "whatever_password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_deactivated_account_rejected() {
    let app = spawn_app().await;
    let (user_id, token) = create_test_user(&app, "inactive").await;

    app.db
        .execute(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "UPDATE users SET is_active = FALSE WHERE id = $1",
            vec![user_id.into()],
        ))
        .await
        .unwrap();

    // Existing token is rejected by the auth middleware
    let resp = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = spawn_app().await;

    let resp = app.client.get(app.url("/auth/me")).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let resp = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}
