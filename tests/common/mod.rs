#![allow(dead_code)]

use reqwest::Client;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Once,
};

static INIT: Once = Once::new();
static MIGRATIONS_RAN: AtomicBool = AtomicBool::new(false);
static USER_COUNTER: AtomicUsize = AtomicUsize::new(0);
static SLUG_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        std::env::set_var(
            "JWT_SECRET",
            "integration_test_secret_that_is_at_least_32_characters_long",
        );
        std::env::set_var("RATE_LIMIT_ENABLED", "false");
        let config = fitsystem::config::jwt::JwtConfig::from_env().unwrap();
        let _ = fitsystem::utils::jwt::init_jwt_config(config);
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.addr, path)
    }
}

pub async fn spawn_app() -> TestApp {
    init_env();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // Run migrations only once globally (using atomic bool for thread safety)
    if !MIGRATIONS_RAN.swap(true, Ordering::SeqCst) {
        fitsystem::migration::Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
    }

    // Clean data tables (reverse dependency order)
    cleanup_tables(&db).await;

    let app = axum::Router::new()
        .route("/", axum::routing::get(|| async { "ok" }))
        .merge(fitsystem::routes::create_routes())
        .layer(axum::extract::Extension(db.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client: Client::new(),
    }
}

async fn cleanup_tables(db: &DatabaseConnection) {
    let tables = ["blog_posts", "categories", "users"];

    for table in tables {
        let sql = format!("TRUNCATE TABLE {} CASCADE", table);
        let _ = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                sql,
            ))
            .await;
    }
}

/// Register a user and return (user_id, token).
pub async fn create_test_user(app: &TestApp, prefix: &str) -> (i32, String) {
    let counter = USER_COUNTER.fetch_add(1, Ordering::SeqCst);
    let email = format!("{}_{}@test.com", prefix, counter);

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "email": email,
            "password": "test_password_123",
            "name": format!("Test {}", prefix)
        }))
        .send()
        .await
        .expect("Failed to register user");

    let status = resp.status();
    let body: serde_json::Value = resp.json().await.unwrap_or_else(|e| {
        panic!(
            "Failed to parse register response for '{}': status={}, error={}",
            email, status, e
        );
    });

    if !body["success"].as_bool().unwrap_or(false) {
        panic!(
            "Failed to register user '{}': status={}, body={}",
            email, status, body
        );
    }

    let user_id = body["data"]["user"]["id"]
        .as_i64()
        .unwrap_or_else(|| panic!("Response missing user id for '{}': {:?}", email, body))
        as i32;
    let token = body["data"]["token"]
        .as_str()
        .unwrap_or_else(|| panic!("Response missing token for '{}': {:?}", email, body))
        .to_string();
    (user_id, token)
}

/// Promote a user to admin by directly updating the database.
pub async fn make_admin(db: &DatabaseConnection, user_id: i32) {
    set_role(db, user_id, "ADMIN").await;
}

/// Promote a user to editor by directly updating the database.
pub async fn make_editor(db: &DatabaseConnection, user_id: i32) {
    set_role(db, user_id, "EDITOR").await;
}

async fn set_role(db: &DatabaseConnection, user_id: i32, role: &str) {
    db.execute(Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Postgres,
        "UPDATE users SET role = $1 WHERE id = $2",
        vec![role.into(), user_id.into()],
    ))
    .await
    .expect("Failed to update user role");
}

/// Create a category and return (category_id, slug).
pub async fn create_test_category(app: &TestApp, admin_token: &str) -> (i32, String) {
    let counter = SLUG_COUNTER.fetch_add(1, Ordering::SeqCst);
    let slug = format!("test-category-{}", counter);

    let resp = app
        .client
        .post(app.url("/categories"))
        .bearer_auth(admin_token)
        .json(&serde_json::json!({
            "slug": slug,
            "name_ko": format!("카테고리 {}", counter),
            "name_en": format!("Category {}", counter),
            "name_ja": format!("カテゴリ {}", counter),
            "description_en": "A test category",
            "icon": "📚",
            "color": "#3B82F6",
            "sort_order": counter
        }))
        .send()
        .await
        .expect("Failed to create category");

    let status = resp.status();
    let body: serde_json::Value = resp.json().await.expect("Failed to parse response");

    if !body["success"].as_bool().unwrap_or(false) {
        panic!("Failed to create category: status={}, body={}", status, body);
    }

    let id = body["data"]["id"].as_i64().expect("Category missing id") as i32;
    (id, slug)
}

/// Create a blog post and return (post_id, slug).
pub async fn create_test_post(
    app: &TestApp,
    editor_token: &str,
    category_id: i32,
    published: bool,
) -> (i32, String) {
    let counter = SLUG_COUNTER.fetch_add(1, Ordering::SeqCst);
    let slug = format!("test-post-{}", counter);

    let resp = app
        .client
        .post(app.url("/blog-posts"))
        .bearer_auth(editor_token)
        .json(&serde_json::json!({
            "slug": slug,
            "title_ko": format!("포스트 {}", counter),
            "title_en": format!("Post {}", counter),
            "title_ja": format!("ポスト {}", counter),
            "excerpt_en": "A short excerpt",
            "content_ko": "# 내용",
            "content_en": "# Content",
            "content_ja": "# 内容",
            "difficulty": "BEGINNER",
            "reading_time": 5,
            "meta_keywords": ["rust", "testing"],
            "published": published,
            "category_id": category_id
        }))
        .send()
        .await
        .expect("Failed to create post");

    let status = resp.status();
    let body: serde_json::Value = resp.json().await.expect("Failed to parse response");

    if !body["success"].as_bool().unwrap_or(false) {
        panic!("Failed to create post: status={}, body={}", status, body);
    }

    let id = body["data"]["id"].as_i64().expect("Post missing id") as i32;
    (id, slug)
}
