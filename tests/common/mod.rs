#![allow(dead_code)]

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use storefront::config::Config;

pub const JWT_SECRET: &str = "test-jwt-secret-that-is-long-enough";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/register"))
            .json(&json!({ "email": email, "password": password, "full_name": full_name }))
            .send()
            .await
            .expect("register request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Password-grant login; `username` carries the email.
    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/token"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Register a user and return a bearer token for them.
    pub async fn signup(&self, email: &str, password: &str) -> String {
        let (body, status) = self.register(email, password, "Test User").await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        let (body, status) = self.login(email, password).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_category(&self, token: &str, name: &str, parent_id: Option<&str>) -> Value {
        let (body, status) = self
            .post_auth("/categories/", token, &json!({ "name": name, "parent_id": parent_id }))
            .await;
        assert_eq!(status, StatusCode::OK, "create category failed: {body}");
        body
    }

    pub async fn create_product(&self, token: &str, category_id: &str, name: &str, price: &str) -> Value {
        let (body, status) = self
            .post_auth(
                "/products/",
                token,
                &json!({
                    "name": name,
                    "description": "test product",
                    "price": price,
                    "stock": 5,
                    "category_id": category_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create product failed: {body}");
        body
    }

    /// Category plus one product in it; returns the product id.
    pub async fn seed_product(&self, token: &str, price: &str) -> String {
        let category = self.create_category(token, "General", None).await;
        let product = self
            .create_product(token, category["id"].as_str().unwrap(), "Widget", price)
            .await;
        product["id"].as_str().unwrap().to_string()
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated POST request with JSON body.
    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

// ── Direct storage access for arranging and inspecting state ────

impl TestApp {
    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("count query failed")
    }

    pub async fn set_user_active(&self, user_id: Uuid, is_active: bool) {
        sqlx::query("UPDATE users SET is_active = $2, updated_at = now() WHERE id = $1")
            .bind(user_id)
            .bind(is_active)
            .execute(&self.pool)
            .await
            .expect("update user failed");
    }

    pub async fn delete_user(&self, user_id: Uuid) {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .expect("delete user failed");
    }

    pub async fn set_product_price(&self, product_id: Uuid, price: &str) {
        sqlx::query("UPDATE products SET price = $2::numeric WHERE id = $1")
            .bind(product_id)
            .bind(price)
            .execute(&self.pool)
            .await
            .expect("update product failed");
    }

    pub async fn assign_role(&self, user_id: Uuid, role_id: Uuid) {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(role_id)
            .execute(&self.pool)
            .await
            .expect("assign role failed");
    }
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Spawn a test app with a fresh temporary database.
/// Returns `None` when `DATABASE_URL` is not set, so callers can skip.
pub async fn spawn_app() -> Option<TestApp> {
    let _ = dotenvy::dotenv();

    let Ok(base_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return None;
    };

    // Create a unique test database
    let db_name = format!("storefront_test_{}", Uuid::new_v4().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    // Connect to test DB and run migrations
    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        jwt_secret: JWT_SECRET.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        token_ttl_minutes: 30,
        max_body_size: 1_048_576,
        db_max_connections: 5,
        log_level: "warn".to_string(),
    };

    let (app, _state) = storefront::build_app(pool.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    Some(TestApp {
        addr,
        pool,
        client: Client::new(),
        db_name,
    })
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
