#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;

use bhv3_api::config::AppConfig;
use bhv3_api::database::DatabaseManager;
use bhv3_api::{app, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    pub pool: PgPool,
}

/// Database to test against. Without `DATABASE_URL` the database-backed tests are
/// skipped locally but fail when `CI` is set.
pub fn database_url_from(var: impl Fn(&str) -> Option<String>) -> Result<Option<String>> {
    match var("DATABASE_URL").filter(|url| !url.is_empty()) {
        Some(url) => Ok(Some(url)),
        None if var("CI").is_some() => anyhow::bail!("DATABASE_URL must be set when CI is set"),
        None => Ok(None),
    }
}

/// Start the API in-process on a free port against `DATABASE_URL`.
///
/// Returns `None` when no database is configured so callers can skip.
pub async fn spawn_server() -> Result<Option<TestServer>> {
    let _ = dotenvy::dotenv();
    let Some(database_url) = database_url_from(|key| std::env::var(key).ok())? else {
        eprintln!("skipping: DATABASE_URL is not set");
        return Ok(None);
    };

    let mut config = AppConfig::for_database(database_url);
    config.api.enable_request_logging = false;

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to test database")?;
    DatabaseManager::migrate(&pool).await?;

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let router = app(AppState::new(config, pool.clone()));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(Some(TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        pool,
    }))
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/users/"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/token"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await?)
    }

    /// Register a fresh user and return its bearer token.
    pub async fn new_user(&self, prefix: &str) -> Result<String> {
        let email = unique_email(prefix);
        let res = self.register(&email, "pa55word").await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self.login(&email, "pa55word").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("missing access_token")
    }

    /// Id of the user behind a token.
    pub async fn user_id(&self, token: &str) -> Result<i64> {
        let me: Value = self.get(token, "/users/me").await?.json().await?;
        me["id"].as_i64().context("missing user id")
    }

    pub async fn get(&self, token: &str, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }

    pub async fn post(&self, token: &str, path: &str, body: Value) -> Result<Response> {
        Ok(self.client.post(self.url(path)).bearer_auth(token).json(&body).send().await?)
    }

    pub async fn create_subject(&self, token: &str, name: &str) -> Result<i64> {
        let res = self.post(token, "/subjects/", json!({ "name": name })).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create subject failed: {}", res.status());
        let body: Value = res.json().await?;
        body["id"].as_i64().context("missing subject id")
    }

    pub async fn create_definition(&self, token: &str, subject_id: i64, name: &str) -> Result<i64> {
        let res = self
            .post(token, &format!("/subjects/{}/definitions/", subject_id), json!({ "name": name }))
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create definition failed: {}", res.status());
        let body: Value = res.json().await?;
        body["id"].as_i64().context("missing definition id")
    }

    pub async fn add_score(
        &self,
        token: &str,
        subject_id: i64,
        definition_id: i64,
        score: i32,
        date: &str,
    ) -> Result<Response> {
        self.post(
            token,
            "/scores/",
            json!({
                "score": score,
                "date": date,
                "subject_id": subject_id,
                "behavior_definition_id": definition_id,
            }),
        )
        .await
    }
}
