use anyhow::{bail, Context, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Thin HTTP client for the BHV3 API.
pub struct ApiClient {
    base: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let mut base = Url::parse(base_url).with_context(|| format!("invalid API URL: {}", base_url))?;
        // Url::join replaces the last segment unless the base path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            base,
            token: token.filter(|t| !t.is_empty()),
            http: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("invalid API path: {}", path))
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        let request = self.http.get(self.url(path)?);
        self.send(self.authorize(request)?).await
    }

    /// GET with query parameters encoded by reqwest.
    pub async fn get_query<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Value> {
        let request = self.http.get(self.url(path)?).query(query);
        self.send(self.authorize(request)?).await
    }

    pub async fn get_public(&self, path: &str) -> Result<(StatusCode, Value)> {
        let response = self.http.get(self.url(path)?).send().await?;
        let status = response.status();
        Ok((status, response.json().await.unwrap_or(Value::Null)))
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let request = self.http.post(self.url(path)?).json(body);
        self.send(self.authorize(request)?).await
    }

    pub async fn post_json_public(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(self.http.post(self.url(path)?).json(body)).await
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Value> {
        self.send(self.http.post(self.url(path)?).form(form)).await
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match &self.token {
            Some(token) => Ok(request.bearer_auth(token)),
            None => bail!("not logged in; run `bhv auth login` and set BHV_TOKEN or pass --token"),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("request failed")?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            bail!("{} {}", status.as_u16(), error_message(&body));
        }
        Ok(body)
    }
}

/// Message from the API error body, or a placeholder when there is none.
pub fn error_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| "request failed".to_string())
}
