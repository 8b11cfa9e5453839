use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Error body shape the backend uses for failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Thin reqwest wrapper resolving relative paths against an API root
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    api_url: String,
}

impl HttpClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> AppResult<Response> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn patch(&self, path: &str) -> AppResult<Response> {
        self.send(self.request(Method::PATCH, path)).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<Response> {
        self.send(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Sends the request and turns any non-success status into `AppError::Api`
    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Backend request failed: status={}, body={}", status, body);
        Err(AppError::Api {
            status,
            message: parse_error_message(&body),
        })
    }
}

fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}
