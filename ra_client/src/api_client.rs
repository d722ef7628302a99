//! HTTP client wrapper for the authentication server API.

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for the authentication server's REST API.
///
/// Holds the session token obtained from the last successful login and
/// presents it on protected calls.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
            token: None,
        }
    }

    /// Register a new account, returning the server's message.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/api/v1/auth/register", self.base_url))
            .json(&serde_json::json!({
                "email": email,
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json::<MessageResponse>().await?.message)
        } else {
            Err(anyhow!(error_detail(response).await))
        }
    }

    /// Log in and remember the returned session token.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/api/v1/auth/login", self.base_url))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        if response.status().is_success() {
            let token = response.json::<LoginResponse>().await?.token;
            self.token = Some(token.clone());
            Ok(token)
        } else {
            Err(anyhow!(error_detail(response).await))
        }
    }

    /// Call the protected resource with the stored session token.
    pub async fn access_protected(&self) -> Result<String> {
        let mut request = self
            .http
            .get(format!("{}/api/v1/protected", self.base_url));

        if let Some(token) = &self.token {
            request = request.header("authorization", token);
        }

        let response = request.send().await?;

        if response.status().is_success() {
            Ok(response.json::<MessageResponse>().await?.message)
        } else {
            Err(anyhow!(error_detail(response).await))
        }
    }

    /// Wipe the server's account database (test support).
    pub async fn cleanup(&self) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/api/v1/admin/cleanup", self.base_url))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(anyhow!(error_detail(response).await))
        }
    }
}

/// Pull the error detail out of a failed response, falling back to the
/// HTTP status when the body isn't the expected JSON shape.
async fn error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {status}"),
    }
}
