//! HTTP client for the business API
//!
//! Wraps reqwest with bearer-token auth, JSON and multipart handling and
//! error normalization. One request per action, awaited to completion; no
//! retries, no deduplication, no cancellation.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Bearer-token authenticated client for the business API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub email: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL (trailing slash trimmed)
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Authenticate and remember the returned bearer token
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let builder = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password });
        let response: LoginResponse = Self::decode(builder.send().await?).await?;
        self.token = Some(response.access_token.clone());
        Ok(response)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::decode(self.request(Method::GET, path)?.send().await?).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::decode(self.request(Method::POST, path)?.json(body).send().await?).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::decode(self.request(Method::PUT, path)?.json(body).send().await?).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::decode(self.request(Method::PATCH, path)?.json(body).send().await?).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let _: serde_json::Value =
            Self::decode(self.request(Method::DELETE, path)?.send().await?).await?;
        Ok(())
    }

    /// Upload a file as a multipart `file` field (Excel imports, images)
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<T> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")?;
        let form = Form::new().part("file", part);
        Self::decode(
            self.request(Method::POST, path)?
                .multipart(form)
                .send()
                .await?,
        )
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    /// Decode a response, normalizing non-2xx statuses into `ClientError::Api`
    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: extract_error_message(status.as_u16(), &text),
            });
        }

        let body = if text.is_empty() { "null" } else { &text };
        Ok(serde_json::from_str(body)?)
    }
}

/// Pull `message`/`error` out of an error body, else a generic status line
fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    format!("Request failed ({})", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_and_path_slashes_are_normalized() {
        let client = ApiClient::new("http://localhost:4000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url("/products"), "http://localhost:4000/api/products");
        assert_eq!(client.url("products"), "http://localhost:4000/api/products");
    }

    #[test]
    fn requests_require_a_token() {
        let client = ApiClient::new("http://localhost:4000/api", Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.request(Method::GET, "/products"),
            Err(ClientError::NotAuthenticated)
        ));
    }

    #[test]
    fn error_message_extraction_prefers_body_fields() {
        assert_eq!(
            extract_error_message(404, r#"{"message":"Product not found"}"#),
            "Product not found"
        );
        assert_eq!(
            extract_error_message(400, r#"{"error":"bad request"}"#),
            "bad request"
        );
        assert_eq!(extract_error_message(500, "<html>oops</html>"), "Request failed (500)");
        assert_eq!(extract_error_message(502, r#"{"message":""}"#), "Request failed (502)");
    }
}
