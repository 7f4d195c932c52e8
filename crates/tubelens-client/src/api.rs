use std::time::Duration;

use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::settings::CODE_LOCAL_WHISPER_UNAVAILABLE;

/// Timeout for ordinary requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for endpoints that may sit behind transcription or an LLM call
/// (analyze, summary generation).
const EXTENDED_TIMEOUT: Duration = Duration::from_secs(120);

/// Shape of error bodies returned by the API.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// HTTP client for the tubelens API.
///
/// Owns two underlying clients: one with the default timeout and one with an
/// extended timeout for long-running endpoints.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    http_slow: reqwest::Client,
}

impl ApiClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api/v1";

    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http: reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?,
            http_slow: reqwest::Client::builder()
                .timeout(EXTENDED_TIMEOUT)
                .build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {path}");
        let resp = self.http.get(self.url(path)).query(query).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn get_json_slow<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {path} (extended timeout)");
        let resp = self
            .http_slow
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!("POST {path}");
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn post_empty_slow(&self, path: &str) -> Result<()> {
        debug!("POST {path} (extended timeout)");
        let resp = self.http_slow.post(self.url(path)).send().await?;
        Self::expect_success(resp).await
    }

    pub(crate) async fn put_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!("PUT {path}");
        let resp = self.http.put(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        debug!("DELETE {path}");
        let resp = self.http.delete(self.url(path)).send().await?;
        Self::expect_success(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        let body = resp.json::<ErrorBody>().await.unwrap_or_default();
        Err(Self::classify(status, body))
    }

    async fn expect_success(resp: reqwest::Response) -> Result<()> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.json::<ErrorBody>().await.unwrap_or_default();
        Err(Self::classify(status, body))
    }

    /// Map a non-success response onto a [`ClientError`]. The
    /// LOCAL_WHISPER_UNAVAILABLE code gets its own variant so callers can
    /// word the failure the same way as the local precondition check.
    fn classify(status: StatusCode, body: ErrorBody) -> ClientError {
        if body.code.as_deref() == Some(CODE_LOCAL_WHISPER_UNAVAILABLE) {
            return ClientError::LocalWhisperRejected;
        }
        let message = body
            .error
            .or(body.message)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        ClientError::Server { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = ApiClient::new("http://localhost:8080/api/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(client.url("/videos"), "http://localhost:8080/api/v1/videos");
    }

    #[test]
    fn whisper_code_maps_to_dedicated_variant() {
        let body = ErrorBody {
            error: Some("Local Whisper service is not available.".into()),
            message: None,
            code: Some("LOCAL_WHISPER_UNAVAILABLE".into()),
        };
        let err = ApiClient::classify(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ClientError::LocalWhisperRejected));
    }

    #[test]
    fn server_message_is_surfaced_verbatim() {
        let body = ErrorBody {
            error: Some("invalid YouTube URL".into()),
            message: None,
            code: None,
        };
        match ApiClient::classify(StatusCode::BAD_REQUEST, body) {
            ClientError::Server { message } => assert_eq!(message, "invalid YouTube URL"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_error_body_falls_back_to_status() {
        let err = ApiClient::classify(StatusCode::BAD_GATEWAY, ErrorBody::default());
        match err {
            ClientError::Server { message } => assert!(message.contains("502")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
