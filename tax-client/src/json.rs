//! The JSON request helper shared by every form.
//!
//! One call is one HTTP request: no retries, no timeout beyond the client
//! default. The helper never presents errors; it only classifies them.

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use tax_core::RequestError;
use tracing::debug;

/// Status and parsed body of a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: u16,
    pub body: Value,
}

/// Sends JSON payloads to a backend rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct JsonClient {
    http: Client,
    base_url: String,
}

impl JsonClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` against the base URL. Absolute `http(s)://` URLs are
    /// used unchanged.
    pub fn url_for(
        &self,
        path: &str,
    ) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Sends `payload` with `method` and returns the parsed body.
    ///
    /// # Errors
    /// * [`RequestError::Network`] when no response arrives.
    /// * [`RequestError::Backend`] for a non-success status; the message is
    ///   the body's `error` string or `Request failed (<status>)`.
    /// * [`RequestError::MalformedResponse`] for a success status whose
    ///   non-empty body is not JSON.
    pub async fn send<P>(
        &self,
        path: &str,
        payload: &P,
        method: Method,
    ) -> Result<Value, RequestError>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.exchange(path, payload, method)
            .await
            .map(|response| response.body)
    }

    /// [`send`](Self::send) with the default `POST` method.
    pub async fn post<P>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<Value, RequestError>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.send(path, payload, Method::POST).await
    }

    /// Like [`send`](Self::send) but keeps the success status alongside the body.
    pub async fn exchange<P>(
        &self,
        path: &str,
        payload: &P,
        method: Method,
    ) -> Result<JsonResponse, RequestError>
    where
        P: Serialize + ?Sized + Sync,
    {
        let url = self.url_for(path);
        debug!(%method, %url, "sending JSON request");

        let response = self
            .http
            .request(method, &url)
            .json(payload)
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "response received");

        interpret(status.as_u16(), status.is_success(), &text)
    }
}

/// Applies the body-parsing rules to a raw response.
fn interpret(
    status: u16,
    success: bool,
    text: &str,
) -> Result<JsonResponse, RequestError> {
    let parsed = serde_json::from_str::<Value>(text);

    if !success {
        // Unparseable error bodies fall back to the generic status message.
        let body = parsed.unwrap_or_else(|_| empty_object());
        return Err(RequestError::from_status(status, &body));
    }

    match parsed {
        Ok(body) => Ok(JsonResponse { status, body }),
        Err(_) if text.trim().is_empty() => Ok(JsonResponse {
            status,
            body: empty_object(),
        }),
        Err(e) => Err(RequestError::MalformedResponse {
            status,
            detail: e.to_string(),
        }),
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}
