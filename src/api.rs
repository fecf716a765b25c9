// API client module: a small blocking HTTP client that talks to a
// GoShort! server. Every call goes through `send`, which enforces the
// status contract, and `decode`, which opens the response envelope.
// Responses are owned values, so the connection is released when they
// go out of scope on every path, errors included.

use crate::error::{GoshortError, Result};
use crate::models::{
    Envelope, ListPayload, LoginPayload, LoginRequest, Opened, ShortenPayload, ShortenRequest,
    Shortlink,
};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const SESSION_HEADER: &str = "Session";

pub const LOGIN_PATH: &str = "/api/v1/user/login";
pub const CURRENT_USER_PATH: &str = "/api/v1/user/me";
pub const SHORTLINKS_PATH: &str = "/api/v1/shortlinks";

/// Build the shared blocking client. Every request made through it is
/// bounded by `timeout`.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(GoshortError::HttpClient)
}

/// Client bound to one server, with an optional session token for
/// authenticated calls.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        ApiClient {
            client,
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Store a session token for subsequent authenticated requests.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Attach the `Session` header when a token is set.
    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header(SESSION_HEADER, token),
            None => req,
        }
    }

    fn send(&self, req: RequestBuilder, url: &str) -> Result<Response> {
        let res = req.send().map_err(|source| GoshortError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = res.status();
        tracing::debug!(%url, status = status.as_u16(), "response received");
        if status != StatusCode::OK {
            return Err(GoshortError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(res)
    }

    /// Read the body and open the envelope. `action` names the operation
    /// in the error when the server reports `success: false`.
    fn decode<T: DeserializeOwned>(res: Response, url: &str, action: &'static str) -> Result<T> {
        let body = res.text().map_err(|source| GoshortError::Transport {
            url: url.to_string(),
            source,
        })?;
        let decode_err = |source| GoshortError::Decode {
            url: url.to_string(),
            source,
        };
        let envelope: Envelope = serde_json::from_str(&body).map_err(decode_err)?;
        // `success: false` wins over whatever payload came with it
        match envelope.open::<T>().map_err(decode_err)? {
            Opened::Accepted(payload) => Ok(payload),
            Opened::Rejected(message) => Err(GoshortError::Application { action, message }),
        }
    }

    /// Unauthenticated GET of the bare server URL; succeeds only on 200.
    pub fn ping(&self) -> Result<()> {
        let url = self.base_url.clone();
        tracing::debug!(%url, "GET");
        self.send(self.client.get(&url), &url)?;
        Ok(())
    }

    /// POST credentials and return the issued session.
    pub fn login(&self, req: &LoginRequest) -> Result<LoginPayload> {
        let url = self.endpoint(LOGIN_PATH);
        tracing::debug!(%url, "POST");
        let res = self.send(self.client.post(&url).json(req), &url)?;
        let payload: LoginPayload = Self::decode(res, &url, "Login")?;
        // an empty token can't be stored as a session
        if payload.session.is_empty() {
            return Err(GoshortError::Application {
                action: "Login",
                message: "server returned an empty session token".into(),
            });
        }
        Ok(payload)
    }

    /// Ask the server whether the current token is still accepted. Any
    /// failure, transport or status, is reported as `InvalidSession`.
    pub fn validate_session(&self) -> Result<()> {
        let url = self.endpoint(CURRENT_USER_PATH);
        tracing::debug!(%url, "GET");
        // only the status matters here, the body is dropped unread
        match self.send(self.authed(self.client.get(&url)), &url) {
            Ok(_) => Ok(()),
            Err(e) => Err(GoshortError::InvalidSession {
                reason: error_chain(&e),
            }),
        }
    }

    pub fn create_shortlink(&self, long_url: &str) -> Result<Shortlink> {
        let url = self.endpoint(SHORTLINKS_PATH);
        let body = ShortenRequest {
            url: long_url.to_string(),
        };
        tracing::debug!(%url, "POST");
        let res = self.send(self.authed(self.client.post(&url).json(&body)), &url)?;
        let payload: ShortenPayload = Self::decode(res, &url, "URL shortening")?;
        Ok(payload.shortlink)
    }

    pub fn list_shortlinks(&self) -> Result<Vec<Shortlink>> {
        let url = self.endpoint(SHORTLINKS_PATH);
        tracing::debug!(%url, "GET");
        let res = self.send(self.authed(self.client.get(&url)), &url)?;
        let payload: ListPayload = Self::decode(res, &url, "Retrieving shortlinks")?;
        Ok(payload.shortlinks)
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
