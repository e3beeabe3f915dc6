use std::{future::Future, time::Duration};

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    error::{Error, Result},
    types::Credential,
};

/// Default for every outbound request unless `HTTP_TIMEOUT_SECS` says otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

/// One HTTP request, independent of the client that ends up sending it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    /// A `GET` without headers or body.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    /// A `POST` without headers or body.
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Appends a header. Names are matched case-insensitively by
    /// [`ApiRequest::header_value`].
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds `Authorization: Bearer <token>` for `credential`.
    pub fn bearer(self, credential: &Credential) -> Self {
        let value = format!("Bearer {}", credential.access_token);
        self.header("Authorization", value)
    }

    /// Replaces the body with a JSON document.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Body::Json(body);
        self
    }

    /// Replaces the body with `application/x-www-form-urlencoded` fields.
    ///
    /// # Example
    ///
    /// ```
    /// let request = ApiRequest::post(token_url)
    ///     .form(&[("grant_type", "client_credentials")]);
    /// ```
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = Body::Form(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    /// First value of header `name`, ignoring ASCII case.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The "send request, get status + body" primitive every component builds on.
///
/// Implementations return the parsed JSON body for 2xx replies (`Value::Null`
/// when the body is empty) and classify everything else into an [`Error`].
pub trait Transport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Value>> + Send;
}

/// Maps a non-2xx status onto the error taxonomy.
pub fn classify_status(status: u16, body: &str) -> Error {
    match status {
        401 | 403 => Error::unauthorized(format!("remote replied HTTP {status}: {body}")),
        _ => Error::transport(Some(status), body.to_string()),
    }
}

/// `reqwest`-backed transport with a bounded request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// `Transport` when the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        log::debug!("{:?} {}", request.method, request.url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Form(fields) => builder.form(fields),
        };

        let response = builder.send().await.inspect_err(|e| {
            log::warn!("request to {} failed: {}", request.url, e);
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::warn!("{} replied {}", request.url, status);
            return Err(classify_status(status.as_u16(), &text));
        }

        if text.trim().is_empty() || status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
