//! Blocking HTTP client used by every probe.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, multipart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        write!(f, "{label}")
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Body attached to a request
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    /// Sent with `Content-Type: application/json`
    Json(String),
    /// Single-file multipart form
    File {
        field: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

/// Status, body and timing of a completed request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub elapsed: Duration,
    pub body: String,
}

impl ApiResponse {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// HTTP client bound to the base URL of the service under test
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    inner: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        let inner = Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            inner,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a service path such as `/actuator/health`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request to a path of the service under test
    pub fn send(&self, method: HttpMethod, path: &str, body: RequestBody) -> reqwest::Result<ApiResponse> {
        self.send_to(method, &self.url(path), body)
    }

    /// Send a request to an absolute URL; the elapsed time covers the full body read
    pub fn send_to(&self, method: HttpMethod, url: &str, body: RequestBody) -> reqwest::Result<ApiResponse> {
        let mut request = self.inner.request(method.into(), url);
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(json) => request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json),
            RequestBody::File {
                field,
                file_name,
                mime,
                bytes,
            } => {
                let part = multipart::Part::bytes(bytes).file_name(file_name).mime_str(&mime)?;
                request.multipart(multipart::Form::new().part(field, part))
            }
        };

        let started = Instant::now();
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(ApiResponse {
            status,
            elapsed: started.elapsed(),
            body,
        })
    }

    /// GET a path and report whether it answered 200
    pub fn is_ok(&self, path: &str) -> bool {
        self.url_is_ok(&self.url(path))
    }

    /// GET an absolute URL and report whether it answered 200
    pub fn url_is_ok(&self, url: &str) -> bool {
        matches!(
            self.send_to(HttpMethod::Get, url, RequestBody::Empty),
            Ok(ApiResponse { status: 200, .. })
        )
    }
}
