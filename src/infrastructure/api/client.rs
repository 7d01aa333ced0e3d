// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::retry::retry_async;
use crate::domain::constants::{BROWSER_USER_AGENT, PLATFORM_ORIGIN, PLATFORM_REFERER};
use crate::domain::error::AppError;
use dashmap::DashMap;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const BODY_SNIPPET_LEN: usize = 200;

/// Where an attempt failed; kept for log diagnostics only, the retry policy
/// treats every class the same.
enum AttemptFailure {
    Status { status: u16, body: String },
    NoResponse(String),
    Local(String),
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Status { status, body } => write!(f, "HTTP {status} - {body}"),
            AttemptFailure::NoResponse(reason) => write!(f, "no response received: {reason}"),
            AttemptFailure::Local(reason) => write!(f, "request not sent: {reason}"),
        }
    }
}

/// JSON-over-HTTP client with bounded constant-delay retries and one cached
/// `reqwest::Client` per proxy endpoint.
pub struct ApiClient {
    clients: DashMap<String, reqwest::Client>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    fn client_for(&self, proxy: Option<&str>) -> Result<reqwest::Client, AppError> {
        let key = proxy.unwrap_or_default();
        if let Some(existing) = self.clients.get(key) {
            return Ok(existing.clone());
        }

        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy_uri) = proxy {
            let proxy = reqwest::Proxy::all(proxy_uri)
                .map_err(|e| AppError::Config(format!("Invalid proxy URI {proxy_uri}: {e}")))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Connection(format!("HTTP client build failed: {e}")))?;
        self.clients.insert(key.to_string(), client.clone());
        Ok(client)
    }

    /// Issue a request with the fixed browser-like header set; caller headers
    /// win on conflict. Retries every failure `max_retries` times total with
    /// a constant `retry_delay` in between, then fails with the last error.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        proxy: Option<&str>,
        headers: &[(&str, &str)],
        max_retries: u32,
        retry_delay: Duration,
    ) -> Result<Value, AppError> {
        let client = self.client_for(proxy)?;
        let header_map = build_headers(headers)?;

        retry_async(
            |attempt| {
                let client = client.clone();
                let method = method.clone();
                let header_map = header_map.clone();
                async move {
                    match attempt_request(&client, method, url, body, header_map).await {
                        Ok(value) => Ok(value),
                        Err(failure) => {
                            tracing::warn!(
                                target: "api",
                                url,
                                attempt,
                                max_retries,
                                error = %failure,
                                "API request failed"
                            );
                            if attempt < max_retries as usize {
                                tracing::debug!(
                                    target: "api",
                                    delay_secs = retry_delay.as_secs(),
                                    "Retrying after delay"
                                );
                            }
                            Err(failure)
                        }
                    }
                }
            },
            max_retries as usize,
            retry_delay,
        )
        .await
        .map_err(|failure| AppError::Api {
            url: url.to_string(),
            attempts: max_retries,
            reason: failure.to_string(),
        })
    }

    /// GET with the default retry policy.
    pub async fn get(&self, url: &str, proxy: Option<&str>) -> Result<Value, AppError> {
        self.request(
            Method::GET,
            url,
            None,
            proxy,
            &[],
            DEFAULT_MAX_RETRIES,
            DEFAULT_RETRY_DELAY,
        )
        .await
    }

    /// POST with the default retry policy.
    pub async fn post(
        &self,
        url: &str,
        body: Option<&Value>,
        proxy: Option<&str>,
        headers: &[(&str, &str)],
    ) -> Result<Value, AppError> {
        self.request(
            Method::POST,
            url,
            body,
            proxy,
            headers,
            DEFAULT_MAX_RETRIES,
            DEFAULT_RETRY_DELAY,
        )
        .await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build_headers(extra: &[(&str, &str)]) -> Result<HeaderMap, AppError> {
    let mut map = HeaderMap::new();
    map.insert("Accept", HeaderValue::from_static("*/*"));
    map.insert(
        "Accept-Encoding",
        HeaderValue::from_static("gzip, deflate, br"),
    );
    map.insert("Connection", HeaderValue::from_static("keep-alive"));
    map.insert("User-Agent", HeaderValue::from_static(BROWSER_USER_AGENT));
    map.insert("Origin", HeaderValue::from_static(PLATFORM_ORIGIN));
    map.insert("Referer", HeaderValue::from_static(PLATFORM_REFERER));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::Config(format!("Invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::Config(format!("Invalid header value for {name}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

async fn attempt_request(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    body: Option<&Value>,
    headers: HeaderMap,
) -> Result<Value, AttemptFailure> {
    let mut request = client.request(method, url).headers(headers);
    if let Some(body) = body {
        request = request.json(body);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_builder() {
            AttemptFailure::Local(e.to_string())
        } else {
            AttemptFailure::NoResponse(e.to_string())
        }
    })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AttemptFailure::NoResponse(format!("body read failed: {e}")))?;

    if !status.is_success() {
        let mut body = text;
        body.truncate(BODY_SNIPPET_LEN);
        return Err(AttemptFailure::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&text)
        .map_err(|e| AttemptFailure::Local(format!("response decode failed: {e}")))
}
