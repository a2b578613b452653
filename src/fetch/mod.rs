//! HTTP plumbing shared by the fetch jobs.
//!
//! Every job talks to the network through [`HttpClient`], so auth headers and
//! query parameters can be layered on as decorators and tests can swap in an
//! in-memory client.

mod basic;
mod bearer;
mod query;

pub use basic::BasicClient;
pub use bearer::Bearer;
pub use query::QueryParams;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, Request, Response};
use tracing::debug;

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

/// Issues a `GET` for `url` asking for JSON and decodes the body.
///
/// # Errors
///
/// Fails on an invalid URL, a transport error, a non-2xx status, or a body
/// that is not valid JSON.
pub async fn fetch_json<C: HttpClient>(client: &C, url: &str) -> Result<serde_json::Value> {
    let url = url
        .parse()
        .with_context(|| format!("invalid URL '{url}'"))?;
    let mut req = Request::new(Method::GET, url);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let resp = client.execute(req).await?.error_for_status()?;
    debug!(status = %resp.status(), "Response received");

    let body = resp.bytes().await?;
    serde_json::from_slice(&body).context("response body is not valid JSON")
}
