//! Open-Meteo clients for geocoding and current conditions
//!
//! Both clients share one [`reqwest::Client`] built by [`http_client`], which
//! carries the request timeout.

pub mod forecast;
pub mod geocoding;

pub use forecast::OpenMeteoForecast;
pub use geocoding::OpenMeteoGeocoder;

use std::time::Duration;

use reqwest::{Client, Response};
use skycast_core::UpstreamError;
use url::Url;

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the upstream clients.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Join `path` onto a configured base URL, tolerating a trailing slash.
fn endpoint(service: &'static str, base: &str, path: &str) -> Result<Url, UpstreamError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|e| UpstreamError::transport(service, format!("bad url {joined}: {e}")))
}

/// Send a GET and return the body of a 2xx response.
async fn get_body(service: &'static str, client: &Client, url: Url) -> Result<String, UpstreamError> {
    let res: Response = client
        .get(url)
        .send()
        .await
        .map_err(|e| UpstreamError::transport(service, e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
        // The status alone decides the error kind; the body is only context.
        let body = res.text().await.unwrap_or_default();
        return Err(UpstreamError::transport(
            service,
            format!("status {}: {}", status, truncate_body(&body)),
        ));
    }

    res.text()
        .await
        .map_err(|e| UpstreamError::decode(service, format!("reading body: {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
