//! Connectivity probe.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use loginator_core::error::ParseError;
use loginator_core::{ProbeResult, Result};

use crate::client::PortalClient;

static JS_REDIRECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.location="([^"]+)""#).expect("redirect pattern is valid")
});

/// Classify a probe response.
///
/// 204 means online whatever the body says. Anything else must carry a
/// `window.location="..."` redirect; its absence is a portal-shape mismatch,
/// not a sign of being online.
pub fn classify_probe(status: u16, body: &str) -> Result<ProbeResult> {
    if status == 204 {
        return Ok(ProbeResult::Online);
    }

    let url = JS_REDIRECT
        .captures(body)
        .and_then(|c| c.get(1))
        .ok_or(ParseError::NoRedirect)?;

    Ok(ProbeResult::RedirectTo(url.as_str().to_string()))
}

pub(crate) async fn probe(client: &PortalClient, probe_url: &str) -> Result<ProbeResult> {
    let response = client.get(probe_url).await?;
    let result = classify_probe(response.status, &response.body)?;

    match &result {
        ProbeResult::Online => info!("Connected to the internet, no captive portal"),
        ProbeResult::RedirectTo(url) => info!(%url, "Captive portal redirect found"),
    }

    Ok(result)
}
