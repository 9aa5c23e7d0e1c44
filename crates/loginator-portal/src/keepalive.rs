//! Session extraction from the post-login page.

use std::sync::LazyLock;

use regex::Regex;

use loginator_core::error::ParseError;
use loginator_core::{PortalSession, Result};

static KEEPALIVE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"http://([^/]+)/keepalive\?([^"]+)"#).expect("keepalive pattern is valid")
});

/// Find the first `http://<host>/keepalive?<token>` URL in `html`.
pub fn extract_session(html: &str) -> Result<PortalSession> {
    let captures = KEEPALIVE_URL
        .captures(html)
        .ok_or(ParseError::NoKeepalive)?;

    Ok(PortalSession::new(&captures[1], &captures[2]))
}
