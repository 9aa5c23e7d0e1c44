//! Portal URL type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, ParseError};

/// A validated absolute HTTP(S) URL on the portal side.
///
/// Captive portals serve plain HTTP on private addresses, so unlike most
/// clients this type accepts `http://` for any host.
///
/// # Example
///
/// ```
/// use loginator_core::types::PortalUrl;
///
/// let page = PortalUrl::new("http://10.0.0.1/login/page.html").unwrap();
/// assert_eq!(page.resolve("submit.php").unwrap().as_str(),
///            "http://10.0.0.1/login/submit.php");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PortalUrl(Url);

impl PortalUrl {
    /// Create a new portal URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUrl`] if the URL is not absolute HTTP(S).
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| invalid(s, e.to_string()))?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Resolve a form action against this URL.
    ///
    /// Actions that already start with `http` are taken verbatim; anything
    /// else is an RFC 3986 relative reference.
    pub fn resolve(&self, reference: &str) -> Result<Self, Error> {
        if reference.starts_with("http") {
            return Self::new(reference);
        }

        let joined = self
            .0
            .join(reference)
            .map_err(|e| invalid(reference, e.to_string()))?;
        Self::validate(&joined, reference)?;
        Ok(Self(joined))
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(invalid(original, "must be an absolute URL"));
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(invalid(original, "must use HTTP or HTTPS"));
        }

        if url.host_str().is_none() {
            return Err(invalid(original, "must have a host"));
        }

        Ok(())
    }
}

fn invalid(value: &str, reason: impl Into<String>) -> Error {
    ParseError::InvalidUrl {
        value: value.to_string(),
        reason: reason.into(),
    }
    .into()
}

impl fmt::Display for PortalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PortalUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PortalUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
