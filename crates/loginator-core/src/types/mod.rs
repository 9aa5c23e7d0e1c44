//! Captive-portal protocol types.
//!
//! These are attempt-scoped: built from one HTTP exchange and dropped once
//! the login attempt ends.

mod login_form;
mod portal_url;
mod probe;

pub use login_form::LoginForm;
pub use portal_url::PortalUrl;
pub use probe::ProbeResult;
