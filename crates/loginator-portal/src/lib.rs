//! loginator-portal - Captive-portal detection and login.
//!
//! One login attempt runs the portal protocol in sequence:
//! probe, fetch the login page, parse its form, submit credentials, then
//! pull the keepalive session out of the response and persist it.
//!
//! # Example
//!
//! ```no_run
//! use loginator_core::{NoIsolation, PortalConfig};
//! use loginator_portal::Loginator;
//! use loginator_store::{PlainCredentialStore, SessionStore};
//!
//! # async fn example() -> Result<(), loginator_core::Error> {
//! let loginator = Loginator::new(
//!     PortalConfig::default(),
//!     Box::new(PlainCredentialStore::new("/tmp/credentials.json")),
//!     SessionStore::new("/tmp/session.json"),
//! )?
//! .with_isolation(Box::new(NoIsolation));
//!
//! let outcome = loginator.login(None, None).await?;
//! println!("{}", outcome);
//! # Ok(())
//! # }
//! ```

mod client;
mod form;
mod keepalive;
mod loginator;
mod poll;
mod probe;
mod submit;

pub use client::{PortalClient, PortalResponse};
pub use form::extract_form;
pub use keepalive::extract_session;
pub use loginator::{LoginOutcome, Loginator};
pub use poll::CycleOutcome;
pub use probe::classify_probe;
pub use submit::AUTH_FAILED_MARKER;
