//! loginator-core - Core captive-portal types and traits.

pub mod config;
pub mod credentials;
pub mod error;
pub mod session;
pub mod traits;
pub mod types;

pub use config::PortalConfig;
pub use credentials::Credentials;
pub use error::Error;
pub use session::PortalSession;
pub use traits::{CredentialStore, IsolationGuard, NetworkIsolation, NoIsolation};
pub use types::{LoginForm, ProbeResult};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
