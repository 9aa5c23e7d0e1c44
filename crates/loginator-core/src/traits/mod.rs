//! Collaborator traits the login path depends on.

mod credential_store;
mod isolation;

pub use credential_store::CredentialStore;
pub use isolation::{IsolationGuard, NetworkIsolation, NoIsolation};
