//! loginator-store - Filesystem and keyring persistence.

mod fs;
mod os_keyring;
mod plain;
mod session;

pub use os_keyring::KeyringCredentialStore;
pub use plain::PlainCredentialStore;
pub use session::SessionStore;
