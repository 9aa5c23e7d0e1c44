//! Host integrations driven through external commands.
//!
//! Everything that shells out (the WARP client, systemd) lives here.

pub mod shell;
pub mod systemd;
pub mod warp;
