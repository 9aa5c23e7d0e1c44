//! Subcommand implementations.

pub mod credentials;
pub mod get;
pub mod login;
pub mod logout;
pub mod run;
pub mod service;
