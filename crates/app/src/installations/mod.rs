//! Installations
//!
//! Drives a store through the install lifecycle: install request, redirect
//! completion, uninstall notification and session-scoped Admin API calls.

mod config;
mod errors;
mod service;

pub use config::InstallationsConfig;
pub use errors::InstallationsServiceError;
pub use service::*;
