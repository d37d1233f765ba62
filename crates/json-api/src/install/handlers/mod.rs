//! Install Handlers

pub(crate) mod callback;
pub(crate) mod start;
pub(crate) mod uninstall;
