//! Product Handlers

pub(crate) mod count;
pub(crate) mod create;
