//! Session token extraction.

pub(crate) mod middleware;
