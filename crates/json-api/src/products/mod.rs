//! Session-scoped product routes.

mod handlers;

pub(crate) use handlers::*;
