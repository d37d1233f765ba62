//! Install lifecycle routes.

mod handlers;

pub(crate) use handlers::*;

/// Header carrying the base64 HMAC of an inbound webhook body.
pub(crate) const WEBHOOK_SIGNATURE_HEADER: &str = "x-shopify-hmac-sha256";
