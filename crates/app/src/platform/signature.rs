//! Request signatures.
//!
//! Install and redirect URLs carry an `hmac` query parameter: hex
//! HMAC-SHA256 over the remaining parameters sorted by key and joined as
//! `k=v&k=v`. Webhook deliveries carry a base64 HMAC-SHA256 of the raw body.
//! Both are keyed with the app's API secret.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{platform::PlatformError, secrets::ApiSecret};

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PARAM: &str = "hmac";

/// Decoded query parameters of `url`, which may be absolute or a bare
/// path-and-query.
pub(crate) fn query_params(url: &str) -> Vec<(String, String)> {
    let query = url.split_once('?').map_or("", |(_, query)| query);
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// First value of `name` in `params`.
pub(crate) fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn mac(secret: &ApiSecret) -> Result<HmacSha256, PlatformError> {
    HmacSha256::new_from_slice(secret.expose().as_bytes()).map_err(|_| PlatformError::InvalidSignature)
}

fn signing_message<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs: Vec<(&str, &str)> = params
        .into_iter()
        .filter(|(key, _)| *key != SIGNATURE_PARAM && *key != "signature")
        .collect();

    pairs.sort_unstable();

    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Check the `hmac` parameter of `url` against its other parameters.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidSignature`] when the parameter is missing,
/// is not hex, or does not match.
pub fn verify_query(url: &str, secret: &ApiSecret) -> Result<(), PlatformError> {
    let params = query_params(url);

    let provided = param(&params, SIGNATURE_PARAM).ok_or(PlatformError::InvalidSignature)?;
    let provided = hex::decode(provided).map_err(|_| PlatformError::InvalidSignature)?;

    let message = signing_message(
        params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );

    let mut mac = mac(secret)?;
    mac.update(message.as_bytes());

    mac.verify_slice(&provided)
        .map_err(|_| PlatformError::InvalidSignature)
}

/// Encode `params` as a query string with a valid `hmac` appended.
///
/// # Errors
///
/// Returns an error if the secret cannot key the MAC.
pub fn signed_query(params: &[(&str, &str)], secret: &ApiSecret) -> Result<String, PlatformError> {
    let mut mac = mac(secret)?;
    mac.update(signing_message(params.iter().copied()).as_bytes());

    let signature = hex::encode(mac.finalize().into_bytes());

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(params.iter().copied());
    serializer.append_pair(SIGNATURE_PARAM, &signature);

    Ok(serializer.finish())
}

/// Check a base64 webhook signature against the raw delivery body.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidSignature`] on any mismatch.
pub fn verify_webhook(body: &[u8], signature: &str, secret: &ApiSecret) -> Result<(), PlatformError> {
    let provided = BASE64
        .decode(signature.trim())
        .map_err(|_| PlatformError::InvalidSignature)?;

    let mut mac = mac(secret)?;
    mac.update(body);

    mac.verify_slice(&provided)
        .map_err(|_| PlatformError::InvalidSignature)
}

/// Base64 webhook signature for `body`.
///
/// # Errors
///
/// Returns an error if the secret cannot key the MAC.
pub fn webhook_signature(body: &[u8], secret: &ApiSecret) -> Result<String, PlatformError> {
    let mut mac = mac(secret)?;
    mac.update(body);

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
