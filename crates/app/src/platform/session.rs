//! Session token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{
    domain::stores::records::StoreName,
    platform::{PlatformConfig, SessionVerification},
    secrets::SessionToken,
};

/// Claims carried by an embedded app session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Store admin URL that issued the token.
    pub iss: String,

    /// Store origin the token was issued for.
    pub dest: String,

    /// Client id of the app.
    pub aud: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    pub exp: i64,

    pub nbf: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

fn host_of(value: &str) -> Option<String> {
    Url::parse(value)
        .ok()?
        .host_str()
        .map(str::to_ascii_lowercase)
}

pub(crate) fn verify(token: &SessionToken, config: &PlatformConfig) -> SessionVerification {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.api_key.as_str()]);
    validation.set_required_spec_claims(&["exp", "nbf", "aud"]);
    validation.validate_nbf = true;

    let key = DecodingKey::from_secret(config.api_secret.expose().as_bytes());

    let claims = match decode::<SessionClaims>(token.expose(), &key, &validation) {
        Ok(data) => data.claims,
        Err(error) => {
            debug!(%error, "session token rejected");
            return SessionVerification::rejected();
        }
    };

    let (Some(dest), Some(issuer)) = (host_of(&claims.dest), host_of(&claims.iss)) else {
        debug!("session token has unparsable dest or iss");
        return SessionVerification::rejected();
    };

    if dest != issuer {
        debug!(%dest, %issuer, "session token issuer does not match destination");
        return SessionVerification::rejected();
    }

    match StoreName::parse(&dest) {
        Ok(store) => SessionVerification::verified(store),
        Err(_) => SessionVerification::rejected(),
    }
}
