//! Store Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    secrets::{AccessToken, Nonce},
    uuids::TypedUuid,
};

/// Store UUID
pub type StoreUuid = TypedUuid<StoreRecord>;

/// Canonical storefront identifier, e.g. `acme.myshopify.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreName(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("store name must not be empty")]
pub struct EmptyStoreName;

impl StoreName {
    /// Parse a store name, trimming surrounding whitespace.
    ///
    /// Hostnames are case-insensitive, so names are stored lowercased and
    /// every entry point resolves the same store to the same record.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyStoreName`] when nothing is left after trimming.
    pub fn parse(value: &str) -> Result<Self, EmptyStoreName> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(EmptyStoreName);
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StoreName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Store Record
///
/// One installation attempt (or completed installation) of the app in a
/// merchant's store.
#[derive(Debug, Clone)]
pub struct StoreRecord {
    /// Unique store identifier, assigned on creation.
    pub uuid: StoreUuid,

    /// Canonical store name; unique among live records.
    pub name: StoreName,

    /// Nonce of the latest in-flight install attempt.
    pub nonce: Option<Nonce>,

    /// Long-lived platform credential, set once the redirect completes.
    pub access_token: Option<AccessToken>,

    /// Whether installation completed.
    pub installed: bool,

    /// Store creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,

    /// Soft-delete timestamp when deleted.
    pub deleted_at: Option<Timestamp>,
}
