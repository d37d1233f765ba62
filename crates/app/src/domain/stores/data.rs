//! Store Data

use crate::{
    domain::stores::records::StoreName,
    secrets::{AccessToken, Nonce},
};

/// New Store Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    /// Store name to persist.
    pub name: StoreName,

    /// Nonce of the install attempt that created the record, if any.
    pub nonce: Option<Nonce>,

    /// Initial installation flag.
    pub installed: bool,
}

/// Store Update Data
///
/// Replaces every mutable field of the live record.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreUpdate {
    pub nonce: Option<Nonce>,
    pub access_token: Option<AccessToken>,
    pub installed: bool,
}
