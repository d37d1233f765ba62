//! Request helper extensions.

use salvo::prelude::Request;

pub(crate) trait RequestExt {
    /// Path and query as received, for signature checks.
    fn signed_url(&self) -> String;
}

impl RequestExt for Request {
    fn signed_url(&self) -> String {
        self.uri()
            .path_and_query()
            .map_or_else(|| self.uri().path().to_string(), ToString::to_string)
    }
}
