//! HTTP response Config

use clap::Args;

/// Error response settings.
#[derive(Debug, Args)]
pub struct HttpConfig {
    /// Include the error chain in internal server error responses
    #[arg(
        long,
        env = "SEND_DETAILS_ON_INTERNAL_ERROR",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    pub send_details_on_internal_error: bool,
}
