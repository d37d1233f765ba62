//! Credential newtypes with redacted formatting.

use std::fmt;

use zeroize::Zeroize;

macro_rules! secret_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn expose(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(**redacted**)"))
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                self.0.zeroize();
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

secret_string!(
    /// Long-lived credential for calling the platform on behalf of a store.
    AccessToken
);

secret_string!(
    /// Single-use value binding an install attempt to its redirect.
    Nonce
);

secret_string!(
    /// Short-lived token presented by an embedded caller.
    SessionToken
);

secret_string!(
    /// This application's client secret.
    ApiSecret
);
