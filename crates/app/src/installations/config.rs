//! URLs the installation flow hands out.

use url::Url;

use crate::domain::stores::records::StoreName;

#[derive(Debug, Clone)]
pub struct InstallationsConfig {
    /// Public base URL of this app, e.g. `https://app.example.com`.
    pub app_base_url: Url,

    /// Public client id of the app.
    pub api_key: String,
}

impl InstallationsConfig {
    fn app_endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.app_base_url.as_str().trim_end_matches('/');

        Url::parse(&format!("{base}/{path}"))
    }

    /// Where the platform sends the merchant after approving an install.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be extended.
    pub fn redirect_callback_url(&self) -> Result<Url, url::ParseError> {
        self.app_endpoint("auth/callback")
    }

    /// Where the platform delivers the uninstall notification for `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be extended.
    pub fn uninstall_callback_url(&self, store: &StoreName) -> Result<Url, url::ParseError> {
        let mut url = self.app_endpoint("uninstall")?;

        url.query_pairs_mut().append_pair("shop", store.as_str());

        Ok(url)
    }

    /// Breaks an already installed store out of the install iframe.
    #[must_use]
    pub fn exit_iframe_url(&self, store: &StoreName) -> String {
        format!("https://{store}/admin/apps/{}/exit-iframe", self.api_key)
    }

    /// The app inside the store admin.
    #[must_use]
    pub fn app_url(&self, store: &StoreName) -> String {
        format!("https://{store}/admin/apps/{}", self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn config(base: &str) -> InstallationsConfig {
        InstallationsConfig {
            app_base_url: Url::parse(base).expect("valid base url"),
            api_key: "app-key".to_string(),
        }
    }

    #[test]
    fn callback_urls_extend_the_base_path() -> TestResult {
        let store = StoreName::parse("acme.myshopify.com")?;

        for base in ["https://app.example.com", "https://app.example.com/"] {
            let config = config(base);

            assert_eq!(
                config.redirect_callback_url()?.as_str(),
                "https://app.example.com/auth/callback"
            );
            assert_eq!(
                config.uninstall_callback_url(&store)?.as_str(),
                "https://app.example.com/uninstall?shop=acme.myshopify.com"
            );
        }

        let nested = config("https://example.com/shopify");

        assert_eq!(
            nested.redirect_callback_url()?.as_str(),
            "https://example.com/shopify/auth/callback"
        );

        Ok(())
    }

    #[test]
    fn admin_urls_point_at_the_store() -> TestResult {
        let store = StoreName::parse("acme.myshopify.com")?;
        let config = config("https://app.example.com");

        assert_eq!(
            config.exit_iframe_url(&store),
            "https://acme.myshopify.com/admin/apps/app-key/exit-iframe"
        );
        assert_eq!(
            config.app_url(&store),
            "https://acme.myshopify.com/admin/apps/app-key"
        );

        Ok(())
    }
}
