//! Bearer session token middleware.
//!
//! Only extracts the token. Verification belongs to the installations
//! service, which also decides what a missing token means.

use salvo::{http::header::AUTHORIZATION, prelude::*};

use storefront_app::secrets::SessionToken;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Some(token) = extract_bearer_token(req) {
        depot.insert_session_token(SessionToken::from(token));
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn echo_token(depot: &mut Depot, res: &mut Response) {
        let token = depot
            .session_token()
            .map_or_else(|| "missing".to_string(), |token| token.expose().to_string());

        res.render(token);
    }

    fn make_service() -> Service {
        Service::new(Router::new().hoop(handler).push(Router::new().get(echo_token)))
    }

    async fn echoed(authorization: Option<&str>) -> Result<String, salvo::Error> {
        let mut request = TestClient::get("http://example.com");

        if let Some(value) = authorization {
            request = request.add_header(AUTHORIZATION, value, true);
        }

        request.send(&make_service()).await.take_string().await
    }

    #[tokio::test]
    async fn missing_authorization_header_leaves_no_token() -> TestResult {
        assert_eq!(echoed(None).await?, "missing");

        Ok(())
    }

    #[tokio::test]
    async fn non_bearer_or_blank_tokens_are_ignored() -> TestResult {
        for value in ["Basic abc123", "Bearer", "Bearer    ", "abc123"] {
            assert_eq!(echoed(Some(value)).await?, "missing", "header {value:?}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn bearer_token_is_exposed_to_handlers() -> TestResult {
        assert_eq!(echoed(Some("Bearer abc.def.ghi")).await?, "abc.def.ghi");
        assert_eq!(echoed(Some("bearer  padded ")).await?, "padded");

        Ok(())
    }
}
