//! Routes

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    cors::{Any, Cors},
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{auth, healthcheck, install, observability, products, state::State};

pub(crate) fn router(state: Arc<State>) -> Router {
    let router = Router::new()
        .hoop(observability::request_logging)
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("ping").get(healthcheck::handler))
        .push(Router::with_path("auth/callback").get(install::callback::handler))
        .push(Router::with_path("uninstall").post(install::uninstall::handler))
        .push(
            Router::with_path("api/products")
                .hoop(auth::middleware::handler)
                .push(Router::with_path("count").get(products::count::handler))
                .push(
                    Router::with_path("create")
                        .get(products::create::handler)
                        .post(products::create::handler),
                ),
        )
        .get(install::start::handler);

    let doc = OpenApi::new("Storefront App API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "session_token",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}

/// The full HTTP service, with CORS answered for every route.
pub(crate) fn service(state: Arc<State>) -> Service {
    let cors = Cors::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .into_handler();

    Service::new(router(state)).hoop(cors)
}
