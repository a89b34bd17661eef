use axum::{
    http::{header::CONTENT_TYPE, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE]),
    )
}
