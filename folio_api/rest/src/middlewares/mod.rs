use axum::Router;
use tower_http::cors::CorsLayer;

mod panic_handler;
mod request_id;
mod trace;

/// Wrap `router` in all middlewares. The request id has to be assigned before
/// the trace span is created, so it is the outer layer.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    let router = panic_handler::add(router);
    let router = trace::add(router);
    let router = request_id::add(router);
    router.layer(CorsLayer::permissive())
}
