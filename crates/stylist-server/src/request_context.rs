use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use stylist_core::{Authentication, RequestContext};

/// Middleware that constructs a `RequestContext` from the incoming request
///
/// Picks up the session verified by the auth middleware, if any
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let authentication = parts.extensions.get::<Authentication>().cloned().unwrap_or_default();

    let context = RequestContext {
        parts: parts.clone(),
        authentication,
    };

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(context);

    next.run(request).await
}
