use http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, HeaderName};
use http::{HeaderValue, Method};
use stylist_config::{AnyOrArray, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    layer = match &config.origins {
        AnyOrArray::Any => layer.allow_origin(AllowOrigin::any()),
        AnyOrArray::List(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    layer = match &config.methods {
        AnyOrArray::Any => layer.allow_methods(AllowMethods::any()),
        AnyOrArray::List(methods) => {
            let methods: Vec<Method> = methods.iter().filter_map(|m| m.parse().ok()).collect();
            layer.allow_methods(methods)
        }
    };

    layer = match &config.headers {
        AnyOrArray::Any => layer.allow_headers(AllowHeaders::any()),
        AnyOrArray::List(headers) => {
            let headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            layer.allow_headers(headers)
        }
    };

    if !config.expose_headers.is_empty() {
        let headers: Vec<HeaderName> = config.expose_headers.iter().filter_map(|h| h.parse().ok()).collect();
        layer = layer.expose_headers(headers);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}

/// Allow-headers and allow-methods values for non-preflight responses
///
/// `CorsLayer` only emits these on preflights; browser clients of this API
/// expect them on every response.
pub fn response_headers(config: &CorsConfig) -> Vec<(HeaderName, HeaderValue)> {
    [
        (ACCESS_CONTROL_ALLOW_HEADERS, &config.headers),
        (ACCESS_CONTROL_ALLOW_METHODS, &config.methods),
    ]
    .into_iter()
    .filter_map(|(name, values)| {
        let rendered = match values {
            AnyOrArray::Any => "*".to_owned(),
            AnyOrArray::List(list) if list.is_empty() => return None,
            AnyOrArray::List(list) => list.join(", "),
        };
        HeaderValue::from_str(&rendered).ok().map(|value| (name, value))
    })
    .collect()
}
