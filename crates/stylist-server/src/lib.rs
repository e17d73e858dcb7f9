mod auth;
mod cors;
mod health;
mod request_context;

use std::net::SocketAddr;

use axum::Router;
use stylist_config::Config;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the generation pipeline fails to initialize
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let pipeline = stylist_pipeline::build_pipeline(&config)?;
        let catalog = stylist_catalog::build_catalog(&config);

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Style generation
        app = app.merge(stylist_pipeline::endpoint_router().with_state(pipeline));

        // Trending styles catalog
        app = app.merge(stylist_catalog::endpoint_router().with_state(catalog));

        // Apply middleware layers (innermost first)

        // Request context (innermost, sees the session verified below)
        app = app.layer(axum::middleware::from_fn(request_context::request_context_middleware));

        // Session verification
        if let Some(auth_config) = config.auth.as_ref().filter(|auth| auth.enabled) {
            let verifier = auth::SessionVerifier::new(auth_config);
            app = app.layer(axum::middleware::from_fn(move |req, next| {
                let verifier = verifier.clone();
                async move { auth::auth_middleware(verifier, req, next).await }
            }));
        } else {
            tracing::warn!("session verification disabled; admin routes are unavailable");
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // Allow headers on regular responses; preflights never reach this layer
        for (name, value) in cors::response_headers(&config.server.cors) {
            app = app.layer(SetResponseHeaderLayer::if_not_present(name, value));
        }

        // CORS (outermost, so preflights and rejections carry the headers)
        app = app.layer(cors::cors_layer(&config.server.cors));

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
