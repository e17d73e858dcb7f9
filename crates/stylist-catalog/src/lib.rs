//! Trending styles catalog: public listing and admin curation

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod access;
mod error;
pub mod storage;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{delete, get, post},
};
use stylist_core::RequestContext;
use uuid::Uuid;

pub use access::AdminPolicy;
pub use error::{CatalogError, Result};
pub use storage::{CatalogStore, memory::MemoryCatalog};
pub use types::{NewTrendingStyle, TrendingStyle, ValidStyle};

/// Shared state for the catalog routes
pub struct CatalogState {
    store: Arc<dyn CatalogStore>,
    policy: AdminPolicy,
}

impl CatalogState {
    pub fn new(store: Arc<dyn CatalogStore>, policy: AdminPolicy) -> Self {
        Self { store, policy }
    }
}

/// Build the catalog from configuration, seeding it with configured styles
pub fn build_catalog(config: &stylist_config::Config) -> Arc<CatalogState> {
    let seeds = config.catalog.styles.iter().cloned().map(ValidStyle::from);
    let store = MemoryCatalog::seeded(seeds);

    tracing::debug!(seeded = config.catalog.styles.len(), "trending styles catalog ready");

    Arc::new(CatalogState::new(
        Arc::new(store),
        AdminPolicy::from_config(config.auth.as_ref()),
    ))
}

/// Create the endpoint router for the catalog
pub fn endpoint_router() -> Router<Arc<CatalogState>> {
    Router::new()
        .route("/trending-styles", get(list_styles))
        .route("/admin/trending-styles", post(create_style))
        .route("/admin/trending-styles/{id}", delete(delete_style))
}

async fn list_styles(State(state): State<Arc<CatalogState>>) -> Result<Json<Vec<TrendingStyle>>> {
    let styles = state.store.list().await?;
    Ok(Json(styles))
}

async fn create_style(
    State(state): State<Arc<CatalogState>>,
    axum::Extension(context): axum::Extension<RequestContext>,
    body: std::result::Result<Json<NewTrendingStyle>, JsonRejection>,
) -> Result<(StatusCode, Json<TrendingStyle>)> {
    state.policy.authorize(&context)?;

    let Json(style) = body.map_err(|rejection| CatalogError::InvalidRequest(rejection.body_text()))?;
    let record = state.store.insert(style.validate()?).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn delete_style(
    State(state): State<Arc<CatalogState>>,
    axum::Extension(context): axum::Extension<RequestContext>,
    id: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode> {
    state.policy.authorize(&context)?;

    let Path(id) = id.map_err(|rejection| CatalogError::InvalidRequest(rejection.body_text()))?;
    state.store.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
