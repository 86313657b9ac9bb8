//! HTTP API Layer
//!
//! REST surface for the fund registry, built on Axum.
//!
//! # Routes
//!
//! - `POST /api/fundo/create`: dedicated create endpoint
//! - `GET|POST /api/fundos`: list and create
//! - `GET|PUT|PATCH|DELETE /api/fundos/:id`: single record
//! - `GET /health`, `GET /health/ready`: liveness and readiness
//!
//! A trailing slash is accepted on every route.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_app;
//!
//! let app = create_app(port, config);
//! axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use domain_fund::{FundPort, FundService, FundValidator};

use crate::config::ApiConfig;
use crate::handlers::{fund, health};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub funds: FundService,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the state around a record store
    pub fn new(port: Arc<dyn FundPort>, config: ApiConfig) -> Self {
        let validator = FundValidator::new().strict_tax_id(config.strict_tax_id);
        Self {
            funds: FundService::new(port, validator),
            config,
        }
    }
}

/// Creates the API router
///
/// Paths are matched exactly; use [`create_app`] to also accept trailing
/// slashes.
pub fn create_router(port: Arc<dyn FundPort>, config: ApiConfig) -> Router {
    let cors_permissive = config.cors_permissive;
    let state = AppState::new(port, config);

    // Health checks (not audited)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Fund routes, both the dedicated create and the resource set
    let api_routes = Router::new()
        .route("/fundo/create", post(fund::create_fundo))
        .route("/fundos", get(fund::list_funds).post(fund::create_fund))
        .route(
            "/fundos/:id",
            get(fund::get_fund)
                .put(fund::update_fund)
                .patch(fund::patch_fund)
                .delete(fund::delete_fund),
        )
        .layer(axum_middleware::from_fn(audit_middleware));

    // Combine all routes
    let router = Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http());

    // Browser clients on another origin
    let router = if cors_permissive {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}

/// Creates the served application: the router with trailing slashes trimmed
pub fn create_app(port: Arc<dyn FundPort>, config: ApiConfig) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(port, config))
}
