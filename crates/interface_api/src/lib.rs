//! HTTP API Layer
//!
//! This crate provides the REST API for medical-legal case reports using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for cases, sections, and health
//! - **Middleware**: Authentication and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent JSON error responses
//!
//! Handlers only talk to storage through `Arc<dyn CasePort>`, so the same
//! router runs against PostgreSQL in production and an in-memory store in
//! tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(Arc::new(PostgresCaseAdapter::new(pool)), config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_case::CasePort;
use interface_report::{ExportError, ReportRenderer};

use crate::config::ApiConfig;
use crate::handlers::{cases, health, sections};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cases: Arc<dyn CasePort>,
    pub renderer: Arc<ReportRenderer>,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the state, parsing the report template once
    pub fn new(cases: Arc<dyn CasePort>, config: ApiConfig) -> Result<Self, ExportError> {
        Ok(Self {
            cases,
            renderer: Arc::new(ReportRenderer::new()?),
            config,
        })
    }
}

/// Creates the main API router
///
/// `/health` and `/health/ready` are public; everything under `/api/v1`
/// requires a bearer token.
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let case_routes = Router::new()
        .route("/", get(cases::list_cases).post(cases::create_case))
        .route("/:id", get(cases::get_case).delete(cases::delete_case))
        .route(
            "/:id/sections/:section",
            get(sections::get_section).put(sections::save_section),
        )
        .route("/:id/status", put(cases::update_status))
        .route("/:id/completion", post(cases::recompute_completion))
        .route("/:id/progress", get(cases::get_progress))
        .route("/:id/suggestions", get(cases::get_suggestions))
        .route("/:id/report", get(cases::get_report));

    // Protected API routes
    let api_routes = Router::new()
        .route("/sections", get(sections::list_sections))
        .nest("/cases", case_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
