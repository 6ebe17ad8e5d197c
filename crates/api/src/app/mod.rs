//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: order/product stores and access controller wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use orderdesk_infra::{InMemoryOrderStore, InMemoryProductStore};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router backed by fresh in-memory stores.
pub fn build_app(jwt_secret: String) -> Router {
    build_app_with_services(services::build_services(
        jwt_secret,
        Arc::new(InMemoryOrderStore::new()),
        Arc::new(InMemoryProductStore::new()),
    ))
}

/// Build the router around already wired services.
pub fn build_app_with_services(services: services::AppServices) -> Router {
    let auth_state = middleware::AuthState {
        access: services.access.clone(),
    };

    let services = Arc::new(services);

    // Public catalog listing.
    let public = Router::new()
        .route("/products", get(routes::products::list_products))
        .layer(Extension(services.clone()));

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(public)
        .merge(protected)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)))
}
