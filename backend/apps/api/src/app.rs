//! Route Assembly
//!
//! Everything under `/api/v1`, plus `/health` and the JSON 404 fallback.
//! Transport layers (CORS, tracing) are added in `main`.

use auth::AuthConfig;
use auth::domain::repository::{PasswordResetRepository, UserRepository};
use auth::router::{auth_router_generic, users_router_generic};
use axum::{Json, Router, routing::get};
use catalog::domain::repository::ProductRepository;
use catalog::products_router_generic;
use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}

pub fn app_router<U, P>(users: U, products: P, config: AuthConfig) -> Router
where
    U: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let api = Router::new()
        .nest("/auth", auth_router_generic(users.clone(), config.clone()))
        .nest("/users", users_router_generic(users.clone(), config.clone()))
        .nest(
            "/products",
            products_router_generic(products, users, config),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .fallback(route_not_found)
}
