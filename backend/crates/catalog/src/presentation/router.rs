//! Catalog Router

use auth::domain::repository::UserRepository;
use auth::middleware::{AuthGate, RequiredRoles};
use auth::{AuthConfig, PgAuthRepository};
use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::domain::repository::ProductRepository;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the products router with PostgreSQL repositories
pub fn products_router(
    products: PgCatalogRepository,
    users: PgAuthRepository,
    config: AuthConfig,
) -> Router {
    products_router_generic(products, users, config)
}

/// Create a generic products router
///
/// Reads are public; writes go through the admin gate backed by `users`.
/// Mounted under `/products`.
pub fn products_router_generic<P, U>(products: P, users: U, config: AuthConfig) -> Router
where
    P: ProductRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(products),
    };
    let gate = AuthGate::new(Arc::new(users), Arc::new(config));

    let public = Router::new()
        .route("/", get(handlers::list_products::<P>))
        .route("/{uuid}", get(handlers::get_product::<P>));

    let admin = gate.guard(
        Router::new()
            .route("/", post(handlers::create_product::<P>))
            .route(
                "/{uuid}",
                patch(handlers::update_product::<P>).delete(handlers::delete_product::<P>),
            ),
        RequiredRoles::ADMIN,
    );

    public.merge(admin).with_state(state)
}
