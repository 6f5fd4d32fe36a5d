//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGate, RequiredRoles};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create the admin user-management router with PostgreSQL repository
pub fn users_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    users_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
///
/// Mounted under `/auth`.
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };
    let gate = AuthGate::new(state.repo.clone(), state.config.clone());

    let public = Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/forgot-password", post(handlers::forgot_password::<R>))
        .route("/reset-password", post(handlers::reset_password::<R>));

    let authenticated = gate.guard(
        Router::new().route("/me", get(handlers::me::<R>)),
        RequiredRoles::ANY,
    );

    public.merge(authenticated).with_state(state)
}

/// Create a generic user-management router; every route is admin only
///
/// Mounted under `/users`.
pub fn users_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };
    let gate = AuthGate::new(state.repo.clone(), state.config.clone());

    let routes = Router::new()
        .route(
            "/",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/{uuid}",
            get(handlers::get_user::<R>)
                .patch(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        );

    gate.guard(routes, RequiredRoles::ADMIN).with_state(state)
}
