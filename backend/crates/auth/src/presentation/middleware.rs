//! Auth Middleware
//!
//! `require_auth` resolves the bearer token to a stored user and attaches an
//! [`AuthUser`]; `require_role` then gates on that user's role. Apply both
//! with [`AuthGate::guard`].

use axum::Router;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::{self, Next};
use axum::response::Response;
use std::sync::Arc;

use crate::application::AuthenticateUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::{UserId, UserPublicId},
    user_role::UserRole,
};
use crate::error::AuthError;

/// Authenticated identity attached to request extensions
///
/// Taken from the stored user, not from the token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub public_id: UserPublicId,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            public_id: user.public_id,
            email: user.email.as_str().to_string(),
            role: user.role,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingAuth)
    }
}

/// Roles allowed past [`require_role`]; empty means any authenticated user
#[derive(Debug, Clone, Copy)]
pub struct RequiredRoles(&'static [UserRole]);

impl RequiredRoles {
    pub const ANY: Self = Self(&[]);
    pub const ADMIN: Self = Self(&[UserRole::Admin]);

    pub const fn new(roles: &'static [UserRole]) -> Self {
        Self(roles)
    }

    pub fn allows(&self, role: UserRole) -> bool {
        self.0.is_empty() || self.0.contains(&role)
    }
}

/// Middleware state for the authentication step
#[derive(Clone)]
pub struct AuthGate<U>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<U>,
    pub config: Arc<AuthConfig>,
}

impl<U> AuthGate<U>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Put every route of `router` behind authentication and `roles`
    ///
    /// Layers apply only to routes already added to `router`.
    pub fn guard<S>(&self, router: Router<S>, roles: RequiredRoles) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router
            .route_layer(middleware::from_fn_with_state(roles, require_role))
            .route_layer(middleware::from_fn_with_state(
                self.clone(),
                require_auth::<U>,
            ))
    }
}

/// `Authorization: Bearer <token>`, scheme matched case-insensitively
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Middleware that requires a valid bearer token for an existing user
pub async fn require_auth<U>(
    State(gate): State<AuthGate<U>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(req.headers()).ok_or(AuthError::MissingAuth)?;

    let use_case = AuthenticateUseCase::new(gate.repo.clone(), gate.config.clone());
    let user = use_case.execute(&token).await?;

    req.extensions_mut().insert(AuthUser::from(&user));

    Ok(next.run(req).await)
}

/// Middleware that requires the attached identity to hold an allowed role
pub async fn require_role(
    State(roles): State<RequiredRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or(AuthError::MissingAuth)?;

    if !roles.allows(auth_user.role) {
        tracing::debug!(
            public_id = %auth_user.public_id,
            role = %auth_user.role,
            "Role not permitted"
        );
        return Err(AuthError::Forbidden);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc".to_string()));
        assert_eq!(bearer_token(&headers("bearer  abc ")), Some("abc".to_string()));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_required_roles() {
        assert!(RequiredRoles::ANY.allows(UserRole::User));
        assert!(RequiredRoles::ANY.allows(UserRole::Admin));
        assert!(RequiredRoles::ADMIN.allows(UserRole::Admin));
        assert!(!RequiredRoles::ADMIN.allows(UserRole::User));
    }
}
