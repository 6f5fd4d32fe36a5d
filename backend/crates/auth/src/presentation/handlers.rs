//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::http::AppJson;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ForgotPasswordUseCase, LoginUseCase, ProfileUseCase, RegisterUseCase, ResetPasswordUseCase,
    UserAdminUseCase,
};
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, CreateUserRequest, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest,
    MessageResponse, RegisterRequest, ResetPasswordRequest, UpdateUserRequest, UserResponse,
    user_public_id,
};
use crate::presentation::middleware::AuthUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register / Login / Me
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let input = req.validate()?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserResponse::from(&output.user),
            token: output.token,
        }),
    ))
}

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let input = req.validate()?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(input).await?;

    Ok(Json(AuthResponse {
        user: UserResponse::from(&output.user),
        token: output.token,
    }))
}

/// GET /auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    auth_user: AuthUser,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case.execute(&auth_user.public_id).await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Forgot / Reset Password
// ============================================================================

/// POST /auth/forgot-password
pub async fn forgot_password<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> AuthResult<Json<ForgotPasswordResponse>>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let email = req.validate()?;

    let use_case =
        ForgotPasswordUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case.execute(email).await?;

    Ok(Json(output.into()))
}

/// POST /auth/reset-password
pub async fn reset_password<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let input = req.validate()?;

    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.config.clone());
    let message = use_case.execute(input).await?;

    Ok(Json(MessageResponse { message }))
}

// ============================================================================
// User administration (admin only)
// ============================================================================

/// GET /users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let use_case = UserAdminUseCase::new(state.repo.clone(), state.config.clone());
    let users = use_case.list().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /users/{uuid}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(uuid): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let public_id = user_public_id(&uuid)?;

    let use_case = UserAdminUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.get(&public_id).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /users
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let input = req.validate()?;

    let use_case = UserAdminUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.create(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// PATCH /users/{uuid}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(uuid): Path<String>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let public_id = user_public_id(&uuid)?;
    let input = req.validate()?;

    let use_case = UserAdminUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.update(&public_id, input).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{uuid}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(uuid): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + PasswordResetRepository + Clone + Send + Sync + 'static,
{
    let public_id = user_public_id(&uuid)?;

    let use_case = UserAdminUseCase::new(state.repo.clone(), state.config.clone());
    use_case.delete(&public_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
