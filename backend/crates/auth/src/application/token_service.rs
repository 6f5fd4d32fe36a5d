//! Token Service
//!
//! Stateless HS256 session tokens. A token carries the user's surrogate id
//! (`sub`), public id, email and role, and stays valid until `exp`; there is no
//! revocation list.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::{
    user_id::{UserId, UserPublicId},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Surrogate user id, as a decimal string
    pub sub: String,
    /// Public user id
    pub uuid: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity recovered from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: UserId,
    pub public_id: UserPublicId,
    pub email: String,
    pub role: UserRole,
}

/// A user together with a freshly issued token
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub user: User,
    pub token: String,
}

/// Issues and verifies session tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            ttl_secs: config.jwt_ttl_secs(),
        }
    }

    /// Issue a token for `user`, expiring `jwt_ttl` from now
    pub fn issue(&self, user: &User) -> AuthResult<String> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.get().to_string(),
            uuid: user.public_id.to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.code().to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };
        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &Claims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))
    }

    /// Verify signature, expiry and claim shape
    ///
    /// Every failure collapses to [`AuthError::InvalidToken`].
    pub fn verify(&self, token: &str) -> AuthResult<TokenIdentity> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;
        let claims = data.claims;

        let user_id = claims
            .sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| AuthError::InvalidToken)?;
        let public_id =
            UserPublicId::parse_str(&claims.uuid).map_err(|_| AuthError::InvalidToken)?;
        let role = UserRole::from_code(&claims.role).ok_or(AuthError::InvalidToken)?;
        if claims.email.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        Ok(TokenIdentity {
            user_id,
            public_id,
            email: claims.email,
            role,
        })
    }
}
