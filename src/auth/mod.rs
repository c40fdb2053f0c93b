use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::AppState;

/// Claim structure for JWT tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// Authenticated caller extracted from the bearer token.
///
/// Authentication is an opaque precondition here: a request either carries a
/// valid token or it does not. No roles or permissions are modeled.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Handles token issuance and validation
#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_secret: String,
    token_expiration_secs: usize,
}

impl AuthService {
    pub fn new(jwt_secret: impl Into<String>, token_expiration_secs: usize) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_expiration_secs,
        }
    }

    /// Issues a signed token for the given subject
    pub fn issue_token(&self, subject: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + ChronoDuration::seconds(self.token_expiration_secs as i64);

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::InternalError(format!("Failed to create token: {}", e)))
    }

    /// Validates a token and extracts the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| ServiceError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let auth_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ServiceError::Unauthorized("Missing Authorization header".into()))?;

        if !auth_value.starts_with("Bearer ") {
            return Err(ServiceError::Unauthorized(
                "Authorization header must be a bearer token".into(),
            ));
        }
        let token = auth_value.trim_start_matches("Bearer ").trim();

        let claims = state.auth.verify_token(token)?;
        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
