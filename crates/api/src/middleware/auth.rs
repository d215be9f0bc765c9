//! # Authentication Module
//!
//! Admin routes are guarded by a single operator token. Only its Argon2
//! hash is configured (`ADMIN_TOKEN_HASH`); requests present the plain token
//! as `Authorization: Bearer <token>`.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use eyre::{eyre, Result};
use nailbook_core::errors::BookingError;
use tracing::warn;

use crate::{middleware::error_handling::AppError, ApiState};

/// Hashes a token with Argon2 and a fresh random salt.
///
/// Returns the PHC string that goes into `ADMIN_TOKEN_HASH`.
pub fn hash_token(token: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(token.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing token: {}", e))?
        .to_string();

    Ok(hash)
}

/// Checks `token` against a PHC hash string. A malformed hash is an error,
/// a wrong token is `Ok(false)`.
pub fn verify_token(token: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| eyre!("Invalid admin token hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(token.as_bytes(), &parsed)
        .is_ok())
}

/// Extractor that only succeeds for requests carrying the operator token.
#[derive(Debug, Clone, Copy)]
pub struct AdminToken;

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(hash) = state.admin_token_hash.as_deref() else {
            return Err(AppError(BookingError::Authorization(
                "Admin access is not configured".to_string(),
            )));
        };

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError(BookingError::Authentication(
                    "Missing bearer token".to_string(),
                ))
            })?;

        if !verify_token(token, hash)? {
            warn!("Rejected admin request to {}", parts.uri.path());
            return Err(AppError(BookingError::Authentication(
                "Invalid admin token".to_string(),
            )));
        }

        Ok(AdminToken)
    }
}
