/*
 * Responsibility
 * - signup / login のオーケストレーション
 * - パスワードは argon2 でハッシュ、平文は保存も返却もしない
 * - login 成功時に TokenCodec で JWT を発行 (subject = userName)
 */
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use tracing::{error, warn};

use crate::api::v1::dto::auth::{LoginRequest, SignUpRequest};
use crate::error::AppError;
use crate::repos::user_repo;
use crate::services::token::TokenCodec;

const DEFAULT_ROLE: &str = "USER";

/// Register a new user with the default role.
///
/// Uniqueness checks are surfaced per field so the client can tell which
/// input to fix.
pub async fn signup(db: &PgPool, req: &SignUpRequest) -> Result<&'static str, AppError> {
    if user_repo::exists_by_email(db, &req.email).await? {
        return Err(AppError::duplicate("email", &req.email));
    }
    if user_repo::exists_by_user_name(db, &req.user_name).await? {
        return Err(AppError::duplicate("userName", &req.user_name));
    }

    let hash = hash_password(&req.password)?;
    user_repo::create(db, &req.user_name, &req.email, &hash, DEFAULT_ROLE).await?;

    Ok("User created successfully")
}

/// Authenticate by user name or email and return a fresh token.
///
/// Unknown identifier and wrong password are deliberately indistinguishable
/// to the caller.
pub async fn login(
    db: &PgPool,
    tokens: &TokenCodec,
    req: &LoginRequest,
) -> Result<String, AppError> {
    let user = user_repo::find_by_user_name_or_email(db, &req.user_name_or_email)
        .await?
        .ok_or_else(|| {
            warn!(ident = %req.user_name_or_email, "login for unknown user");
            AppError::Unauthenticated
        })?;

    if !verify_password(&req.password, &user.password)? {
        warn!(user = %user.user_name, "login with wrong password");
        return Err(AppError::Unauthenticated);
    }

    tokens.issue(&user.user_name)
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!(error = %e, "failed to hash password");
            AppError::Internal
        })
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored password hash is unparsable");
        AppError::Internal
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_the_plain_password_and_verifies() {
        let hash = hash_password("Passw0rd").unwrap();
        assert_ne!(hash, "Passw0rd");
        assert!(verify_password("Passw0rd", &hash).unwrap());
        assert!(!verify_password("passw0rd", &hash).unwrap());
    }
}
