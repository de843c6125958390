use chrono::{Duration, Utc};
use sqlx::PgPool;

use common::{
    env_config::Config,
    error::{AppError, Res},
    jwt::{self, ClaimsSpec, TokenPair},
};
use db::{dtos::user::UserCreateRequest, models::user::User};
use mailer::Mailer;

use crate::{dtos::auth::RegisterRequest, services::auth};

fn claims_for(user: &User) -> ClaimsSpec {
    ClaimsSpec {
        user_id: user.id,
        email: user.email.clone(),
        role: user.role.clone(),
    }
}

/// Emails are stored and looked up in one canonical form so case
/// variants of the same address cannot register twice or miss on login.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Creates an unverified account and emails a one-time passcode. Only the
/// hash of the passcode is persisted.
pub async fn register_user(
    pool: &PgPool,
    mailer: &Mailer,
    config: &Config,
    request: RegisterRequest,
) -> Res<User> {
    let email = normalize_email(&request.email);

    if request.first_name.trim().is_empty() || email.is_empty() || request.password.trim().is_empty()
    {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    if db::user::exists_user_by_email(pool, &email).await? {
        return Err(AppError::BadRequest("User already registered".to_string()));
    }

    let otp = auth::generate_otp();
    let otp_expires_at =
        Utc::now().naive_utc() + Duration::seconds(config.otp_expires_seconds);

    let user = db::user::insert_user(
        pool,
        UserCreateRequest {
            first_name: request.first_name,
            last_name: request.last_name,
            email,
            password_hash: auth::hash_password(&request.password)?,
            otp_hash: auth::hash_otp(&otp)?,
            otp_expires_at,
        },
    )
    .await?;

    mailer
        .send_otp(&user.email, &otp, config.otp_expires_seconds / 60)
        .await?;

    Ok(user)
}

pub async fn verify_otp(pool: &PgPool, email: &str, otp: &str) -> Res<()> {
    let user = db::user::get_user_by_email(pool, &normalize_email(email))
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid Credentials".to_string()))?;

    let invalid = || AppError::BadRequest("Invalid or expired OTP".to_string());

    let otp_hash = user.otp_hash.as_deref().ok_or_else(invalid)?;
    let expires_at = user.otp_expires_at.ok_or_else(invalid)?;

    if Utc::now().naive_utc() > expires_at || !auth::verify_otp(otp, otp_hash) {
        return Err(invalid());
    }

    db::user::mark_user_verified(pool, user.id).await
}

/// Checks credentials and issues a fresh token pair. The refresh token is
/// persisted so it can be invalidated on logout and rotated on refresh.
pub async fn login(
    pool: &PgPool,
    config: &Config,
    email: &str,
    password: &str,
) -> Res<(User, TokenPair)> {
    let user = db::user::get_user_by_email(pool, &normalize_email(email))
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid Credentials".to_string()))?;

    if !auth::verify_password(password, &user.password_hash) {
        return Err(AppError::Unauthorized("Invalid Credentials".to_string()));
    }

    if !user.verified {
        return Err(AppError::Forbidden("Email not verified".to_string()));
    }

    let pair = jwt::generate_token_pair(&claims_for(&user), &config.token_config)?;
    db::user::set_refresh_token(pool, user.id, Some(&pair.refresh_token)).await?;

    Ok((user, pair))
}

/// Rotates the token pair. The presented refresh token must both decode
/// and match the one stored on the user record.
pub async fn refresh_tokens(pool: &PgPool, config: &Config, token: &str) -> Res<TokenPair> {
    let claims = jwt::validate_token(token, &config.token_config.refresh_secret)
        .map_err(|_| AppError::Forbidden("Invalid refresh token".to_string()))?;

    let user = db::user::get_user_by_id(pool, claims.user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("Invalid refresh token".to_string()))?;

    if user.refresh_token.as_deref() != Some(token) {
        return Err(AppError::Unauthorized(
            "Invalid or expired refresh token".to_string(),
        ));
    }

    let pair = jwt::generate_token_pair(&claims_for(&user), &config.token_config)?;
    db::user::set_refresh_token(pool, user.id, Some(&pair.refresh_token)).await?;

    Ok(pair)
}

/// Idempotent: an unknown or already-cleared token is treated as a
/// successful logout rather than an error.
pub async fn logout(pool: &PgPool, token: &str) -> Res<()> {
    if let Some(user) = db::user::get_user_by_refresh_token(pool, token).await? {
        db::user::set_refresh_token(pool, user.id, None).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_normalize_to_one_canonical_form() {
        assert_eq!(normalize_email(" Foo@X.com "), "foo@x.com");
        assert_eq!(normalize_email("FOO@x.COM"), normalize_email("foo@x.com"));
        assert!(normalize_email("   ").is_empty());
    }
}
