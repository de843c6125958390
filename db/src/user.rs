use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::user::{ProfileUpdate, UserCreateRequest},
    models::user::User,
};

pub async fn exists_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_refresh_token<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    refresh_token: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE refresh_token = $1")
        .bind(refresh_token)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserCreateRequest,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (first_name, last_name, email, password_hash, otp_hash, otp_expires_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.password_hash)
    .bind(&data.otp_hash)
    .bind(data.otp_expires_at)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Marks the user verified and clears the stored passcode fields.
pub async fn mark_user_verified<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET verified = TRUE, otp_hash = NULL, otp_expires_at = NULL, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Stores the current refresh token, or clears it when `None` (logout).
pub async fn set_refresh_token<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    refresh_token: Option<&str>,
) -> Res<()> {
    sqlx::query("UPDATE users SET refresh_token = $2, updated_at = now() WHERE id = $1")
        .bind(user_id)
        .bind(refresh_token)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn update_profile<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            pincode = COALESCE($4, pincode),
            state = COALESCE($5, state),
            city = COALESCE($6, city),
            gender = COALESCE($7, gender),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.pincode)
    .bind(&update.state)
    .bind(&update.city)
    .bind(&update.gender)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
