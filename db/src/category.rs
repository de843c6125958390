use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::category::{CategoryCreateRequest, CategoryUpdate},
    models::category::Category,
};

pub async fn get_all_categories<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<Category>> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY created_at")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_category_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    category_id: Uuid,
) -> Res<Option<Category>> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(category_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn exists_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    category_id: Uuid,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
        .bind(category_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: CategoryCreateRequest,
) -> Res<Category> {
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING *",
    )
    .bind(&data.name)
    .bind(&data.description)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    category_id: Uuid,
    update: CategoryUpdate,
) -> Res<Category> {
    sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
        SET name = COALESCE($2, name),
            description = COALESCE($3, description),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(category_id)
    .bind(&update.name)
    .bind(&update.description)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    category_id: Uuid,
) -> Res<()> {
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(category_id)
        .execute(executor)
        .await?;
    Ok(())
}
