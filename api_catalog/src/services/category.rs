use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use common::error::{AppError, Res};
use db::{
    dtos::category::{CategoryCreateRequest, CategoryUpdate},
    models::category::Category,
};

use crate::dtos::catalog::{CreateCategoryRequest, UpdateCategoryRequest};

pub async fn list_categories(pool: &PgPool) -> Res<Vec<Category>> {
    db::category::get_all_categories(pool).await
}

pub async fn get_category(pool: &PgPool, category_id: Uuid) -> Res<Category> {
    db::category::get_category_by_id(pool, category_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
}

pub async fn create_category(pool: &PgPool, request: CreateCategoryRequest) -> Res<Category> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Category name is required".to_string(),
        ));
    }

    db::category::insert_category(
        pool,
        CategoryCreateRequest {
            name: request.name,
            description: request.description,
        },
    )
    .await
}

pub async fn update_category(
    pool: &PgPool,
    category_id: Uuid,
    request: UpdateCategoryRequest,
) -> Res<Category> {
    if !db::category::exists_category(pool, category_id).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    db::category::update_category(
        pool,
        category_id,
        CategoryUpdate {
            name: request.name,
            description: request.description,
        },
    )
    .await
}

/// Deletes a category together with its products. Cart lines referencing
/// those products are removed and the affected cart totals recomputed,
/// all in one transaction.
pub async fn remove_category(pool: &PgPool, category_id: Uuid) -> Res<()> {
    if !db::category::exists_category(pool, category_id).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    let mut tx = pool.begin().await?;

    let mut affected_carts = HashSet::new();
    for product_id in db::product::get_product_ids_by_category(&mut *tx, category_id).await? {
        affected_carts.extend(db::cart::delete_items_by_product(&mut *tx, product_id).await?);
        db::product::delete_product(&mut *tx, product_id).await?;
    }

    db::category::delete_category(&mut *tx, category_id).await?;

    for cart_id in affected_carts {
        let total = db::cart::compute_total(&mut *tx, cart_id).await?;
        db::cart::set_total_price(&mut *tx, cart_id, total).await?;
    }

    tx.commit().await?;
    Ok(())
}
