use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use common::error::{AppError, Res};
use db::{
    dtos::product::{ProductCreateRequest, ProductFilter, ProductUpdate},
    models::product::Product,
};

use crate::dtos::catalog::{CreateProductRequest, UpdateProductRequest};

pub async fn list_products(pool: &PgPool, filter: ProductFilter) -> Res<Vec<Product>> {
    let products = db::product::get_products_by_filter(pool, filter).await?;
    if products.is_empty() {
        return Err(AppError::NotFound("No products found".to_string()));
    }
    Ok(products)
}

pub async fn get_product(pool: &PgPool, product_id: Uuid) -> Res<Product> {
    db::product::get_product_by_id(pool, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

fn validate_rating(rating: f64) -> Res<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 0 and 5".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_product(pool: &PgPool, request: CreateProductRequest) -> Res<Product> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("Product name is required".to_string()));
    }
    if request.price < 0.0 {
        return Err(AppError::BadRequest("Price can not be negative".to_string()));
    }
    if request.stock < 0 {
        return Err(AppError::BadRequest("Stock can not be negative".to_string()));
    }
    validate_rating(request.rating)?;

    if !db::category::exists_category(pool, request.category_id).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    db::product::insert_product(
        pool,
        ProductCreateRequest {
            name: request.name,
            description: request.description,
            price: request.price,
            category_id: request.category_id,
            stock: request.stock,
            images: request.images,
            rating: request.rating,
            is_hot_deal: request.is_hot_deal,
            is_featured: request.is_featured,
        },
    )
    .await
}

pub async fn update_product(
    pool: &PgPool,
    product_id: Uuid,
    request: UpdateProductRequest,
) -> Res<Product> {
    if db::product::get_product_by_id(pool, product_id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    if let Some(price) = request.price {
        if price < 0.0 {
            return Err(AppError::BadRequest("Price can not be negative".to_string()));
        }
    }
    if let Some(rating) = request.rating {
        validate_rating(rating)?;
    }
    if let Some(category_id) = request.category_id {
        if !db::category::exists_category(pool, category_id).await? {
            return Err(AppError::NotFound("Category not found".to_string()));
        }
    }

    db::product::update_product(
        pool,
        product_id,
        ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            category_id: request.category_id,
            stock: request.stock,
            images: request.images,
            rating: request.rating,
            is_hot_deal: request.is_hot_deal,
            is_featured: request.is_featured,
        },
    )
    .await
}

/// Deletes a product and every cart line referencing it, then recomputes
/// the totals of the carts that were touched. Runs in one transaction so
/// a failure leaves carts consistent.
pub async fn remove_product(pool: &PgPool, product_id: Uuid) -> Res<()> {
    if db::product::get_product_by_id(pool, product_id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    let mut tx = pool.begin().await?;

    let affected_carts = db::cart::delete_items_by_product(&mut *tx, product_id).await?;
    db::product::delete_product(&mut *tx, product_id).await?;

    for cart_id in affected_carts.into_iter().collect::<HashSet<_>>() {
        let total = db::cart::compute_total(&mut *tx, cart_id).await?;
        db::cart::set_total_price(&mut *tx, cart_id, total).await?;
    }

    tx.commit().await?;
    Ok(())
}
