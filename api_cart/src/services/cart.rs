use sqlx::PgPool;
use uuid::Uuid;

use common::error::{AppError, Res};
use db::{dtos::cart::CartItemNew, models::cart::Cart};

use crate::dtos::cart::CartView;

fn cart_not_found() -> AppError {
    AppError::NotFound("Cart not found".to_string())
}

fn validate_quantity(quantity: i32) -> Res<()> {
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

async fn require_cart(pool: &PgPool, user_id: Uuid) -> Res<Cart> {
    db::cart::get_cart_by_user(pool, user_id)
        .await?
        .ok_or_else(cart_not_found)
}

async fn view_of(pool: &PgPool, cart_id: Uuid) -> Res<CartView> {
    let cart = db::cart::get_cart_by_id(pool, cart_id).await?;
    let items = db::cart::get_cart_lines(pool, cart_id).await?;
    Ok(CartView { cart, items })
}

/// Adds a product to the user's cart, creating the cart on first use.
/// Re-adding a product merges into the existing line's quantity.
pub async fn add_item(
    pool: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> Res<CartView> {
    validate_quantity(quantity)?;

    if db::product::get_product_by_id(pool, product_id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    let cart = match db::cart::get_cart_by_user(pool, user_id).await? {
        Some(cart) => cart,
        None => db::cart::insert_cart(pool, user_id).await?,
    };

    let mut tx = pool.begin().await?;

    match db::cart::get_item_by_product(&mut *tx, cart.id, product_id).await? {
        Some(item) => db::cart::add_item_quantity(&mut *tx, item.id, quantity).await?,
        None => {
            db::cart::insert_item(
                &mut *tx,
                CartItemNew {
                    cart_id: cart.id,
                    product_id,
                    quantity,
                },
            )
            .await?;
        }
    }

    let total = db::cart::compute_total(&mut *tx, cart.id).await?;
    db::cart::set_total_price(&mut *tx, cart.id, total).await?;

    tx.commit().await?;

    view_of(pool, cart.id).await
}

pub async fn get_cart(pool: &PgPool, user_id: Uuid) -> Res<CartView> {
    let cart = require_cart(pool, user_id).await?;
    view_of(pool, cart.id).await
}

pub async fn update_item(
    pool: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
    quantity: i32,
) -> Res<CartView> {
    validate_quantity(quantity)?;
    let cart = require_cart(pool, user_id).await?;

    let mut tx = pool.begin().await?;

    let item = db::cart::get_item(&mut *tx, cart.id, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found in cart".to_string()))?;

    db::cart::set_item_quantity(&mut *tx, item.id, quantity).await?;

    let total = db::cart::compute_total(&mut *tx, cart.id).await?;
    db::cart::set_total_price(&mut *tx, cart.id, total).await?;

    tx.commit().await?;

    view_of(pool, cart.id).await
}

pub async fn remove_item(pool: &PgPool, user_id: Uuid, item_id: Uuid) -> Res<CartView> {
    let cart = require_cart(pool, user_id).await?;

    let mut tx = pool.begin().await?;

    let item = db::cart::get_item(&mut *tx, cart.id, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found in cart".to_string()))?;

    db::cart::delete_item(&mut *tx, item.id).await?;

    let total = db::cart::compute_total(&mut *tx, cart.id).await?;
    db::cart::set_total_price(&mut *tx, cart.id, total).await?;

    tx.commit().await?;

    view_of(pool, cart.id).await
}

pub async fn clear_cart(pool: &PgPool, user_id: Uuid) -> Res<()> {
    let cart = require_cart(pool, user_id).await?;

    let mut tx = pool.begin().await?;
    db::cart::clear_items(&mut *tx, cart.id).await?;
    db::cart::set_total_price(&mut *tx, cart.id, 0.0).await?;
    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1).is_ok());
    }
}
