use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::cart::CartItemNew,
    models::cart::{Cart, CartItem, CartLine},
};

pub async fn get_cart_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<Cart>> {
    sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_cart_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    cart_id: Uuid,
) -> Res<Cart> {
    sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE id = $1")
        .bind(cart_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_cart<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Cart> {
    sqlx::query_as::<_, Cart>("INSERT INTO carts (user_id) VALUES ($1) RETURNING *")
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

/// Cart lines joined with the owning product's current price and stock.
pub async fn get_cart_lines<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    cart_id: Uuid,
) -> Res<Vec<CartLine>> {
    sqlx::query_as::<_, CartLine>(
        r#"
        SELECT ci.id, ci.product_id, ci.quantity, p.price, p.stock, p.name
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.cart_id = $1
        "#,
    )
    .bind(cart_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_item_by_product<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    cart_id: Uuid,
    product_id: Uuid,
) -> Res<Option<CartItem>> {
    sqlx::query_as::<_, CartItem>(
        "SELECT * FROM cart_items WHERE cart_id = $1 AND product_id = $2",
    )
    .bind(cart_id)
    .bind(product_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_item<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    cart_id: Uuid,
    item_id: Uuid,
) -> Res<Option<CartItem>> {
    sqlx::query_as::<_, CartItem>("SELECT * FROM cart_items WHERE cart_id = $1 AND id = $2")
        .bind(cart_id)
        .bind(item_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_item<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: CartItemNew,
) -> Res<CartItem> {
    sqlx::query_as::<_, CartItem>(
        "INSERT INTO cart_items (cart_id, product_id, quantity) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(data.cart_id)
    .bind(data.product_id)
    .bind(data.quantity)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Adds to the existing quantity of a line (merge on re-add).
pub async fn add_item_quantity<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    item_id: Uuid,
    quantity: i32,
) -> Res<()> {
    sqlx::query("UPDATE cart_items SET quantity = quantity + $2 WHERE id = $1")
        .bind(item_id)
        .bind(quantity)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn set_item_quantity<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    item_id: Uuid,
    quantity: i32,
) -> Res<()> {
    sqlx::query("UPDATE cart_items SET quantity = $2 WHERE id = $1")
        .bind(item_id)
        .bind(quantity)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn delete_item<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    item_id: Uuid,
) -> Res<()> {
    sqlx::query("DELETE FROM cart_items WHERE id = $1")
        .bind(item_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn clear_items<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    cart_id: Uuid,
) -> Res<()> {
    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
        .bind(cart_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Removes every cart line referencing a product (product deletion
/// cleanup). Returns the carts that lost lines so their totals can be
/// recomputed.
pub async fn delete_items_by_product<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    product_id: Uuid,
) -> Res<Vec<Uuid>> {
    sqlx::query_scalar::<_, Uuid>(
        "DELETE FROM cart_items WHERE product_id = $1 RETURNING cart_id",
    )
    .bind(product_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Derived total: Σ(product price × quantity) over the cart's lines.
pub async fn compute_total<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    cart_id: Uuid,
) -> Res<f64> {
    sqlx::query_scalar::<_, f64>(
        r#"
        SELECT COALESCE(SUM(p.price * ci.quantity), 0)
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.cart_id = $1
        "#,
    )
    .bind(cart_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn set_total_price<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    cart_id: Uuid,
    total_price: f64,
) -> Res<()> {
    sqlx::query("UPDATE carts SET total_price = $2, updated_at = now() WHERE id = $1")
        .bind(cart_id)
        .bind(total_price)
        .execute(executor)
        .await?;
    Ok(())
}
