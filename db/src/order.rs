use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::order::{OrderCreateRequest, OrderItemSnapshot},
    models::order::{Order, OrderItem},
};

pub async fn insert_order<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: OrderCreateRequest,
) -> Res<Order> {
    sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (user_id, total_amount, payment_method, street, city, state, pin_code, phone_number)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.total_amount)
    .bind(&data.payment_method)
    .bind(&data.address.street)
    .bind(&data.address.city)
    .bind(&data.address.state)
    .bind(&data.address.pin_code)
    .bind(&data.address.phone_number)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_order_item<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
    item: OrderItemSnapshot,
) -> Res<OrderItem> {
    sqlx::query_as::<_, OrderItem>(
        r#"
        INSERT INTO order_items (order_id, product_id, quantity, price, total)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(order_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .bind(item.price)
    .bind(item.total)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Reads an order with a row lock, serializing concurrent cancel/delete
/// against the same order until the transaction ends.
pub async fn get_order_for_update<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
) -> Res<Option<Order>> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(order_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_order_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
) -> Res<Option<Order>> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_order_items<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
) -> Res<Vec<OrderItem>> {
    sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1")
        .bind(order_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_all_orders<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<Order>> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_orders_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Order>> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn update_order_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
    status: &str,
) -> Res<Option<Order>> {
    sqlx::query_as::<_, Order>(
        "UPDATE orders SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(order_id)
    .bind(status)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Flips a pending order to canceled. Returns `false` when the order was
/// no longer pending (or missing) and nothing changed, so a concurrent
/// cancel cannot restore stock twice.
pub async fn cancel_order_if_pending<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query(
        r#"
        UPDATE orders
        SET status = 'canceled', updated_at = now()
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(order_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn delete_order<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    order_id: Uuid,
) -> Res<()> {
    sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(order_id)
        .execute(executor)
        .await?;
    Ok(())
}
