use sqlx::PgPool;
use uuid::Uuid;

use common::error::{AppError, Res};
use db::{
    dtos::order::{OrderCreateRequest, OrderItemSnapshot},
    models::{cart::CartLine, order::Order, user::User},
};

use crate::dtos::order::{CreateOrderRequest, OrderView};

/// Order lifecycle states. Only pending orders can be canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "canceled" => Some(OrderStatus::Canceled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
        }
    }

    pub fn can_cancel(&self) -> bool {
        *self == OrderStatus::Pending
    }
}

/// Accepted payment methods; anything else is rejected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cod,
    Card,
    Upi,
}

impl PaymentMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cod" => Some(PaymentMethod::Cod),
            "card" => Some(PaymentMethod::Card),
            "upi" => Some(PaymentMethod::Upi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
        }
    }
}

/// Σ(unit price × quantity) over the cart lines.
pub fn order_total(lines: &[CartLine]) -> f64 {
    lines
        .iter()
        .map(|line| line.price * f64::from(line.quantity))
        .sum()
}

fn order_not_found() -> AppError {
    AppError::NotFound("Order not found.".to_string())
}

async fn view_of(pool: &PgPool, order: Order) -> Res<OrderView> {
    let items = db::order::get_order_items(pool, order.id).await?;
    Ok(OrderView { order, items })
}

/// The owner sees their own orders; admins see everything.
fn require_owner_or_admin(order: &Order, user: &User) -> Res<()> {
    if order.user_id == user.id || user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Access denied".to_string()))
    }
}

/// Places an order from the user's cart in a single transaction. Stock is
/// decremented with a guard so two concurrent checkouts cannot oversell;
/// any failed line aborts the whole order. On success the cart is
/// emptied.
pub async fn create_order(
    pool: &PgPool,
    user: &User,
    request: CreateOrderRequest,
) -> Res<OrderView> {
    let payment_method = PaymentMethod::parse(&request.payment_method)
        .ok_or_else(|| AppError::BadRequest("Invalid payment method".to_string()))?;

    let cart = db::cart::get_cart_by_user(pool, user.id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Cart is empty.".to_string()))?;

    let lines = db::cart::get_cart_lines(pool, cart.id).await?;
    if lines.is_empty() {
        return Err(AppError::BadRequest("Cart is empty.".to_string()));
    }

    let mut tx = pool.begin().await?;

    for line in &lines {
        let decremented =
            db::product::decrement_stock_checked(&mut *tx, line.product_id, line.quantity).await?;
        if !decremented {
            return Err(AppError::BadRequest(format!(
                "Product {} is unavailable or out of stock.",
                line.name
            )));
        }
    }

    let order = db::order::insert_order(
        &mut *tx,
        OrderCreateRequest {
            user_id: user.id,
            payment_method: payment_method.as_str().to_string(),
            address: request.address,
            total_amount: order_total(&lines),
        },
    )
    .await?;

    for line in &lines {
        db::order::insert_order_item(
            &mut *tx,
            order.id,
            OrderItemSnapshot {
                product_id: line.product_id,
                quantity: line.quantity,
                price: line.price,
                total: line.price * f64::from(line.quantity),
            },
        )
        .await?;
    }

    db::cart::clear_items(&mut *tx, cart.id).await?;
    db::cart::set_total_price(&mut *tx, cart.id, 0.0).await?;

    tx.commit().await?;

    view_of(pool, order).await
}

pub async fn get_order(pool: &PgPool, user: &User, order_id: Uuid) -> Res<OrderView> {
    let order = db::order::get_order_by_id(pool, order_id)
        .await?
        .ok_or_else(order_not_found)?;
    require_owner_or_admin(&order, user)?;
    view_of(pool, order).await
}

pub async fn list_all(pool: &PgPool) -> Res<Vec<Order>> {
    db::order::get_all_orders(pool).await
}

pub async fn list_mine(pool: &PgPool, user_id: Uuid) -> Res<Vec<Order>> {
    db::order::get_orders_by_user(pool, user_id).await
}

/// Cancels a pending order and returns its stock to the shelf. The
/// status flip is a guarded update inside the transaction, so two
/// concurrent cancels (or a cancel racing a delete) cannot both restore
/// stock.
pub async fn cancel_order(pool: &PgPool, user: &User, order_id: Uuid) -> Res<OrderView> {
    let order = db::order::get_order_by_id(pool, order_id)
        .await?
        .ok_or_else(order_not_found)?;
    require_owner_or_admin(&order, user)?;

    let status = OrderStatus::parse(&order.status)
        .ok_or_else(|| AppError::Internal(format!("Unknown order status: {}", order.status)))?;
    if !status.can_cancel() {
        return Err(AppError::BadRequest(
            "Order can not be canceled.".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    if !db::order::cancel_order_if_pending(&mut *tx, order.id).await? {
        // Lost the race: someone else canceled or advanced it first.
        return Err(AppError::BadRequest(
            "Order can not be canceled.".to_string(),
        ));
    }

    for item in db::order::get_order_items(&mut *tx, order.id).await? {
        db::product::restore_stock(&mut *tx, item.product_id, item.quantity).await?;
    }

    let order = db::order::get_order_by_id(&mut *tx, order.id)
        .await?
        .ok_or_else(order_not_found)?;

    tx.commit().await?;

    view_of(pool, order).await
}

pub async fn set_status(pool: &PgPool, order_id: Uuid, status: &str) -> Res<Order> {
    let status = OrderStatus::parse(status)
        .ok_or_else(|| AppError::BadRequest("Invalid order status".to_string()))?;

    db::order::update_order_status(pool, order_id, status.as_str())
        .await?
        .ok_or_else(order_not_found)
}

/// Deletes an order outright. Stock is restored unless the order was
/// already canceled, which returned it when the cancel happened. The
/// status is re-read under a row lock so a concurrent cancel cannot
/// slip in between the check and the delete.
pub async fn remove_order(pool: &PgPool, order_id: Uuid) -> Res<()> {
    let mut tx = pool.begin().await?;

    let order = db::order::get_order_for_update(&mut *tx, order_id)
        .await?
        .ok_or_else(order_not_found)?;

    if order.status != OrderStatus::Canceled.as_str() {
        for item in db::order::get_order_items(&mut *tx, order.id).await? {
            db::product::restore_stock(&mut *tx, item.product_id, item.quantity).await?;
        }
    }

    db::order::delete_order(&mut *tx, order.id).await?;

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_round_trips() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("returned"), None);
        assert_eq!(OrderStatus::parse("Pending"), None);
    }

    #[test]
    fn payment_methods_parse_to_canonical_strings() {
        for method in [PaymentMethod::Cod, PaymentMethod::Card, PaymentMethod::Upi] {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::parse("cheque"), None);
        assert_eq!(PaymentMethod::parse("COD"), None);
        assert_eq!(PaymentMethod::parse(""), None);
    }

    #[test]
    fn only_pending_orders_can_be_canceled() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(!OrderStatus::Processing.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
        assert!(!OrderStatus::Canceled.can_cancel());
    }

    #[test]
    fn order_total_sums_line_totals() {
        let lines = vec![
            CartLine {
                id: Uuid::new_v4(),
                product_id: Uuid::new_v4(),
                quantity: 2,
                price: 19.99,
                stock: 10,
                name: "Widget".to_string(),
            },
            CartLine {
                id: Uuid::new_v4(),
                product_id: Uuid::new_v4(),
                quantity: 1,
                price: 5.0,
                stock: 3,
                name: "Gadget".to_string(),
            },
        ];

        assert!((order_total(&lines) - 44.98).abs() < 1e-9);
        assert_eq!(order_total(&[]), 0.0);
    }
}
