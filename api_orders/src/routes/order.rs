use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, patch, post, web};
use sqlx::PgPool;
use uuid::Uuid;

use common::{error::Res, http::Success};
use db::models::user::User;

use crate::{
    dtos::order::{CreateOrderRequest, UpdateStatusRequest},
    services,
};

#[post("")]
pub async fn post_order(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    body: web::Json<CreateOrderRequest>,
) -> Res<HttpResponse> {
    let view = services::order::create_order(&pool, &user, body.into_inner()).await?;
    Success::created("Order placed successfully", view)
}

#[get("/my-orders")]
pub async fn get_my_orders(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
) -> Res<HttpResponse> {
    let orders = services::order::list_mine(&pool, user.id).await?;
    Success::ok_with_data("Orders retrieved successfully", orders)
}

#[get("")]
pub async fn get_orders(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
) -> Res<HttpResponse> {
    user.require_admin()?;
    let orders = services::order::list_all(&pool).await?;
    Success::ok_with_data("Orders retrieved successfully", orders)
}

#[get("/{order_id}")]
pub async fn get_order(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
) -> Res<HttpResponse> {
    let view = services::order::get_order(&pool, &user, path.into_inner()).await?;
    Success::ok_with_data("Order retrieved successfully", view)
}

#[patch("/{order_id}/cancel")]
pub async fn patch_cancel(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
) -> Res<HttpResponse> {
    let view = services::order::cancel_order(&pool, &user, path.into_inner()).await?;
    Success::ok_with_data("Order canceled successfully", view)
}

#[patch("/{order_id}/status")]
pub async fn patch_status(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> Res<HttpResponse> {
    user.require_admin()?;
    let order = services::order::set_status(&pool, path.into_inner(), &body.status).await?;
    Success::ok_with_data("Order status updated successfully", order)
}

#[delete("/{order_id}")]
pub async fn delete_order(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
) -> Res<HttpResponse> {
    user.require_admin()?;
    services::order::remove_order(&pool, path.into_inner()).await?;
    Success::ok("Order deleted successfully")
}
