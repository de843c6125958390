use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, patch, post, web};
use sqlx::PgPool;
use uuid::Uuid;

use common::{error::Res, http::Success};
use db::models::user::User;

use crate::{
    dtos::cart::{AddItemRequest, UpdateItemRequest},
    services,
};

#[get("")]
pub async fn get_cart(pool: web::Data<Arc<PgPool>>, user: web::ReqData<User>) -> Res<HttpResponse> {
    let view = services::cart::get_cart(&pool, user.id).await?;
    Success::ok_with_data("Cart retrieved successfully", view)
}

#[post("")]
pub async fn post_item(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    body: web::Json<AddItemRequest>,
) -> Res<HttpResponse> {
    let view = services::cart::add_item(&pool, user.id, body.product_id, body.quantity).await?;
    Success::ok_with_data("Item added to cart successfully", view)
}

#[patch("/item/{item_id}")]
pub async fn patch_item(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateItemRequest>,
) -> Res<HttpResponse> {
    let view =
        services::cart::update_item(&pool, user.id, path.into_inner(), body.quantity).await?;
    Success::ok_with_data("Cart item updated successfully", view)
}

#[delete("/item/{item_id}")]
pub async fn delete_item(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
) -> Res<HttpResponse> {
    let view = services::cart::remove_item(&pool, user.id, path.into_inner()).await?;
    Success::ok_with_data("Item removed from cart successfully", view)
}

#[delete("")]
pub async fn delete_cart(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
) -> Res<HttpResponse> {
    services::cart::clear_cart(&pool, user.id).await?;
    Success::ok("Cart cleared successfully")
}
