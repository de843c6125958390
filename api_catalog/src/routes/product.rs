use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, patch, post, web};
use sqlx::PgPool;
use uuid::Uuid;

use common::{error::Res, http::Success};
use db::models::user::User;

use crate::{
    dtos::catalog::{CreateProductRequest, ProductListQuery, UpdateProductRequest},
    services,
};

#[get("")]
pub async fn get_products(
    pool: web::Data<Arc<PgPool>>,
    query: web::Query<ProductListQuery>,
) -> Res<HttpResponse> {
    let products =
        services::product::list_products(&pool, query.into_inner().into_filter()).await?;
    Success::ok_with_data("Products retrieved successfully", products)
}

#[get("/{product_id}")]
pub async fn get_product(
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<HttpResponse> {
    let product = services::product::get_product(&pool, path.into_inner()).await?;
    Success::ok_with_data("Product retrieved successfully", product)
}

#[post("")]
pub async fn post_product(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    body: web::Json<CreateProductRequest>,
) -> Res<HttpResponse> {
    user.require_admin()?;
    let product = services::product::create_product(&pool, body.into_inner()).await?;
    Success::created("Product created successfully", product)
}

#[patch("/{product_id}")]
pub async fn patch_product(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProductRequest>,
) -> Res<HttpResponse> {
    user.require_admin()?;
    let product =
        services::product::update_product(&pool, path.into_inner(), body.into_inner()).await?;
    Success::ok_with_data("Product updated successfully", product)
}

#[delete("/{product_id}")]
pub async fn delete_product(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
) -> Res<HttpResponse> {
    user.require_admin()?;
    services::product::remove_product(&pool, path.into_inner()).await?;
    Success::ok("Product deleted successfully")
}
