use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, patch, post, web};
use sqlx::PgPool;
use uuid::Uuid;

use common::{error::Res, http::Success};
use db::models::user::User;

use crate::{
    dtos::catalog::{CreateCategoryRequest, UpdateCategoryRequest},
    services,
};

#[get("")]
pub async fn get_categories(pool: web::Data<Arc<PgPool>>) -> Res<HttpResponse> {
    let categories = services::category::list_categories(&pool).await?;
    Success::ok_with_data("Categories retrieved successfully", categories)
}

#[get("/{category_id}")]
pub async fn get_category(
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<HttpResponse> {
    let category = services::category::get_category(&pool, path.into_inner()).await?;
    Success::ok_with_data("Category retrieved successfully", category)
}

#[post("")]
pub async fn post_category(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    body: web::Json<CreateCategoryRequest>,
) -> Res<HttpResponse> {
    user.require_admin()?;
    let category = services::category::create_category(&pool, body.into_inner()).await?;
    Success::created("Category created successfully", category)
}

#[patch("/{category_id}")]
pub async fn patch_category(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCategoryRequest>,
) -> Res<HttpResponse> {
    user.require_admin()?;
    let category =
        services::category::update_category(&pool, path.into_inner(), body.into_inner()).await?;
    Success::ok_with_data("Category updated successfully", category)
}

#[delete("/{category_id}")]
pub async fn delete_category(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    path: web::Path<Uuid>,
) -> Res<HttpResponse> {
    user.require_admin()?;
    services::category::remove_category(&pool, path.into_inner()).await?;
    Success::ok("Category deleted successfully")
}
