use std::sync::Arc;

use actix_web::{HttpResponse, get, patch, web};
use sqlx::PgPool;

use common::{
    error::Res,
    http::Success,
};
use db::{dtos::user::ProfileUpdate, models::user::User};

use crate::dtos::auth::UpdateProfileRequest;

#[get("/profile")]
pub async fn get_profile(user: web::ReqData<User>) -> Res<HttpResponse> {
    Success::ok_with_data("Profile retrieved successfully", user.into_inner())
}

#[patch("/profile")]
pub async fn patch_profile(
    pool: web::Data<Arc<PgPool>>,
    user: web::ReqData<User>,
    body: web::Json<UpdateProfileRequest>,
) -> Res<HttpResponse> {
    let body = body.into_inner();
    let updated = db::user::update_profile(
        &***pool,
        user.id,
        ProfileUpdate {
            first_name: body.first_name,
            last_name: body.last_name,
            pincode: body.pincode,
            state: body.state,
            city: body.city,
            gender: body.gender,
        },
    )
    .await?;

    Success::ok_with_data("Profile updated successfully", updated)
}
