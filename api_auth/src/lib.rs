use actix_web::{Scope, web};

use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}

pub mod routes {
    pub mod auth;
    pub mod user;
}

pub mod services {
    pub mod auth;
    pub mod user;
}

pub mod dtos {
    pub mod auth;
}

/// Public authentication endpoints.
pub fn mount_auth() -> Scope {
    web::scope("/auth")
        .service(routes::auth::post_register)
        .service(routes::auth::post_verify_otp)
        .service(routes::auth::post_login)
        .service(routes::auth::post_logout)
        .service(routes::auth::post_refresh_token)
}

/// Profile endpoints for the authenticated principal.
pub fn mount_user() -> Scope {
    web::scope("/user")
        .service(routes::user::get_profile)
        .service(routes::user::patch_profile)
}

/// Access-token authentication middleware. Public paths pass through;
/// everything else needs a valid token and an existing user.
pub fn auth_middleware(access_secret: String) -> AuthMiddleware {
    AuthMiddleware::new(access_secret)
}
