use actix_web::{Scope, web};

pub mod routes {
    pub mod cart;
}

pub mod services {
    pub mod cart;
}

pub mod dtos {
    pub mod cart;
}

/// Cart endpoints for the authenticated user. Every mutation recomputes
/// the stored cart total.
pub fn mount_cart() -> Scope {
    web::scope("/cart")
        .service(routes::cart::get_cart)
        .service(routes::cart::post_item)
        .service(routes::cart::patch_item)
        .service(routes::cart::delete_item)
        .service(routes::cart::delete_cart)
}
