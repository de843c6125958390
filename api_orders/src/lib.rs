use actix_web::{Scope, web};

pub mod routes {
    pub mod order;
}

pub mod services {
    pub mod order;
}

pub mod dtos {
    pub mod order;
}

/// Order placement and lifecycle. Listing all orders, status updates and
/// deletion are admin-only; the rest is scoped to the order's owner.
pub fn mount_orders() -> Scope {
    web::scope("/orders")
        .service(routes::order::post_order)
        .service(routes::order::get_my_orders)
        .service(routes::order::get_orders)
        .service(routes::order::get_order)
        .service(routes::order::patch_cancel)
        .service(routes::order::patch_status)
        .service(routes::order::delete_order)
}
