use actix_web::{Scope, web};

pub mod routes {
    pub mod category;
    pub mod product;
}

pub mod services {
    pub mod category;
    pub mod product;
}

pub mod dtos {
    pub mod catalog;
}

/// Product listing and admin CRUD. Reads are public; writes go through
/// the admin gate.
pub fn mount_products() -> Scope {
    web::scope("/products")
        .service(routes::product::get_products)
        .service(routes::product::get_product)
        .service(routes::product::post_product)
        .service(routes::product::patch_product)
        .service(routes::product::delete_product)
}

pub fn mount_categories() -> Scope {
    web::scope("/categories")
        .service(routes::category::get_categories)
        .service(routes::category::get_category)
        .service(routes::category::post_category)
        .service(routes::category::patch_category)
        .service(routes::category::delete_category)
}
