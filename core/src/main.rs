mod cors;

use actix_web::{
    App, HttpResponse, HttpServer, get,
    web::{self},
};
use common::{env_config::Config, error::Res, http::Success};
use mailer::Mailer;

#[get("/status")]
async fn get_status() -> Res<HttpResponse> {
    Success::ok("Server is running")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // init outbound mail
    let mailer = web::Data::new(
        Mailer::from_config(&config.mail_config).expect("Failed to set up mailer"),
    );

    HttpServer::new(move || {
        let access_secret = config_data.token_config.access_secret.clone();
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(mailer.clone())
            // Malformed input gets the same response envelope as app errors.
            .app_data(web::JsonConfig::default().error_handler(common::http::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(common::http::query_error_handler))
            .app_data(web::PathConfig::default().error_handler(common::http::path_error_handler))
            .wrap(logger::middleware(config_data.console_logging_enabled)) // 3rd
            .wrap(api_auth::auth_middleware(access_secret)) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api/v1")
                    .service(get_status)
                    .service(api_auth::mount_auth())
                    .service(api_auth::mount_user())
                    .service(api_catalog::mount_products())
                    .service(api_catalog::mount_categories())
                    .service(api_cart::mount_cart())
                    .service(api_orders::mount_orders()),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
