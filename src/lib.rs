// Library exports shared by the server binary and the integration tests
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

use actix_web::web;

/// Register every route. Application data (`SqlitePool`, `AppConfig`) is
/// attached by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health))
        .service(
            web::resource("/register")
                .route(web::get().to(handlers::register_form))
                .route(web::post().to(handlers::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(handlers::login_form))
                .route(web::post().to(handlers::login)),
        )
        // Everything below requires a session
        .service(
            web::scope("")
                .wrap(middleware::AuthMiddleware)
                .route("/logout", web::get().to(handlers::logout))
                .route("/dashboard", web::get().to(handlers::dashboard))
                .route("/export_loads", web::get().to(handlers::export_loads))
                .service(
                    web::resource("/add_driver")
                        .route(web::get().to(handlers::add_driver_form))
                        .route(web::post().to(handlers::add_driver)),
                )
                .service(
                    web::resource("/edit_driver/{id}")
                        .route(web::get().to(handlers::edit_driver_form))
                        .route(web::post().to(handlers::edit_driver)),
                )
                .service(
                    web::resource("/delete_driver/{id}")
                        .route(web::get().to(handlers::delete_driver))
                        .route(web::post().to(handlers::delete_driver)),
                )
                .service(
                    web::resource("/add_load")
                        .route(web::get().to(handlers::add_load_form))
                        .route(web::post().to(handlers::add_load)),
                )
                .service(
                    web::resource("/edit_load/{id}")
                        .route(web::get().to(handlers::edit_load_form))
                        .route(web::post().to(handlers::edit_load)),
                )
                .service(
                    web::resource("/delete_load/{id}")
                        .route(web::get().to(handlers::delete_load))
                        .route(web::post().to(handlers::delete_load)),
                ),
        );
}
