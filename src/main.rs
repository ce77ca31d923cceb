use server::{config::AppConfig, configure, db};

use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    let pool = match db::init_db(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to initialize database: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    log::info!("🚚 Starting LoadPilot at {}:{}", config.host, config.port);

    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);
    let pool = web::Data::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(pool.clone())
            .app_data(config.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
