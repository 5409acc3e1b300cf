use actix_web::{App, HttpServer, middleware, web};

use classwatch::api::ApiClient;
use classwatch::config::AppConfig;
use classwatch::models::monitoring::MonitorGuard;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    let api = ApiClient::from_config(&config).map_err(std::io::Error::other)?;
    let guard = MonitorGuard::new();
    let bind_addr = config.bind_addr.clone();

    log::info!(
        "Starting {} at http://{bind_addr} (api: {}, monitor: {})",
        config.app_name,
        config.api_base_url,
        config.monitor_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(classwatch::session_middleware(config.session_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(api.clone()))
            .app_data(web::Data::new(guard.clone()))
            .service(actix_files::Files::new("/static", "./static"))
            .configure(classwatch::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
