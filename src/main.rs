use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use expense_desk::api::{ApiClient, HttpApiClient, InMemoryApiClient};
use expense_desk::config::AppConfig;
use expense_desk::{handlers, routes, session_middleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    let api: Arc<dyn ApiClient> = match config.api_base_url.as_deref() {
        Some(url) => {
            let client = HttpApiClient::new(url, config.api_timeout())
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
            log::info!("Using expense backend at {}", client.base_url());
            Arc::new(client)
        }
        None => {
            log::warn!("No API_BASE_URL set, serving in-memory demo data");
            Arc::new(InMemoryApiClient::demo())
        }
    };

    let secret_key = config.session_key();
    let address = config.server_address();
    let config_data = web::Data::new(config);
    let api_data: web::Data<dyn ApiClient> = web::Data::from(api);

    log::info!("Starting server at http://{address}");

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(api_data.clone())
            .app_data(config_data.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(routes)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(address)?
    .run()
    .await
}
