use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use docbook::config::AppConfig;
use docbook::routes;
use docbook::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if dotenv().is_err() {
        warn!("No .env file found, reading configuration from the environment");
    }

    let config = AppConfig::from_env();
    let state = web::Data::new(AppState::new(&config));

    info!(
        "Serving bookings on {}:{} against {}",
        config.bind_addr, config.port, config.api_base_url
    );

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes::init))
        .bind((config.bind_addr.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}
