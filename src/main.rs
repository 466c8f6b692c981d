use std::io;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::web::{self, Bytes};
use actix_web::{App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};

mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
#[cfg(test)]
mod testing;

use config::Config;
use services::{LeadStore, PgLeadStore};
use state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Refuse to boot without credentials.
    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let index_html = handlers::page::load_index(config.index_html_path.as_deref()).map_err(|e| {
        error!("Failed to read {:?}: {}", config.index_html_path, e);
        e
    })?;

    let chat = services::build_chat_backend(&config).map_err(|e| {
        error!("Failed to build the Gemini HTTP client: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;
    info!(
        "Chat backend: {:?} (model {})",
        config.chat_backend, config.gemini_model
    );

    let leads = connect_lead_store(&config).await;

    let state = web::Data::new(AppState {
        index_html: Bytes::from(index_html),
        chat,
        leads,
    });

    info!("Listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Lead storage is optional: without a reachable database `/save_lead`
/// answers 503 until the process restarts.
async fn connect_lead_store(config: &Config) -> Option<Arc<dyn LeadStore>> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL is not set; lead storage is disabled.");
        return None;
    };

    match PgLeadStore::connect(database_url, config.database_acquire_timeout).await {
        Ok(store) => {
            info!("Connected to PostgreSQL.");
            Some(Arc::new(store))
        }
        Err(e) => {
            warn!(
                "Could not connect to PostgreSQL, lead storage is disabled: {}",
                e
            );
            None
        }
    }
}
