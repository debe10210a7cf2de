#![deny(missing_docs)]
//! SpaceFleet server executable.
//!
//! Hosts the ship registry REST endpoints over an in-memory or PostgreSQL store.

mod config;
mod db;
mod models;
mod openapi;
mod routes;
mod schema;
mod store;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;
#[cfg(not(test))]
use std::io;
#[cfg(not(test))]
use std::sync::Arc;

#[cfg(not(test))]
use crate::config::ServerConfig;
#[cfg(not(test))]
use crate::routes::{AppState, SharedStore, configure};

#[cfg(not(test))]
fn open_store(config: &ServerConfig) -> io::Result<SharedStore> {
    match &config.database_url {
        Some(url) => {
            let pool = db::init_pool(url).map_err(io::Error::other)?;
            log::info!("using PostgreSQL ship store");
            Ok(Arc::new(store::PgShipStore::new(pool)))
        }
        None => {
            log::warn!("DATABASE_URL not set; ships are kept in memory only");
            Ok(Arc::new(spacefleet_core::InMemoryShipStore::new()))
        }
    }
}

#[cfg(not(test))]
fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().map_err(io::Error::other)?;
    let state = web::Data::new(AppState::new(open_store(&config)?));
    let allowed_origins = config.allowed_origins.clone();
    let bind = (config.host.clone(), config.port);
    log::info!("listening on {}:{}", bind.0, bind.1);

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .configure(configure)
        })
        .bind(bind)?
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
