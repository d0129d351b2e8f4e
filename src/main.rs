mod api;
mod config;
mod database;
mod middleware;
mod models;
mod repositories;
mod services;
mod utils;
mod views;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use crate::repositories::{MongoBlogRepository, MongoSessionStore, MongoUserRepository, SessionStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting Blog Service...");
    log::info!("📊 Database: {}", config.database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&config.database_url)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
        })?;

    log::info!("✅ MongoDB connected successfully");

    let state = web::Data::new(api::AppState {
        users: Arc::new(MongoUserRepository::new(&db)),
        blogs: Arc::new(MongoBlogRepository::new(&db)),
        bcrypt_cost: config.bcrypt_cost,
    });
    let sessions: Arc<dyn SessionStore> = Arc::new(MongoSessionStore::new(&db));
    let db_data = web::Data::new(db);
    let session_config = config.session.clone();

    log::info!("🌐 Server starting on {}", config.bind_address());

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(db_data.clone())
            .configure(api::configure)
            .wrap(middleware::MethodOverride)
            .wrap(middleware::SessionMiddleware::new(
                sessions.clone(),
                session_config.clone(),
            ))
            .wrap(middleware::SecurityHeaders)
            .wrap(actix_web::middleware::Compress::default())
            .wrap(Logger::default())
    })
    .bind(config.bind_address())?
    .run()
    .await
}
