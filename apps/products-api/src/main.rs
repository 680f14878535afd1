//! Products API - REST server

use axum_helpers::{create_production_app, JwtVerifier};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::connect_from_config;
use domain_products::{MongoProductRepository, ProductService};
use eyre::WrapErr;
use products_api::{api, build_router, AppState, Config};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let mongo_client = connect_from_config(&config.mongodb)
        .await
        .wrap_err("MongoDB is unreachable")?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let verifier = JwtVerifier::from_config(&config.auth)?;

    let repository = MongoProductRepository::new(&db);
    let service = ProductService::new(repository);

    let state = AppState::new(mongo_client.clone(), config.mongodb.database());
    let app = build_router(service, verifier, &config.cors, config.app.clone())
        .merge(api::health::router(state));

    info!(
        app = %config.app.name,
        port = config.server.port,
        "Application {} is running on port {}",
        config.app.name,
        config.server.port
    );

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed");
        },
    )
    .await
    .wrap_err("Server error")?;

    info!("Products API shutdown complete");
    Ok(())
}
