//! Configuration for Products API

use axum_helpers::{AuthConfig, CorsConfig};
use core_config::{app_info, env_required, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration, read once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let app = app_info!(env_required("APP_NAME")?);
        let mongodb = MongoConfig::from_env()?.with_app_name(app.name.clone());
        let server = ServerConfig::from_env()?;
        let auth = AuthConfig::from_env()?;
        let cors = CorsConfig::from_env()?;

        Ok(Self {
            app,
            mongodb,
            server,
            auth,
            cors,
            environment,
        })
    }
}
