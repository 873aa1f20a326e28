use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use canvass_core::{AppError, UserId};
use tracing_subscriber::EnvFilter;

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub gateway_shared_secret: String,
    pub api_host: String,
    pub api_port: u16,
    pub bootstrap_superadmin_user_id: Option<UserId>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(10);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let gateway_shared_secret = required_env("GATEWAY_SHARED_SECRET")?;
        if gateway_shared_secret.len() < 32 {
            return Err(AppError::Validation(
                "GATEWAY_SHARED_SECRET must be at least 32 characters".to_owned(),
            ));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let bootstrap_superadmin_user_id = env::var("BOOTSTRAP_SUPERADMIN_USER_ID")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| UserId::from_str(value.as_str()))
            .transpose()
            .map_err(|error| {
                AppError::Validation(format!("invalid BOOTSTRAP_SUPERADMIN_USER_ID: {error}"))
            })?;

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            frontend_url,
            gateway_shared_secret,
            api_host,
            api_port,
            bootstrap_superadmin_user_id,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    let value = env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
