//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    /// Tiempo máximo por suscriptor en cada difusión
    pub broadcast_send_timeout: Duration,
    pub subscriber_buffer: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8000,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
            cors_origins: vec!["*".to_string()],
            broadcast_send_timeout: Duration::from_millis(500),
            subscriber_buffer: 64,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde variables de entorno, con valores por defecto
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or(defaults.cors_origins),
            broadcast_send_timeout: Duration::from_millis(parse_var(
                "BROADCAST_SEND_TIMEOUT_MS",
                defaults.broadcast_send_timeout.as_millis() as u64,
            )?),
            subscriber_buffer: parse_var("SUBSCRIBER_BUFFER", defaults.subscriber_buffer)?,
        })
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
