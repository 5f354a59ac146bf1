//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`)
//! con la `HasherConfig` que usan los hashers por defecto de este crate.
//!
//! Variables: `HASHKIT_ALGORITHM` (md5 | sha256 | blake3),
//! `HASHKIT_MAX_DEPTH`, `HASHKIT_STRICT_ARRAYS`.
use std::env;

use hashkit_core::HasherConfig;
use log::warn;
use once_cell::sync::Lazy;

use crate::errors::CoreError;

/// Prefijo de las variables de entorno.
pub const ENV_PREFIX: &str = "HASHKIT_";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub hasher: HasherConfig,
}

impl AppConfig {
    /// Lee `.env` (si existe) y las variables `HASHKIT_*`.
    pub fn from_env() -> Result<Self, CoreError> {
        let _ = dotenvy::dotenv(); // ignora error si no existe .env
        Self::from_lookup(|k| env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let hasher = HasherConfig::from_lookup(ENV_PREFIX, lookup).map_err(|e| CoreError::Config(e.to_string()))?;
        Ok(Self { hasher })
    }
}

/// Resultado de leer el entorno, evaluado una sola vez.
static LOADED: Lazy<Result<AppConfig, String>> = Lazy::new(|| AppConfig::from_env().map_err(|e| e.to_string()));

/// Configuración del entorno; un entorno inválido es un error.
pub fn try_config() -> Result<AppConfig, CoreError> { (*LOADED).clone().map_err(CoreError::Config) }

/// Instancia global perezosa. Si el entorno es inválido se usa la
/// configuración por defecto (digests compatibles) y se avisa con `warn!`;
/// quien necesite detectar el error debe usar `try_config`.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    try_config().unwrap_or_else(|e| {
        warn!("invalid hashing configuration, falling back to defaults: {e}");
        AppConfig { hasher: HasherConfig::default() }
    })
});
