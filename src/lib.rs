//! hashkit
//!
//! Este crate actúa como la librería central de hashkit:
//! - Expone `errors` para manejar errores de núcleo.
//! - Expone `hashing` (reexport de `hashkit-core`) y `config` con la
//!   configuración cargada del entorno.
//! - Expone `batch` para hashear lotes de records y desglosar digests por campo.
//!
//! Puede usarse directamente o por otros crates/clientes (p. ej. para
//! generar claves de caché de figuras).

pub mod batch;
pub mod config;
pub mod errors;
pub mod hashing;

pub use hashkit_core::{Digest, Record, Value};

use hashkit_core::{CallFingerprint, RecordHasher};

use crate::errors::CoreError;

/// `RecordHasher` con la configuración global (`config::CONFIG`); con un
/// entorno inválido usa los valores por defecto.
pub fn configured_hasher() -> RecordHasher { RecordHasher::new(config::CONFIG.hasher) }

/// Clave de caché de una llamada con la configuración del entorno. Un
/// entorno inválido es `CoreError::Config`: una clave calculada con otro
/// algoritmo no encontraría las entradas ya guardadas.
pub fn call_key(args: &[Value], kwargs: &Record) -> Result<CallFingerprint, CoreError> {
    let hasher = RecordHasher::new(config::try_config()?.hasher);
    Ok(CallFingerprint::compute(&hasher, args, kwargs)?)
}
