//! hashkit-core: hashing de contenido determinista sobre valores heterogéneos.
//!
//! Entrada: un `Value` (escalares, textos, secuencias, tuplas, arrays
//! numéricos, tablas, mappings) o un `Record`. Salida: digest de 128 bits
//! en hex, estable entre ejecuciones y plataformas. Sin estado global: el
//! algoritmo se elige con `HasherConfig`.
pub mod config;
pub mod constants;
pub mod errors;
pub mod fingerprint;
pub mod hashing;
pub mod value;

pub use config::HasherConfig;
pub use errors::HashError;
pub use fingerprint::CallFingerprint;
pub use hashing::{Digest, DigestAlgorithm, RecordHasher, ValueHasher};
pub use value::{Column, DType, NumericArray, Record, Table, Value};

/// Hex (32 chars) del digest de `value` con la configuración por defecto.
pub fn hash_value(value: &Value) -> Result<String, HashError> {
    ValueHasher::default().hash(value).map(|d| d.to_hex())
}

/// Hex del digest de `record` ignorando `exclude_keys`.
pub fn hash_record(record: &Record, exclude_keys: &[&str]) -> Result<String, HashError> {
    RecordHasher::default().hash_record(record, exclude_keys).map(|d| d.to_hex())
}
