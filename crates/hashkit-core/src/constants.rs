//! Constantes del motor de hashing.
//!
//! Los valores de este módulo forman parte de los digests que ya están
//! guardados como claves de caché. Cambiarlos invalida esas claves.

/// Ancho del digest en bytes (128 bits, el ancho de MD5).
pub const DIGEST_LEN: usize = 16;

/// Longitud del digest renderizado en hex.
pub const HEX_LEN: usize = DIGEST_LEN * 2;

/// Profundidad máxima de anidamiento por defecto antes de abortar con
/// `HashError::DepthExceeded`.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Caracteres usados por `Digest::short` (prefijo corto para mostrar).
pub const SHORT_LEN: usize = 7;
