//! Errores del motor de hashing.
//!
//! Todos los fallos se devuelven de forma síncrona al llamador; hashear es
//! determinista, así que reintentar una llamada fallida no tiene sentido.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum HashError {
    #[error("unsupported kind: {0}")] UnsupportedKind(String),
    #[error("integer {0} does not fit in 8 unsigned bytes")] Range(i128),
    #[error("array layout cannot be linearized: {0}")] Contiguity(String),
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch { context: String, expected: usize, found: usize },
    #[error("nesting deeper than {0} levels")] DepthExceeded(usize),
    #[error("invalid digest: {0}")] InvalidDigest(String),
    #[error("invalid config: {0}")] Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_message_includes_value() {
        let err = HashError::Range(1 << 70);
        assert_eq!(err.to_string(), format!("integer {} does not fit in 8 unsigned bytes", 1i128 << 70));
    }

    #[test]
    fn shape_mismatch_format() {
        let err = HashError::ShapeMismatch { context: "column b".into(), expected: 3, found: 2 };
        assert_eq!(err.to_string(), "shape mismatch in column b: expected 3, found 2");
    }
}
