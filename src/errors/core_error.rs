use hashkit_core::HashError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("hashing failed: {0}")]
    Hash(#[from] HashError),
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_variant_from() {
        let err: CoreError = HashError::Range(1 << 80).into();
        assert_eq!(err.to_string(), format!("hashing failed: integer {} does not fit in 8 unsigned bytes", 1i128 << 80));
    }

    #[test]
    fn test_config_variant_format() {
        let err = CoreError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }
}
