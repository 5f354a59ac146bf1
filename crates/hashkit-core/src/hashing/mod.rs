//! Módulo de hashing: digest, algoritmos y hashers de valores y records.

pub mod float_repr;
pub mod hash;
pub mod record_hasher;
pub mod value_hasher;

pub use float_repr::canonical_float_text;
pub use hash::{hash_str, Digest, DigestAlgorithm, DigestState};
pub use record_hasher::{canonical_keys, RecordHasher};
pub use value_hasher::ValueHasher;
