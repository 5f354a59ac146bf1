// Reexport de la implementación única ubicada en `hashkit-core` para no
// duplicar la lógica de hashing a nivel de workspace.
pub use hashkit_core::hashing::*;
pub use hashkit_core::{hash_record, hash_value, CallFingerprint, HasherConfig};
