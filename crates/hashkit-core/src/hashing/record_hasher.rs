//! `RecordHasher`: canonicaliza un `Record` y combina los digests de sus campos.
//!
//! Canonicalización: se descartan las claves excluidas (las pasadas en la
//! llamada y las del propio record) y el resto se ordena por bytes. El digest
//! final es la regla de secuencia sobre los digests de los valores en ese
//! orden, así que el orden de inserción nunca participa.

use log::debug;

use crate::config::HasherConfig;
use crate::errors::HashError;
use crate::hashing::{Digest, ValueHasher};
use crate::value::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordHasher {
    values: ValueHasher,
}

impl RecordHasher {
    pub fn new(config: HasherConfig) -> Self { Self { values: ValueHasher::new(config) } }

    pub fn value_hasher(&self) -> &ValueHasher { &self.values }

    pub fn hash_record(&self, record: &Record, exclude_keys: &[&str]) -> Result<Digest, HashError> {
        self.hash_at(record, exclude_keys, 0)
    }

    pub(crate) fn hash_at(&self, record: &Record, exclude_keys: &[&str], depth: usize) -> Result<Digest, HashError> {
        let keys = canonical_keys(record, exclude_keys);
        debug!("hashing record: {} fields, {} retained", record.len(), keys.len());
        let mut digests = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = record.get(key) {
                let digest = self.values
                                 .hash_at(value, depth)
                                 .inspect_err(|e| debug!("field '{key}' ({}) not hashable: {e}", value.kind()))?;
                digests.push(digest);
            }
        }
        Ok(self.values.combine(&digests))
    }
}

/// Claves retenidas de `record`, en orden canónico (bytes ascendentes).
pub fn canonical_keys<'a>(record: &'a Record, exclude_keys: &[&str]) -> Vec<&'a str> {
    let mut keys: Vec<&str> = record.keys()
                                    .filter(|k| !exclude_keys.contains(k) && !record.is_excluded(k))
                                    .collect();
    keys.sort_unstable();
    keys
}
