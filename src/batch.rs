//! Operaciones sobre lotes de records y desglose por campo.
//!
//! Los hashers no tienen estado compartido, así que un lote se reparte entre
//! los hilos de rayon sin sincronización.

use hashkit_core::hashing::canonical_keys;
use hashkit_core::{Digest, Record, RecordHasher};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::errors::CoreError;

/// Digest de cada record, en el mismo orden que la entrada. Falla con el
/// primer error encontrado.
pub fn hash_many(hasher: &RecordHasher, records: &[Record], exclude_keys: &[&str]) -> Result<Vec<Digest>, CoreError> {
    let digests = records.par_iter()
                         .map(|r| hasher.hash_record(r, exclude_keys))
                         .collect::<Result<Vec<_>, _>>()?;
    Ok(digests)
}

/// Digest de cada campo retenido, en orden canónico, más el digest total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub digest: Digest,
    pub fields: IndexMap<String, Digest>,
}

impl FieldReport {
    pub fn build(hasher: &RecordHasher, record: &Record, exclude_keys: &[&str]) -> Result<Self, CoreError> {
        let values = hasher.value_hasher();
        let mut fields = IndexMap::new();
        for key in canonical_keys(record, exclude_keys) {
            if let Some(v) = record.get(key) {
                fields.insert(key.to_string(), values.hash(v)?);
            }
        }
        let parts: Vec<Digest> = fields.values().copied().collect();
        Ok(Self { digest: values.combine(&parts), fields })
    }

    /// Claves cuyo digest difiere entre ambos reportes, o que sólo están en uno.
    pub fn changed_fields(&self, other: &FieldReport) -> Vec<String> {
        let mut changed: Vec<String> = self.fields
                                           .iter()
                                           .filter(|(k, d)| other.fields.get(*k) != Some(*d))
                                           .map(|(k, _)| k.clone())
                                           .collect();
        changed.extend(other.fields.keys().filter(|k| !self.fields.contains_key(*k)).cloned());
        changed.sort();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashkit_core::Value;

    #[test]
    fn report_digest_matches_record_hasher() {
        let hasher = RecordHasher::default();
        let r = Record::new().with("b", 2).with("a", "x").with("skip", 0);
        let report = FieldReport::build(&hasher, &r, &["skip"]).unwrap();
        assert_eq!(report.digest, hasher.hash_record(&r, &["skip"]).unwrap());
        assert_eq!(report.fields.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn changed_fields_lists_differences() {
        let hasher = RecordHasher::default();
        let a = FieldReport::build(&hasher, &Record::new().with("x", 1).with("y", 2), &[]).unwrap();
        let b = FieldReport::build(&hasher, &Record::new().with("x", 1).with("y", 3).with("z", Value::Null), &[]).unwrap();
        assert_eq!(a.changed_fields(&b), vec!["y".to_string(), "z".to_string()]);
    }

    #[test]
    fn hash_many_keeps_order_and_propagates_errors() {
        let hasher = RecordHasher::default();
        let records = vec![Record::new().with("a", 1), Record::new().with("a", 2)];
        let digests = hash_many(&hasher, &records, &[]).unwrap();
        assert_eq!(digests[0], hasher.hash_record(&records[0], &[]).unwrap());
        assert_eq!(digests[1], hasher.hash_record(&records[1], &[]).unwrap());

        let bad = vec![Record::new().with("a", Value::Integer(i128::MIN))];
        assert!(matches!(hash_many(&hasher, &bad, &[]), Err(CoreError::Hash(_))));
    }

    #[test]
    fn report_serializes_as_hex() {
        let report = FieldReport::build(&RecordHasher::default(), &Record::new().with("a", "wow"), &[]).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["fields"]["a"], "bcedc450f8481e89b1445069acdc3dd9");
    }
}
