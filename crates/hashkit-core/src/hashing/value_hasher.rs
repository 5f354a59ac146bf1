//! `ValueHasher`: digest de un `Value` por despacho exhaustivo sobre su tipo.
//!
//! Reglas (deben mantenerse estables, los digests se usan como claves de caché):
//! - Null: centinela `Digest::NULL` (todo ceros).
//! - Integer: 8 bytes big-endian sin signo (`0..=u64::MAX`); negativos o
//!   fuera de rango -> `HashError::Range`.
//! - Float: texto canónico (`float_repr`), hasheado como texto.
//! - Text: bytes UTF-8.
//! - Sequence/Tuple: digests de los elementos en hex, concatenados en orden.
//! - NumericArray: bytes crudos en orden C (shape/dtype sólo en modo estricto).
//! - Table: vector de digests por fila si existe; si no, pares
//!   (nombre, digest de columna) ordenados por nombre.
//! - Mapping: regla de `RecordHasher` sin exclusiones.

use crate::config::HasherConfig;
use crate::errors::HashError;
use crate::hashing::float_repr::canonical_float_text;
use crate::hashing::{Digest, RecordHasher};
use crate::value::{Column, NumericArray, Table, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueHasher {
    config: HasherConfig,
}

impl ValueHasher {
    pub fn new(config: HasherConfig) -> Self { Self { config } }

    pub fn config(&self) -> &HasherConfig { &self.config }

    pub fn hash(&self, value: &Value) -> Result<Digest, HashError> { self.hash_at(value, 0) }

    pub(crate) fn hash_at(&self, value: &Value, depth: usize) -> Result<Digest, HashError> {
        if depth > self.config.max_depth {
            return Err(HashError::DepthExceeded(self.config.max_depth));
        }
        match value {
            Value::Null => Ok(Digest::NULL),
            Value::Integer(i) => self.hash_integer(*i),
            Value::Float(x) => Ok(self.hash_text(&canonical_float_text(*x))),
            Value::Text(s) => Ok(self.hash_text(s)),
            Value::Sequence(items) | Value::Tuple(items) => {
                let digests = items.iter()
                                   .map(|item| self.hash_at(item, depth + 1))
                                   .collect::<Result<Vec<_>, _>>()?;
                Ok(self.combine(&digests))
            }
            Value::NumericArray(a) => Ok(self.hash_array(a)),
            Value::Table(t) => Ok(self.hash_table(t)),
            Value::Mapping(r) => RecordHasher::new(self.config).hash_at(r, &[], depth + 1),
        }
    }

    pub fn hash_text(&self, text: &str) -> Digest { self.config.algorithm.digest(text.as_bytes()) }

    pub fn hash_integer(&self, value: i128) -> Result<Digest, HashError> {
        let v = u64::try_from(value).map_err(|_| HashError::Range(value))?;
        Ok(self.config.algorithm.digest(&v.to_be_bytes()))
    }

    pub fn hash_array(&self, array: &NumericArray) -> Digest {
        let bytes = array.contiguous_bytes();
        let mut state = self.config.algorithm.start();
        if self.config.strict_arrays {
            state.update(array.metadata_header().as_bytes());
        }
        state.update(&bytes);
        state.finalize()
    }

    pub fn hash_table(&self, table: &Table) -> Digest {
        if let Some(rows) = table.row_hashes() {
            return self.combine(rows);
        }
        let mut columns: Vec<(&str, &Column)> = table.columns().collect();
        columns.sort_by(|a, b| a.0.cmp(b.0));
        let pairs: Vec<Digest> = columns.into_iter()
                                        .map(|(name, column)| {
                                            let col = match column {
                                                Column::Numeric(a) => self.hash_array(a),
                                                Column::Text(cells) => {
                                                    let cells: Vec<Digest> = cells.iter().map(|c| self.hash_text(c)).collect();
                                                    self.combine(&cells)
                                                }
                                            };
                                            self.combine(&[self.hash_text(name), col])
                                        })
                                        .collect();
        self.combine(&pairs)
    }

    /// Regla de secuencia sobre digests ya calculados: hash de la
    /// concatenación de sus hex. Lista vacía -> digest del buffer vacío.
    pub fn combine(&self, digests: &[Digest]) -> Digest {
        let mut state = self.config.algorithm.start();
        for d in digests {
            state.update(d.to_hex().as_bytes());
        }
        state.finalize()
    }

    /// Centinela de secuencia vacía.
    pub fn empty_sequence(&self) -> Digest { self.combine(&[]) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::DigestAlgorithm;
    use crate::value::{DType, Record};

    fn h(v: impl Into<Value>) -> String { ValueHasher::default().hash(&v.into()).unwrap().to_hex() }

    #[test]
    fn scalar_vectors() {
        assert_eq!(h(0), "7dea362b3fac8e00956a4952a3d4f474");
        assert_eq!(h("wow"), "bcedc450f8481e89b1445069acdc3dd9");
        assert_eq!(h(3.14), "4beed3b9c4a886067de0e3a094246f78");
        assert_eq!(h(42), "7e0535868cd45dff74884bfba0fa1594");
    }

    #[test]
    fn sequence_vector() {
        assert_eq!(h(Value::seq([1.0])), "3147e474b9c2a5b484473aaebccd5213");
    }

    #[test]
    fn null_and_empty_sentinels_differ() {
        let null = h(Value::Null);
        let empty = h(Value::Sequence(vec![]));
        assert_eq!(null, "0".repeat(32));
        assert_eq!(empty, "d41d8cd98f00b204e9800998ecf8427e");
        assert_ne!(null, empty);
    }

    #[test]
    fn tuple_and_sequence_share_rule() {
        assert_eq!(h(Value::tuple([1, 2])), h(Value::seq([1, 2])));
    }

    #[test]
    fn integer_range() {
        let hasher = ValueHasher::default();
        assert!(hasher.hash(&Value::Integer(i64::MAX as i128)).is_ok());
        assert_eq!(h(1u64 << 63), "54409ea540dc450d53a86133d867c772");
        assert_eq!(h(u64::MAX), "c2cb56f4c5bf656faca0986e7eba0308");
        assert_eq!(hasher.hash(&Value::Integer(-1)), Err(HashError::Range(-1)));
        assert_eq!(hasher.hash(&Value::Integer(1i128 << 64)), Err(HashError::Range(1i128 << 64)));
        // el error se propaga desde dentro de una secuencia
        let nested = Value::seq([Value::Integer(1), Value::Integer(1i128 << 64)]);
        assert_eq!(hasher.hash(&nested), Err(HashError::Range(1i128 << 64)));
    }

    #[test]
    fn depth_guard() {
        let mut v = Value::Null;
        for _ in 0..5 {
            v = Value::Sequence(vec![v]);
        }
        let shallow = ValueHasher::new(HasherConfig::default().with_max_depth(4));
        assert_eq!(shallow.hash(&v), Err(HashError::DepthExceeded(4)));
        let deep = ValueHasher::new(HasherConfig::default().with_max_depth(5));
        assert!(deep.hash(&v).is_ok());
    }

    #[test]
    fn arrays_ignore_shape_by_default() {
        let flat = NumericArray::zeros(vec![6], DType::Int32).unwrap();
        let square = NumericArray::zeros(vec![2, 3], DType::Int32).unwrap();
        let hasher = ValueHasher::default();
        assert_eq!(hasher.hash_array(&flat), hasher.hash_array(&square));
        // bytes crudos: 10 ceros float64 == 80 bytes a cero
        assert_eq!(hasher.hash_array(&NumericArray::zeros(vec![10], DType::Float64).unwrap()),
                   DigestAlgorithm::Md5.digest(&[0u8; 80]));
    }

    #[test]
    fn strict_arrays_include_metadata() {
        let strict = ValueHasher::new(HasherConfig::default().with_strict_arrays(true));
        let flat = NumericArray::zeros(vec![6], DType::Int32).unwrap();
        let square = NumericArray::zeros(vec![2, 3], DType::Int32).unwrap();
        assert_ne!(strict.hash_array(&flat), strict.hash_array(&square));
    }

    #[test]
    fn mapping_uses_record_rule() {
        let r = Record::new().with("b", 2).with("a", 1);
        let hasher = ValueHasher::default();
        let expected = hasher.combine(&[hasher.hash(&1.into()).unwrap(), hasher.hash(&2.into()).unwrap()]);
        assert_eq!(hasher.hash(&Value::Mapping(r)).unwrap(), expected);
    }

    #[test]
    fn algorithm_is_configurable() {
        let md5 = ValueHasher::default().hash(&"x".into()).unwrap();
        let b3 = ValueHasher::new(HasherConfig::default().with_algorithm(DigestAlgorithm::Blake3)).hash(&"x".into()).unwrap();
        assert_ne!(md5, b3);
    }
}
