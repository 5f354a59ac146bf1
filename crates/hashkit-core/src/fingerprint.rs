//! Fingerprint de una llamada (argumentos posicionales + keyword args).
//!
//! Es la clave que usan los consumidores externos (p. ej. el guardado de
//! figuras) como nombre de fichero: cada argumento se hashea con
//! `ValueHasher`, los kwargs como `Record`, y la lista de hex resultante se
//! vuelve a hashear como secuencia de textos.

use std::fmt;

use crate::errors::HashError;
use crate::hashing::{Digest, RecordHasher};
use crate::value::{Record, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallFingerprint {
    digest: Digest,
}

impl CallFingerprint {
    pub fn compute(hasher: &RecordHasher, args: &[Value], kwargs: &Record) -> Result<Self, HashError> {
        let values = hasher.value_hasher();
        let mut parts = Vec::with_capacity(args.len() + 1);
        for arg in args {
            parts.push(values.hash(arg)?);
        }
        parts.push(hasher.hash_record(kwargs, &[])?);
        // los sub-digests se tratan como textos hex
        let as_text: Vec<Digest> = parts.iter().map(|d| values.hash_text(&d.to_hex())).collect();
        Ok(Self { digest: values.combine(&as_text) })
    }

    pub fn digest(&self) -> Digest { self.digest }

    pub fn short(&self) -> String { self.digest.short() }

    /// `<hex><ext>`; `ext` incluye el punto (`".pdf"`).
    pub fn file_name(&self, ext: &str) -> String { format!("{}{ext}", self.digest.to_hex()) }
}

impl fmt::Display for CallFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.digest, f) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_sequence_of_hex_texts() {
        let hasher = RecordHasher::default();
        let args = vec![Value::from(1), Value::from("a")];
        let kwargs = Record::new().with("dpi", 300);
        let fp = CallFingerprint::compute(&hasher, &args, &kwargs).unwrap();

        let vh = hasher.value_hasher();
        let hexes = vec![
            Value::Text(vh.hash(&args[0]).unwrap().to_hex()),
            Value::Text(vh.hash(&args[1]).unwrap().to_hex()),
            Value::Text(hasher.hash_record(&kwargs, &[]).unwrap().to_hex()),
        ];
        assert_eq!(fp.digest(), vh.hash(&Value::Sequence(hexes)).unwrap());
    }

    #[test]
    fn kwargs_order_does_not_matter() {
        let hasher = RecordHasher::default();
        let a = Record::new().with("x", 1).with("y", 2.5);
        let b = Record::new().with("y", 2.5).with("x", 1);
        let fa = CallFingerprint::compute(&hasher, &[], &a).unwrap();
        let fb = CallFingerprint::compute(&hasher, &[], &b).unwrap();
        assert_eq!(fa, fb);
    }

    #[test]
    fn file_name_and_short() {
        let fp = CallFingerprint::compute(&RecordHasher::default(), &[Value::Null], &Record::new()).unwrap();
        assert_eq!(fp.short().len(), 7);
        assert!(fp.file_name(".pdf").ends_with(".pdf"));
        assert!(fp.file_name("").chars().all(|c| c.is_ascii_hexdigit()));
    }
}
