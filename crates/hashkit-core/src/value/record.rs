//! `Record`: mapping clave string -> `Value` con conjunto de exclusión propio.
//!
//! El orden de inserción se conserva para mostrar/iterar, pero no participa
//! en el digest (ver `RecordHasher`).

use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
    excluded: BTreeSet<String>,
}

impl Record {
    pub fn new() -> Self { Self::default() }

    /// Inserta o reemplaza; devuelve el valor previo si existía.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Variante encadenable de `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Marca `key` como excluida: se hashea como si no existiera.
    pub fn exclude(mut self, key: impl Into<String>) -> Self {
        self.excluded.insert(key.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> { self.fields.get(key) }

    pub fn contains_key(&self, key: &str) -> bool { self.fields.contains_key(key) }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.fields.keys().map(String::as_str) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> { self.fields.iter().map(|(k, v)| (k.as_str(), v)) }

    pub fn excluded(&self) -> &BTreeSet<String> { &self.excluded }

    pub fn is_excluded(&self, key: &str) -> bool { self.excluded.contains(key) }

    /// Copia sin las claves indicadas (y sin conjunto de exclusión).
    pub fn without(&self, keys: &[&str]) -> Self {
        let fields = self.fields
                         .iter()
                         .filter(|(k, _)| !keys.contains(&k.as_str()))
                         .map(|(k, v)| (k.clone(), v.clone()))
                         .collect();
        Self { fields, excluded: BTreeSet::new() }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
