//! Conversión desde documentos `serde_json::Value`.
//!
//! null -> Null, bool -> Integer(0/1), enteros -> Integer, resto de números ->
//! Float, string -> Text, array -> Sequence, objeto -> Mapping.

use serde_json::Value as Json;

use super::{Record, Value};
use crate::errors::HashError;

impl TryFrom<&Json> for Value {
    type Error = HashError;

    fn try_from(json: &Json) -> Result<Self, Self::Error> {
        Ok(match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::from(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Integer(i128::from(u))
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    return Err(HashError::UnsupportedKind(format!("json number {n}")));
                }
            }
            Json::String(s) => Value::Text(s.clone()),
            Json::Array(items) => Value::Sequence(items.iter().map(Value::try_from).collect::<Result<_, _>>()?),
            Json::Object(_) => Value::Mapping(Record::try_from(json)?),
        })
    }
}

impl TryFrom<&Json> for Record {
    type Error = HashError;

    fn try_from(json: &Json) -> Result<Self, Self::Error> {
        let Json::Object(map) = json else {
            return Err(HashError::UnsupportedKind(format!("record from json {}", json_kind(json))));
        };
        let mut record = Record::new();
        for (k, v) in map {
            record.insert(k.clone(), Value::try_from(v)?);
        }
        Ok(record)
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
