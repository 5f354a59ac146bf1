//! Modelo de valores hasheables.
//!
//! `Value` es un enum cerrado: añadir un tipo nuevo obliga a darle regla de
//! hashing en `ValueHasher` (el `match` es exhaustivo). Los valores son
//! inmutables una vez construidos.

pub mod array;
pub mod json;
pub mod record;
pub mod table;

pub use array::{DType, Element, NumericArray};
pub use record::Record;
pub use table::{Column, Table};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    /// Se guarda en `i128` para poder representar (y rechazar) enteros que no
    /// caben en la codificación de 8 bytes.
    Integer(i128),
    Float(f64),
    Text(String),
    Sequence(Vec<Value>),
    Tuple(Vec<Value>),
    NumericArray(NumericArray),
    Table(Table),
    Mapping(Record),
}

impl Value {
    /// Nombre estable del tipo, para mensajes y trazas.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Sequence(_) => "sequence",
            Self::Tuple(_) => "tuple",
            Self::NumericArray(_) => "numeric_array",
            Self::Table(_) => "table",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn seq<I, V>(items: I) -> Self
        where I: IntoIterator<Item = V>,
              V: Into<Value>
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple<I, V>(items: I) -> Self
        where I: IntoIterator<Item = V>,
              V: Into<Value>
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self { Value::Integer(i128::from(v)) }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(v: usize) -> Self { Value::Integer(v as i128) }
}

/// Los booleanos se tratan como enteros 0/1.
impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Integer(i128::from(v)) }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Float(v) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Text(v.to_string()) }
}

impl From<String> for Value {
    fn from(v: String) -> Self { Value::Text(v) }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self { Value::Sequence(v) }
}

impl From<NumericArray> for Value {
    fn from(v: NumericArray) -> Self { Value::NumericArray(v) }
}

impl From<Table> for Value {
    fn from(v: Table) -> Self { Value::Table(v) }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self { Value::Mapping(v) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map_or(Value::Null, Into::into) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_expected_kind() {
        assert_eq!(Value::from(true).kind(), "integer");
        assert_eq!(Value::from(None::<i32>).kind(), "null");
        assert_eq!(Value::tuple([1, 2]).kind(), "tuple");
        assert_eq!(Value::from(Record::new()).kind(), "mapping");
        assert_eq!(Value::from(Table::new()).kind(), "table");
    }
}
