//! Datos tabulares: columnas con nombre, todas con el mismo número de filas.

use indexmap::IndexMap;

use super::array::NumericArray;
use crate::errors::HashError;
use crate::hashing::Digest;

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Columna numérica 1-D.
    Numeric(NumericArray),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(a) => a.shape().first().copied().unwrap_or(0),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl From<NumericArray> for Column {
    fn from(a: NumericArray) -> Self { Self::Numeric(a) }
}

impl From<Vec<String>> for Column {
    fn from(v: Vec<String>) -> Self { Self::Text(v) }
}

impl From<Vec<&str>> for Column {
    fn from(v: Vec<&str>) -> Self { Self::Text(v.into_iter().map(str::to_string).collect()) }
}

/// Tabla con columnas ordenadas por inserción y, opcionalmente, un vector
/// de digests por fila precalculado por el productor de la tabla.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Column>,
    row_hashes: Option<Vec<Digest>>,
}

impl Table {
    pub fn new() -> Self { Self::default() }

    /// Añade (o reemplaza) una columna validando su longitud contra el resto.
    pub fn with_column(mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<Self, HashError> {
        let name = name.into();
        let column = column.into();
        if let Column::Numeric(a) = &column {
            if a.ndim() != 1 {
                return Err(HashError::ShapeMismatch { context: format!("column '{name}' dimensions"), expected: 1, found: a.ndim() });
            }
        }
        if let Some(rows) = self.n_rows_excluding(&name) {
            if column.len() != rows {
                return Err(HashError::ShapeMismatch { context: format!("column '{name}'"), expected: rows, found: column.len() });
            }
        }
        self.columns.insert(name, column);
        self.check_row_hashes()?;
        Ok(self)
    }

    pub fn with_row_hashes(mut self, hashes: Vec<Digest>) -> Result<Self, HashError> {
        self.row_hashes = Some(hashes);
        self.check_row_hashes()?;
        Ok(self)
    }

    /// Número de filas; 0 si la tabla no tiene columnas.
    pub fn n_rows(&self) -> usize { self.columns.values().next().map_or(0, Column::len) }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn column(&self, name: &str) -> Option<&Column> { self.columns.get(name) }

    pub fn row_hashes(&self) -> Option<&[Digest]> { self.row_hashes.as_deref() }

    fn n_rows_excluding(&self, name: &str) -> Option<usize> {
        self.columns.iter().find(|(k, _)| k.as_str() != name).map(|(_, c)| c.len())
    }

    fn check_row_hashes(&self) -> Result<(), HashError> {
        match &self.row_hashes {
            Some(h) if !self.columns.is_empty() && h.len() != self.n_rows() => {
                Err(HashError::ShapeMismatch { context: "row hashes".into(), expected: self.n_rows(), found: h.len() })
            }
            _ => Ok(()),
        }
    }
}
