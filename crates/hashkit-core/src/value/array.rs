//! Arrays numéricos n-dimensionales.
//!
//! Un `NumericArray` guarda su buffer crudo (little-endian, el orden nativo de
//! numpy) más shape y dtype. Puede ser una vista con strides arbitrarios; antes
//! de hashear se linealiza en orden C (row-major).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::HashError;

/// Tipo de elemento de un array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl DType {
    /// Bytes por elemento.
    pub fn itemsize(&self) -> usize {
        match self {
            Self::Bool | Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Acepta nombres (`float64`) y códigos de tipo (`<f8`, `i4`, `?`).
/// Los dtypes big-endian y los no numéricos no están soportados.
impl FromStr for DType {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.starts_with('>') {
            return Err(HashError::UnsupportedKind(format!("big-endian dtype '{code}'")));
        }
        let code = code.trim_start_matches(['<', '=', '|']);
        let dtype = match code {
            "bool" | "?" | "b1" => Self::Bool,
            "int8" | "i1" => Self::Int8,
            "int16" | "i2" => Self::Int16,
            "int32" | "i4" => Self::Int32,
            "int64" | "i8" | "int" => Self::Int64,
            "uint8" | "u1" => Self::UInt8,
            "uint16" | "u2" => Self::UInt16,
            "uint32" | "u4" => Self::UInt32,
            "uint64" | "u8" => Self::UInt64,
            "float32" | "f4" => Self::Float32,
            "float64" | "f8" | "float" => Self::Float64,
            _ => return Err(HashError::UnsupportedKind(format!("dtype '{s}'"))),
        };
        Ok(dtype)
    }
}

/// Tipos Rust que pueden volcarse en un `NumericArray`.
pub trait Element: Copy {
    const DTYPE: DType;
    fn write_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_element {
    ($($t:ty => $d:ident),* $(,)?) => {
        $(impl Element for $t {
            const DTYPE: DType = DType::$d;
            fn write_le(self, out: &mut Vec<u8>) { out.extend_from_slice(&self.to_le_bytes()); }
        })*
    };
}

impl_element!(
    i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64,
    u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64,
    f32 => Float32, f64 => Float64,
);

impl Element for bool {
    const DTYPE: DType = DType::Bool;
    fn write_le(self, out: &mut Vec<u8>) { out.push(u8::from(self)); }
}

/// Vista con strides en bytes sobre el buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Strided {
    offset: usize,
    strides: Vec<isize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    shape: Vec<usize>,
    dtype: DType,
    data: Vec<u8>,
    layout: Option<Strided>,
}

impl NumericArray {
    /// Array contiguo a partir de su buffer crudo en orden C.
    pub fn from_bytes(shape: Vec<usize>, dtype: DType, data: Vec<u8>) -> Result<Self, HashError> {
        let expected = checked_byte_len(&shape, dtype)?;
        if data.len() != expected {
            return Err(HashError::ShapeMismatch { context: "array buffer".into(), expected, found: data.len() });
        }
        Ok(Self { shape, dtype, data, layout: None })
    }

    pub fn from_slice<T: Element>(shape: Vec<usize>, values: &[T]) -> Result<Self, HashError> {
        let bytes = checked_byte_len(&shape, T::DTYPE)?;
        let expected = numel(&shape);
        if values.len() != expected {
            return Err(HashError::ShapeMismatch { context: "array elements".into(), expected, found: values.len() });
        }
        let mut data = Vec::with_capacity(bytes);
        for v in values {
            v.write_le(&mut data);
        }
        Ok(Self { shape, dtype: T::DTYPE, data, layout: None })
    }

    /// Array 1-D.
    pub fn vector<T: Element>(values: &[T]) -> Self {
        let mut data = Vec::with_capacity(values.len() * T::DTYPE.itemsize());
        for v in values {
            v.write_le(&mut data);
        }
        Self { shape: vec![values.len()], dtype: T::DTYPE, data, layout: None }
    }

    pub fn zeros(shape: Vec<usize>, dtype: DType) -> Result<Self, HashError> {
        let data = vec![0u8; checked_byte_len(&shape, dtype)?];
        Ok(Self { shape, dtype, data, layout: None })
    }

    /// Vista con `offset` y `strides` en bytes sobre `data`. Falla con
    /// `HashError::Contiguity` si la vista direcciona fuera del buffer o si
    /// sus extremos no son representables.
    pub fn strided(shape: Vec<usize>,
                   dtype: DType,
                   data: Vec<u8>,
                   offset: usize,
                   strides: Vec<isize>)
                   -> Result<Self, HashError> {
        if strides.len() != shape.len() {
            return Err(HashError::Contiguity(format!("{} strides for {} dimensions", strides.len(), shape.len())));
        }
        checked_byte_len(&shape, dtype)?;
        if numel(&shape) > 0 {
            let (lo, end) = view_extent(&shape, &strides, offset, dtype.itemsize())
                .ok_or_else(|| HashError::Contiguity(format!("view with strides {strides:?} and offset {offset} overflows")))?;
            if lo < 0 || end > data.len() as isize {
                return Err(HashError::Contiguity(format!("view spans bytes [{lo}, {end}) of a {}-byte buffer", data.len())));
            }
        }
        Ok(Self { shape, dtype, data, layout: Some(Strided { offset, strides }) })
    }

    pub fn shape(&self) -> &[usize] { &self.shape }
    pub fn dtype(&self) -> DType { self.dtype }
    pub fn ndim(&self) -> usize { self.shape.len() }
    pub fn numel(&self) -> usize { numel(&self.shape) }

    /// Strides efectivos en bytes.
    pub fn strides(&self) -> Vec<isize> {
        match &self.layout {
            Some(l) => l.strides.clone(),
            None => c_strides(&self.shape, self.dtype.itemsize()),
        }
    }

    pub fn is_contiguous(&self) -> bool {
        match &self.layout {
            None => true,
            Some(l) => {
                l.offset == 0
                && self.data.len() == self.numel() * self.dtype.itemsize()
                && l.strides == c_strides(&self.shape, self.dtype.itemsize())
            }
        }
    }

    /// Vista transpuesta (ejes invertidos) sobre el mismo buffer.
    pub fn transposed(&self) -> Self {
        let mut shape = self.shape.clone();
        shape.reverse();
        let mut strides = self.strides();
        strides.reverse();
        let offset = self.layout.as_ref().map_or(0, |l| l.offset);
        Self { shape, dtype: self.dtype, data: self.data.clone(), layout: Some(Strided { offset, strides }) }
    }

    /// Bytes en orden C. Sólo copia si la vista no es contigua.
    pub fn contiguous_bytes(&self) -> Cow<'_, [u8]> {
        let Some(layout) = self.layout.as_ref().filter(|_| !self.is_contiguous()) else {
            return Cow::Borrowed(&self.data);
        };
        let item = self.dtype.itemsize();
        let total = self.numel();
        debug!("linearizing strided array shape={:?} dtype={} ({} bytes)", self.shape, self.dtype, total * item);
        let mut out = Vec::with_capacity(total * item);
        if total == 0 {
            return Cow::Owned(out);
        }
        let mut index = vec![0usize; self.shape.len()];
        for _ in 0..total {
            let pos = layout.offset as isize
                      + index.iter().zip(&layout.strides).map(|(&i, &s)| i as isize * s).sum::<isize>();
            let pos = pos as usize;
            out.extend_from_slice(&self.data[pos..pos + item]);
            // odómetro row-major: el último eje avanza primero
            for axis in (0..index.len()).rev() {
                index[axis] += 1;
                if index[axis] < self.shape[axis] {
                    break;
                }
                index[axis] = 0;
            }
        }
        Cow::Owned(out)
    }

    /// Cabecera `shape|dtype|` usada por el modo estricto.
    pub fn metadata_header(&self) -> String {
        let dims: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
        format!("{}|{}|", dims.join("x"), self.dtype)
    }
}

// Sólo sobre shapes ya validadas por `checked_byte_len`.
fn numel(shape: &[usize]) -> usize { shape.iter().product() }

/// Bytes de un buffer contiguo con `shape`; debe caber en `isize`.
fn checked_byte_len(shape: &[usize], dtype: DType) -> Result<usize, HashError> {
    shape.iter()
         .try_fold(1usize, |acc, &d| acc.checked_mul(d))
         .and_then(|n| n.checked_mul(dtype.itemsize()))
         .filter(|&bytes| isize::try_from(bytes).is_ok())
         .ok_or_else(|| HashError::Contiguity(format!("shape {shape:?} of {dtype} exceeds the addressable size")))
}

/// Rango de bytes `[lo, end)` que recorre una vista no vacía; `None` si desborda.
fn view_extent(shape: &[usize], strides: &[isize], offset: usize, itemsize: usize) -> Option<(isize, isize)> {
    let start = isize::try_from(offset).ok()?;
    let (mut lo, mut hi) = (start, start);
    for (&n, &s) in shape.iter().zip(strides) {
        let span = s.checked_mul(isize::try_from(n - 1).ok()?)?;
        if span < 0 {
            lo = lo.checked_add(span)?;
        } else {
            hi = hi.checked_add(span)?;
        }
    }
    let end = hi.checked_add(isize::try_from(itemsize).ok()?)?;
    Some((lo, end))
}

fn c_strides(shape: &[usize], itemsize: usize) -> Vec<isize> {
    let mut strides = vec![0isize; shape.len()];
    let mut acc = itemsize as isize;
    for axis in (0..shape.len()).rev() {
        strides[axis] = acc;
        acc *= shape[axis] as isize;
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_float64_buffer() {
        let a = NumericArray::zeros(vec![10], DType::Float64).unwrap();
        assert_eq!(a.contiguous_bytes().len(), 80);
        assert!(a.is_contiguous());
    }

    #[test]
    fn from_bytes_checks_length() {
        let err = NumericArray::from_bytes(vec![2, 2], DType::Int32, vec![0; 15]).unwrap_err();
        assert_eq!(err, HashError::ShapeMismatch { context: "array buffer".into(), expected: 16, found: 15 });
    }

    #[test]
    fn transposed_view_is_linearized() {
        // [[1, 2, 3], [4, 5, 6]] -> T = [[1, 4], [2, 5], [3, 6]]
        let a = NumericArray::from_slice(vec![2, 3], &[1u8, 2, 3, 4, 5, 6]).unwrap();
        let t = a.transposed();
        assert_eq!(t.shape(), &[3, 2]);
        assert!(!t.is_contiguous());
        assert_eq!(t.contiguous_bytes().as_ref(), &[1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn negative_strides_reverse() {
        let a = NumericArray::strided(vec![3], DType::UInt8, vec![7, 8, 9], 2, vec![-1]).unwrap();
        assert_eq!(a.contiguous_bytes().as_ref(), &[9, 8, 7]);
    }

    #[test]
    fn out_of_bounds_view_is_rejected() {
        let err = NumericArray::strided(vec![4], DType::UInt16, vec![0; 6], 0, vec![2]).unwrap_err();
        assert!(matches!(err, HashError::Contiguity(_)));
        let err = NumericArray::strided(vec![2], DType::UInt8, vec![0; 2], 0, vec![1, 1]).unwrap_err();
        assert!(matches!(err, HashError::Contiguity(_)));
    }

    #[test]
    fn extreme_strides_are_rejected() {
        let err = NumericArray::strided(vec![2], DType::UInt8, vec![0; 2], 0, vec![isize::MAX]).unwrap_err();
        assert!(matches!(err, HashError::Contiguity(_)));
        let err = NumericArray::strided(vec![3], DType::UInt8, vec![0; 2], 1, vec![isize::MIN]).unwrap_err();
        assert!(matches!(err, HashError::Contiguity(_)));
        let err = NumericArray::strided(vec![1], DType::Float64, vec![0; 8], usize::MAX, vec![8]).unwrap_err();
        assert!(matches!(err, HashError::Contiguity(_)));
    }

    #[test]
    fn oversized_shapes_are_rejected() {
        let err = NumericArray::from_bytes(vec![usize::MAX, 2], DType::UInt8, vec![]).unwrap_err();
        assert!(matches!(err, HashError::Contiguity(_)));
        assert!(matches!(NumericArray::zeros(vec![usize::MAX / 4], DType::Float64), Err(HashError::Contiguity(_))));
        assert!(matches!(NumericArray::from_slice::<u8>(vec![usize::MAX, usize::MAX], &[]), Err(HashError::Contiguity(_))));
        let err = NumericArray::strided(vec![usize::MAX / 2 + 1, 2], DType::UInt8, vec![0], 0, vec![0, 0]).unwrap_err();
        assert!(matches!(err, HashError::Contiguity(_)));
    }

    #[test]
    fn explicit_c_strides_count_as_contiguous() {
        let a = NumericArray::strided(vec![2, 2], DType::Int16, vec![0; 8], 0, vec![4, 2]).unwrap();
        assert!(a.is_contiguous());
        assert!(matches!(a.contiguous_bytes(), Cow::Borrowed(_)));
    }

    #[test]
    fn dtype_parsing() {
        assert_eq!("<f8".parse::<DType>().unwrap(), DType::Float64);
        assert_eq!("int32".parse::<DType>().unwrap(), DType::Int32);
        assert_eq!("|b1".parse::<DType>().unwrap(), DType::Bool);
        assert!(matches!(">f8".parse::<DType>(), Err(HashError::UnsupportedKind(_))));
        assert!(matches!("complex128".parse::<DType>(), Err(HashError::UnsupportedKind(_))));
    }

    #[test]
    fn header_lists_shape_and_dtype() {
        let a = NumericArray::zeros(vec![2, 3], DType::Int32).unwrap();
        assert_eq!(a.metadata_header(), "2x3|int32|");
    }
}
