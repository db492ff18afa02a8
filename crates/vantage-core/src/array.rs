//! Owned observation arrays: a flat row-major buffer plus a shape.

use std::error::Error;
use std::fmt;

use crate::field::{ArraySpec, Dtype, Shape};

/// Typed, flat, row-major storage for an [`ObsArray`].
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    /// 64-bit floats.
    F64(Vec<f64>),
    /// 32-bit floats.
    F32(Vec<f32>),
    /// Unsigned bytes.
    U8(Vec<u8>),
    /// 32-bit signed integers.
    I32(Vec<i32>),
}

impl ArrayData {
    /// Number of stored elements.
    pub fn len(&self) -> usize {
        match self {
            Self::F64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::U8(v) => v.len(),
            Self::I32(v) => v.len(),
        }
    }

    /// Returns `true` if no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type of the storage.
    pub fn dtype(&self) -> Dtype {
        match self {
            Self::F64(_) => Dtype::F64,
            Self::F32(_) => Dtype::F32,
            Self::U8(_) => Dtype::U8,
            Self::I32(_) => Dtype::I32,
        }
    }

    fn empty_like(&self, capacity: usize) -> Self {
        match self {
            Self::F64(_) => Self::F64(Vec::with_capacity(capacity)),
            Self::F32(_) => Self::F32(Vec::with_capacity(capacity)),
            Self::U8(_) => Self::U8(Vec::with_capacity(capacity)),
            Self::I32(_) => Self::I32(Vec::with_capacity(capacity)),
        }
    }

    /// Append `other` to `self`. Returns `false` on dtype mismatch.
    fn extend_from(&mut self, other: &Self) -> bool {
        match (self, other) {
            (Self::F64(a), Self::F64(b)) => a.extend_from_slice(b),
            (Self::F32(a), Self::F32(b)) => a.extend_from_slice(b),
            (Self::U8(a), Self::U8(b)) => a.extend_from_slice(b),
            (Self::I32(a), Self::I32(b)) => a.extend_from_slice(b),
            _ => return false,
        }
        true
    }
}

/// Shape and storage disagree, or stacked rows are incompatible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayShapeError {
    /// The shape's element count differs from the storage length.
    LengthMismatch {
        /// Elements implied by the shape.
        expected: usize,
        /// Elements actually stored.
        actual: usize,
    },
    /// Rows passed to [`ObsArray::stack`] differ in shape or dtype.
    RowMismatch {
        /// Index of the first offending row.
        row: usize,
    },
    /// [`ObsArray::stack`] was given no rows.
    NoRows,
}

impl fmt::Display for ArrayShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "shape implies {expected} elements, storage has {actual}")
            }
            Self::RowMismatch { row } => {
                write!(f, "row {row} differs in shape or dtype from row 0")
            }
            Self::NoRows => write!(f, "cannot stack zero rows"),
        }
    }
}

impl Error for ArrayShapeError {}

/// An observation value: typed flat storage with a row-major shape.
///
/// # Examples
///
/// ```
/// use vantage_core::{ArrayData, Dtype, ObsArray};
///
/// let a = ObsArray::new(&[2, 3], ArrayData::F64(vec![0.0; 6])).unwrap();
/// assert_eq!(a.shape(), &[2, 3]);
/// assert_eq!(a.dtype(), Dtype::F64);
///
/// assert!(ObsArray::new(&[2, 3], ArrayData::F64(vec![0.0; 5])).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ObsArray {
    shape: Shape,
    data: ArrayData,
}

impl ObsArray {
    /// Wrap `data` with `shape`, checking that the element counts agree.
    pub fn new(shape: &[usize], data: ArrayData) -> Result<Self, ArrayShapeError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(ArrayShapeError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            shape: Shape::from_slice(shape),
            data,
        })
    }

    /// A zero-dimensional `f64` array.
    pub fn scalar(value: f64) -> Self {
        Self {
            shape: Shape::new(),
            data: ArrayData::F64(vec![value]),
        }
    }

    /// A one-dimensional `f64` array.
    pub fn from_f64(values: Vec<f64>) -> Self {
        let mut shape = Shape::new();
        shape.push(values.len());
        Self {
            shape,
            data: ArrayData::F64(values),
        }
    }

    /// Stack equally-shaped rows along a new leading axis.
    pub fn stack(rows: &[ObsArray]) -> Result<Self, ArrayShapeError> {
        let first = rows.first().ok_or(ArrayShapeError::NoRows)?;
        let mut data = first.data.empty_like(first.data.len() * rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.shape != first.shape || !data.extend_from(&row.data) {
                return Err(ArrayShapeError::RowMismatch { row: i });
            }
        }
        let mut shape = Shape::with_capacity(first.shape.len() + 1);
        shape.push(rows.len());
        shape.extend_from_slice(&first.shape);
        Ok(Self { shape, data })
    }

    /// Shape, outermost axis first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Element type.
    pub fn dtype(&self) -> Dtype {
        self.data.dtype()
    }

    /// The `(shape, dtype)` of this array.
    pub fn spec(&self) -> ArraySpec {
        ArraySpec {
            shape: self.shape.clone(),
            dtype: self.dtype(),
        }
    }

    /// Typed storage.
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Mutable typed storage. The length must not change.
    pub fn data_mut(&mut self) -> &mut ArrayData {
        &mut self.data
    }

    /// Consume the array, returning its storage.
    pub fn into_data(self) -> ArrayData {
        self.data
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Storage as `f64`, if that is the dtype.
    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.data {
            ArrayData::F64(v) => Some(v),
            _ => None,
        }
    }

    /// Storage as `f32`, if that is the dtype.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.data {
            ArrayData::F32(v) => Some(v),
            _ => None,
        }
    }

    /// Storage as `u8`, if that is the dtype.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.data {
            ArrayData::U8(v) => Some(v),
            _ => None,
        }
    }

    /// Storage as `i32`, if that is the dtype.
    pub fn as_i32(&self) -> Option<&[i32]> {
        match &self.data {
            ArrayData::I32(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_has_empty_shape() {
        let s = ObsArray::scalar(0.5);
        assert!(s.shape().is_empty());
        assert_eq!(s.as_f64(), Some(&[0.5][..]));
        assert_eq!(s.spec(), ArraySpec::new(&[], Dtype::F64));
    }

    #[test]
    fn stack_prepends_row_axis_in_order() {
        let a = ObsArray::from_f64(vec![1.0, 2.0, 3.0]);
        let b = ObsArray::from_f64(vec![4.0, 5.0, 6.0]);
        let s = ObsArray::stack(&[a, b]).unwrap();
        assert_eq!(s.shape(), &[2, 3]);
        assert_eq!(s.as_f64().unwrap(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn stack_scalars_gives_vector() {
        let s = ObsArray::stack(&[ObsArray::scalar(1.0), ObsArray::scalar(2.0)]).unwrap();
        assert_eq!(s.shape(), &[2]);
    }

    #[test]
    fn stack_rejects_mismatched_rows() {
        let a = ObsArray::from_f64(vec![1.0, 2.0]);
        let b = ObsArray::from_f64(vec![1.0]);
        assert_eq!(
            ObsArray::stack(&[a.clone(), b]),
            Err(ArrayShapeError::RowMismatch { row: 1 })
        );

        let c = ObsArray::new(&[2], ArrayData::F32(vec![1.0, 2.0])).unwrap();
        assert_eq!(
            ObsArray::stack(&[a, c]),
            Err(ArrayShapeError::RowMismatch { row: 1 })
        );
        assert_eq!(ObsArray::stack(&[]), Err(ArrayShapeError::NoRows));
    }

    #[test]
    fn typed_accessors_match_dtype() {
        let img = ObsArray::new(&[1, 2, 3], ArrayData::U8(vec![7; 6])).unwrap();
        assert_eq!(img.dtype(), Dtype::U8);
        assert!(img.as_u8().is_some());
        assert!(img.as_f64().is_none());
        assert!(img.as_f32().is_none());
        assert!(img.as_i32().is_none());
        assert_eq!(img.len(), 6);
    }
}
