//! Field kinds, dtypes, render modes, and the [`ArraySpec`] contract.

use smallvec::SmallVec;
use std::fmt;

/// Shape of an observation array, outermost axis first.
///
/// Uses `SmallVec<[usize; 4]>` so every shape the layer produces
/// (scalars, vectors, stacked vectors, images) stays on the stack.
pub type Shape = SmallVec<[usize; 4]>;

/// Element type of an observation array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dtype {
    /// 64-bit float. Named engine state arrays use this.
    F64,
    /// 32-bit float. Depth renders use this.
    F32,
    /// Unsigned byte. RGB renders use this.
    U8,
    /// 32-bit signed integer. Segmentation renders use this.
    I32,
}

impl Dtype {
    /// Size of one element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            Self::F64 => 8,
            Self::F32 | Self::I32 => 4,
            Self::U8 => 1,
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::F64 => "float64",
            Self::F32 => "float32",
            Self::U8 => "uint8",
            Self::I32 => "int32",
        };
        f.write_str(name)
    }
}

/// The `(shape, dtype)` contract describing an observable's output.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArraySpec {
    /// Output shape, outermost axis first. Empty for a scalar.
    pub shape: Shape,
    /// Output element type.
    pub dtype: Dtype,
}

impl ArraySpec {
    /// Build a spec from a shape slice and dtype.
    pub fn new(shape: &[usize], dtype: Dtype) -> Self {
        Self {
            shape: Shape::from_slice(shape),
            dtype,
        }
    }

    /// Total number of elements (product of the shape; 1 for a scalar).
    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Total size of the described array in bytes.
    pub fn size_bytes(&self) -> usize {
        self.element_count() * self.dtype.size_bytes()
    }
}

impl fmt::Display for ArraySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.shape.as_slice(), self.dtype)
    }
}

/// Selects which named engine state array a feature observable reads.
///
/// The name (`"qpos"`, `"xpos"`, ...) is opaque to the observable layer
/// and handed to the engine as-is. The per-element shape lets the
/// observable derive its [`ArraySpec`] without touching the engine.
///
/// # Examples
///
/// ```
/// use vantage_core::FieldKind;
///
/// let qpos = FieldKind::scalar("qpos");
/// assert!(qpos.element_shape().is_empty());
///
/// let xpos = FieldKind::vector("xpos", 3);
/// assert_eq!(xpos.name(), "xpos");
/// assert_eq!(xpos.element_shape(), &[3]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldKind {
    name: String,
    element_shape: Shape,
}

impl FieldKind {
    /// A field with an arbitrary per-element shape.
    pub fn new(name: impl Into<String>, element_shape: &[usize]) -> Self {
        Self {
            name: name.into(),
            element_shape: Shape::from_slice(element_shape),
        }
    }

    /// A field holding one value per element.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, &[])
    }

    /// A field holding a `dims`-vector per element.
    pub fn vector(name: impl Into<String>, dims: usize) -> Self {
        Self::new(name, &[dims])
    }

    /// The engine-side array name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape of one element's slice of the array.
    pub fn element_shape(&self) -> &[usize] {
        &self.element_shape
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What a camera render produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Colour image, `(height, width, 3)` bytes.
    #[default]
    Rgb,
    /// Depth buffer, `(height, width)` floats.
    Depth,
    /// Segmentation, `(height, width, 2)` ints: object id and object type.
    Segmentation,
}

impl RenderMode {
    /// Channel depth of the rendered image, or `None` for single-plane output.
    pub fn channels(self) -> Option<usize> {
        match self {
            Self::Rgb => Some(3),
            Self::Depth => None,
            Self::Segmentation => Some(2),
        }
    }

    /// Element type of the rendered image.
    pub fn dtype(self) -> Dtype {
        match self {
            Self::Rgb => Dtype::U8,
            Self::Depth => Dtype::F32,
            Self::Segmentation => Dtype::I32,
        }
    }
}
