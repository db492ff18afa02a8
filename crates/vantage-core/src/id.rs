//! Element categories and resolved identifiers.

use std::fmt;

/// Category of a scene element (the element's tag in the scene model).
///
/// The well-known categories get their own variants; anything else the
/// scene model reports is carried verbatim in [`ElementCategory::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    /// A rigid body.
    Body,
    /// A joint (degree-of-freedom source).
    Joint,
    /// A collision/visual geometry.
    Geom,
    /// A site (massless frame of interest).
    Site,
    /// A camera that can be rendered from.
    Camera,
    /// Any other category, by its tag name.
    Other(String),
}

impl ElementCategory {
    /// The tag name of this category, e.g. `"geom"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Body => "body",
            Self::Joint => "joint",
            Self::Geom => "geom",
            Self::Site => "site",
            Self::Camera => "camera",
            Self::Other(name) => name,
        }
    }

    /// Returns `true` for [`ElementCategory::Camera`].
    pub fn is_camera(&self) -> bool {
        matches!(self, Self::Camera)
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ElementCategory {
    fn from(tag: &str) -> Self {
        match tag {
            "body" => Self::Body,
            "joint" => Self::Joint,
            "geom" => Self::Geom,
            "site" => Self::Site,
            "camera" => Self::Camera,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Identifiers resolved from an element binding, in binding order.
///
/// `One` comes from a single-element binding and indexes a per-element
/// slice; `Many` comes from a sequence binding and indexes a stacked
/// array whose leading axis has one row per identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identifiers {
    /// A single identifier.
    One(String),
    /// An ordered, non-empty list of identifiers.
    Many(Vec<String>),
}

impl Identifiers {
    /// Number of identifiers.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(ids) => ids.len(),
        }
    }

    /// Always `false` for identifiers produced from a validated binding.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the identifiers in binding order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(id) => std::slice::from_ref(id),
            Self::Many(ids) => ids,
        };
        slice.iter().map(String::as_str)
    }
}

impl fmt::Display for Identifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(id) => write!(f, "'{id}'"),
            Self::Many(ids) => {
                f.write_str("[")?;
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{id}'")?;
                }
                f.write_str("]")
            }
        }
    }
}
