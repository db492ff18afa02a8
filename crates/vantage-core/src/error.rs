//! Error types for the Vantage observable layer.
//!
//! Two layers: [`ObservableError`] is raised synchronously while an
//! observable is being declared or reconfigured, so a constructed
//! observable is always well-formed. [`EngineError`] belongs to the
//! engine collaborator and passes through observation calls unmodified.

use std::error::Error;
use std::fmt;

use crate::array::ArrayShapeError;

/// Which binding contract a rejected target violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedBinding {
    /// A scene element or a non-empty sequence of scene elements.
    Element,
    /// Exactly one element whose category is `camera`.
    Camera,
    /// A sequence whose elements all share one category.
    SingleCategory,
}

impl fmt::Display for ExpectedBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element => write!(f, "expected an element"),
            Self::Camera => write!(f, "expected a camera element"),
            Self::SingleCategory => write!(f, "expected elements of a single category"),
        }
    }
}

/// Errors raised while constructing or reconfiguring an observable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObservableError {
    /// The binding target is not an acceptable element binding.
    BindingType {
        /// Description of the offending value.
        found: String,
        /// The contract it violated.
        expected: ExpectedBinding,
    },
    /// Update interval is not a positive integer.
    InvalidInterval {
        /// The rejected value.
        value: u32,
    },
    /// A camera dimension is not a positive integer.
    InvalidDimension {
        /// `"height"` or `"width"`.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },
    /// An observable option failed validation.
    InvalidOption {
        /// Description of which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for ObservableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BindingType { found, expected } => write!(f, "{expected}, got {found}"),
            Self::InvalidInterval { value } => {
                write!(f, "update_interval must be a positive integer, got {value}")
            }
            Self::InvalidDimension { name, value } => {
                write!(f, "{name} must be a positive integer, got {value}")
            }
            Self::InvalidOption { reason } => write!(f, "invalid observable option: {reason}"),
        }
    }
}

impl Error for ObservableError {}

/// Errors reported by the engine collaborator during a read or render.
///
/// Observables never construct, wrap, or retry these; a missing
/// identifier means the binding and the engine disagree, which no retry
/// can fix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// No named array exists for the requested field.
    UnknownField {
        /// The requested field name.
        field: String,
    },
    /// The named array has no entry for an identifier.
    UnknownIdentifier {
        /// The field being indexed.
        field: String,
        /// The identifier that was not found.
        identifier: String,
    },
    /// No camera is registered under the identifier.
    UnknownCamera {
        /// The camera identifier.
        camera: String,
    },
    /// The renderer failed.
    RenderFailed {
        /// Description of the failure.
        reason: String,
    },
    /// The engine produced an array whose shape and storage disagree.
    MalformedArray(ArrayShapeError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField { field } => write!(f, "no named array for field '{field}'"),
            Self::UnknownIdentifier { field, identifier } => {
                write!(f, "field '{field}' has no entry for '{identifier}'")
            }
            Self::UnknownCamera { camera } => write!(f, "no camera named '{camera}'"),
            Self::RenderFailed { reason } => write!(f, "render failed: {reason}"),
            Self::MalformedArray(e) => write!(f, "malformed array: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedArray(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArrayShapeError> for EngineError {
    fn from(e: ArrayShapeError) -> Self {
        Self::MalformedArray(e)
    }
}
