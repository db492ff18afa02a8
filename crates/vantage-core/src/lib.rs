//! Core types and traits for the Vantage observable layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by observables and their collaborators:
//! element categories, identifiers, field kinds, array specifications,
//! observation arrays, error types, and the scene and engine traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod error;
pub mod field;
pub mod id;
pub mod traits;

pub use array::{ArrayData, ArrayShapeError, ObsArray};
pub use error::{EngineError, ExpectedBinding, ObservableError};
pub use field::{ArraySpec, Dtype, FieldKind, RenderMode, Shape};
pub use id::{ElementCategory, Identifiers};
pub use traits::{ElementHandle, EngineState, NamedRead, RenderRequest, SceneElement};
