//! Collaborator traits: the scene model and the simulation engine.
//!
//! The observable layer consumes exactly three capabilities through
//! these traits: resolve an element to a stable identifier, index a
//! named state array by identifiers, and render from a camera.

use std::fmt;
use std::sync::Arc;

use crate::array::ObsArray;
use crate::error::EngineError;
use crate::field::{FieldKind, RenderMode};
use crate::id::{ElementCategory, Identifiers};

/// A node in the scene description (joint, body, geom, camera, ...).
///
/// Implemented by the scene model. Observables only ever ask for the
/// category and the identifier; they never mutate an element.
pub trait SceneElement: fmt::Debug + Send + Sync {
    /// The element's category (its tag in the scene model).
    fn category(&self) -> ElementCategory;

    /// Stable identifier used to index engine state, e.g. `"arm/my_hinge"`.
    fn full_identifier(&self) -> String;
}

/// Shared handle to a scene element owned by the scene model.
pub type ElementHandle = Arc<dyn SceneElement>;

/// A request to index one named state array.
#[derive(Clone, Copy, Debug)]
pub struct NamedRead<'a> {
    /// Which array to read.
    pub field: &'a FieldKind,
    /// Category of every bound element. Engines that namespace arrays
    /// by element type (`geom_xpos` vs `xpos`) select on this.
    pub category: &'a ElementCategory,
    /// Identifiers to index by, in binding order.
    pub identifiers: &'a Identifiers,
}

/// A request to render one image.
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    /// Identifier of the camera to render from.
    pub camera: &'a str,
    /// Image height in pixels.
    pub height: usize,
    /// Image width in pixels.
    pub width: usize,
    /// What to render.
    pub mode: RenderMode,
}

/// Live, mutable simulation state as seen by an observation call.
///
/// Implementations must return, for [`Identifiers::One`], the
/// per-element slice of the array and, for [`Identifiers::Many`], the
/// per-element slices stacked along a new leading axis in identifier
/// order.
pub trait EngineState {
    /// Index a named state array.
    fn read_named(&self, read: &NamedRead<'_>) -> Result<ObsArray, EngineError>;

    /// Render an image of the requested size from a camera.
    fn render(&self, request: &RenderRequest<'_>) -> Result<ObsArray, EngineError>;
}
