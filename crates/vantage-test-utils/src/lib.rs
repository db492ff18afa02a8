//! Test utilities and mock types for Vantage development.
//!
//! Provides mock implementations of the collaborator traits
//! ([`SceneElement`], [`EngineState`]) and a standard fixture scene
//! ([`fixture_scene`]) for exercising observables.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::fixture_scene;

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use indexmap::IndexMap;
use smallvec::SmallVec;
use vantage_core::{
    ArrayData, ElementCategory, ElementHandle, EngineError, EngineState, Identifiers, NamedRead,
    ObsArray, RenderMode, RenderRequest, SceneElement,
};

/// Mock scene element: a category and a full identifier.
#[derive(Debug)]
pub struct MockElement {
    category: ElementCategory,
    identifier: String,
}

impl MockElement {
    pub fn new(category: impl Into<ElementCategory>, identifier: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            identifier: identifier.into(),
        }
    }
}

impl SceneElement for MockElement {
    fn category(&self) -> ElementCategory {
        self.category.clone()
    }

    fn full_identifier(&self) -> String {
        self.identifier.clone()
    }
}

/// Mock scene model.
///
/// Elements are keyed by `(category, name)`. A scene built with
/// [`with_prefix`](MockScene::with_prefix) namespaces every full
/// identifier as `"prefix/name"`, the way attached sub-models do.
#[derive(Debug, Default)]
pub struct MockScene {
    prefix: Option<String>,
    elements: IndexMap<(ElementCategory, String), ElementHandle>,
}

impl MockScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            elements: IndexMap::new(),
        }
    }

    /// Add an element, returning its handle. Re-adding replaces it.
    pub fn add(&mut self, category: &str, name: &str) -> ElementHandle {
        let identifier = match &self.prefix {
            Some(prefix) => format!("{prefix}/{name}"),
            None => name.to_string(),
        };
        let handle: ElementHandle = Arc::new(MockElement::new(category, identifier));
        self.elements.insert(
            (ElementCategory::from(category), name.to_string()),
            ElementHandle::clone(&handle),
        );
        handle
    }

    /// Look up an element by category tag and local name.
    pub fn find(&self, category: &str, name: &str) -> Option<ElementHandle> {
        self.elements
            .get(&(ElementCategory::from(category), name.to_string()))
            .cloned()
    }

    /// Number of elements in the scene.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[derive(Debug)]
struct NamedArray {
    element_shape: SmallVec<[usize; 4]>,
    rows: IndexMap<String, Vec<f64>>,
}

impl NamedArray {
    fn row(&self, identifier: &str) -> Option<ObsArray> {
        let values = self.rows.get(identifier)?;
        ObsArray::new(&self.element_shape, ArrayData::F64(values.clone())).ok()
    }
}

/// Mock engine backed by named `f64` arrays and a synthetic renderer.
///
/// State sits behind interior mutability so tests can mutate the engine
/// while an observation callable still borrows it. Named arrays are
/// resolved engine-style: a read of field `f` on category `c` looks for
/// an array named `"c_f"` first (e.g. `geom_xpos`), then `"f"`.
///
/// Renders are a deterministic function of camera, size, mode, and the
/// frame counter advanced by [`step`](MockEngine::step).
#[derive(Debug, Default)]
pub struct MockEngine {
    arrays: RefCell<IndexMap<String, NamedArray>>,
    cameras: RefCell<IndexMap<String, ()>>,
    frame: Cell<u64>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a named array with the given per-element shape.
    pub fn define_array(&self, name: &str, element_shape: &[usize]) {
        self.arrays.borrow_mut().insert(
            name.to_string(),
            NamedArray {
                element_shape: SmallVec::from_slice(element_shape),
                rows: IndexMap::new(),
            },
        );
    }

    /// Set one element's slice of a named array.
    ///
    /// # Panics
    ///
    /// If the array is undeclared or `values` does not match its
    /// per-element shape.
    pub fn set_row(&self, array: &str, identifier: &str, values: Vec<f64>) {
        let mut arrays = self.arrays.borrow_mut();
        let named = arrays
            .get_mut(array)
            .unwrap_or_else(|| panic!("array '{array}' not declared"));
        let expected: usize = named.element_shape.iter().product();
        assert_eq!(
            values.len(),
            expected,
            "row for '{identifier}' in '{array}' has wrong length"
        );
        named.rows.insert(identifier.to_string(), values);
    }

    /// Register a renderable camera.
    pub fn add_camera(&self, identifier: &str) {
        self.cameras.borrow_mut().insert(identifier.to_string(), ());
    }

    /// One element's slice of a named array, as the engine would return it.
    pub fn row(&self, array: &str, identifier: &str) -> Option<ObsArray> {
        self.arrays.borrow().get(array)?.row(identifier)
    }

    /// Several elements' slices stacked in the given order.
    pub fn rows(&self, array: &str, identifiers: &[&str]) -> Option<ObsArray> {
        let arrays = self.arrays.borrow();
        let named = arrays.get(array)?;
        let rows = identifiers
            .iter()
            .map(|id| named.row(id))
            .collect::<Option<Vec<_>>>()?;
        ObsArray::stack(&rows).ok()
    }

    /// Advance the simulation one frame: every named value moves by
    /// `0.01` and the render frame counter increments.
    pub fn step(&self) {
        for named in self.arrays.borrow_mut().values_mut() {
            for row in named.rows.values_mut() {
                row.iter_mut().for_each(|v| *v += 0.01);
            }
        }
        self.frame.set(self.frame.get() + 1);
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    fn array_name(&self, read: &NamedRead<'_>) -> Option<String> {
        let arrays = self.arrays.borrow();
        let prefixed = format!("{}_{}", read.category, read.field.name());
        if arrays.contains_key(&prefixed) {
            return Some(prefixed);
        }
        arrays
            .contains_key(read.field.name())
            .then(|| read.field.name().to_string())
    }
}

impl EngineState for MockEngine {
    fn read_named(&self, read: &NamedRead<'_>) -> Result<ObsArray, EngineError> {
        let field = self
            .array_name(read)
            .ok_or_else(|| EngineError::UnknownField {
                field: read.field.name().to_string(),
            })?;
        let arrays = self.arrays.borrow();
        let named = &arrays[&field];
        let lookup = |id: &str| {
            named.row(id).ok_or_else(|| EngineError::UnknownIdentifier {
                field: field.clone(),
                identifier: id.to_string(),
            })
        };
        match read.identifiers {
            Identifiers::One(id) => lookup(id.as_str()),
            Identifiers::Many(ids) => {
                let rows = ids
                    .iter()
                    .map(|id| lookup(id.as_str()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ObsArray::stack(&rows)?)
            }
        }
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<ObsArray, EngineError> {
        let seed = self
            .cameras
            .borrow()
            .get_index_of(request.camera)
            .ok_or_else(|| EngineError::UnknownCamera {
                camera: request.camera.to_string(),
            })?;
        let (h, w) = (request.height, request.width);
        let frame = self.frame.get() as usize;
        let data = match request.mode {
            RenderMode::Rgb => {
                let mut px = Vec::with_capacity(h * w * 3);
                for y in 0..h {
                    for x in 0..w {
                        for c in 0..3 {
                            px.push(((y * 7 + x * 3 + c * 11 + seed * 29 + frame) % 256) as u8);
                        }
                    }
                }
                ArrayData::U8(px)
            }
            RenderMode::Depth => ArrayData::F32(
                (0..h * w)
                    .map(|i| 1.0 + i as f32 * 1e-3 + frame as f32 * 0.1)
                    .collect(),
            ),
            RenderMode::Segmentation => {
                let mut px = Vec::with_capacity(h * w * 2);
                for y in 0..h {
                    for x in 0..w {
                        px.push(((x + y + seed) % 4) as i32);
                        px.push(5);
                    }
                }
                ArrayData::I32(px)
            }
        };
        let mut shape: SmallVec<[usize; 4]> = SmallVec::from_slice(&[h, w]);
        if let Some(channels) = request.mode.channels() {
            shape.push(channels);
        }
        Ok(ObsArray::new(&shape, data)?)
    }
}
