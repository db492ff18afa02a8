//! Observables over named engine state arrays.

use std::sync::Arc;

use tracing::debug;
use vantage_core::{
    ArraySpec, Dtype, EngineError, EngineState, FieldKind, Identifiers, NamedRead, ObsArray,
    ObservableError, Shape,
};

use crate::binding::{validate_element_binding, BindingTarget, ElementBinding};
use crate::observable::sealed::ObservableParts;
use crate::observable::{BoundObservation, Observable};
use crate::options::ObservableOptions;
use crate::resolve::resolve;

/// Derive the output spec of a named-array read.
///
/// A single identifier yields the per-element shape; a list of `n`
/// identifiers prepends a leading axis of length `n`. Named state is
/// always `f64`.
pub fn feature_spec(kind: &FieldKind, identifiers: &Identifiers) -> ArraySpec {
    let mut shape = Shape::new();
    if let Identifiers::Many(ids) = identifiers {
        shape.push(ids.len());
    }
    shape.extend_from_slice(kind.element_shape());
    ArraySpec {
        shape,
        dtype: Dtype::F64,
    }
}

/// Observes one field of one element, or stacks it over several.
///
/// # Examples
///
/// ```
/// use vantage_core::FieldKind;
/// use vantage_obs::{FeatureObservable, Observable};
/// use vantage_test_utils::fixture_scene;
///
/// let (scene, engine) = fixture_scene();
/// let hinge = scene.find("joint", "my_hinge").unwrap();
///
/// let obs = FeatureObservable::new(FieldKind::scalar("qpos"), hinge).unwrap();
/// let value = obs.observation_callable(&engine).call().unwrap();
/// assert_eq!(value, engine.row("qpos", "my_hinge").unwrap());
///
/// // Bare names are not elements.
/// assert!(FeatureObservable::new(FieldKind::scalar("qpos"), "my_hinge").is_err());
/// ```
#[derive(Debug)]
pub struct FeatureObservable {
    kind: FieldKind,
    binding: ElementBinding,
    spec: ArraySpec,
    options: ObservableOptions,
}

impl FeatureObservable {
    /// Observe `kind` on `target` with default options.
    pub fn new(kind: FieldKind, target: impl Into<BindingTarget>) -> Result<Self, ObservableError> {
        Self::with_options(kind, target, ObservableOptions::default())
    }

    /// Observe `kind` on `target` with explicit options.
    ///
    /// # Errors
    ///
    /// - [`ObservableError::BindingType`] if `target` is not an element
    ///   or a non-empty single-category sequence of elements.
    /// - [`ObservableError::InvalidOption`] if `options` fail validation.
    pub fn with_options(
        kind: FieldKind,
        target: impl Into<BindingTarget>,
        options: ObservableOptions,
    ) -> Result<Self, ObservableError> {
        let binding = validate_element_binding(&target.into())?;
        options.validate()?;
        let identifiers = resolve(&binding);
        let spec = feature_spec(&kind, &identifiers);
        debug!(
            kind = %kind,
            identifiers = %identifiers,
            spec = %spec,
            update_interval = %options.update_interval,
            "feature observable declared"
        );
        Ok(Self {
            kind,
            binding,
            spec,
            options,
        })
    }

    /// The observed field.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The validated binding.
    pub fn binding(&self) -> &ElementBinding {
        &self.binding
    }
}

impl ObservableParts for FeatureObservable {
    fn raw_reader(&self) -> Arc<dyn BoundObservation> {
        Arc::new(FeatureReader {
            kind: self.kind.clone(),
            binding: self.binding.clone(),
        })
    }

    fn options_slot(&mut self) -> &mut ObservableOptions {
        &mut self.options
    }
}

impl Observable for FeatureObservable {
    fn array_spec(&self) -> ArraySpec {
        self.spec.clone()
    }

    fn options(&self) -> &ObservableOptions {
        &self.options
    }
}

struct FeatureReader {
    kind: FieldKind,
    binding: ElementBinding,
}

impl BoundObservation for FeatureReader {
    fn read(&self, engine: &dyn EngineState) -> Result<ObsArray, EngineError> {
        let identifiers = resolve(&self.binding);
        let category = self.binding.category();
        engine.read_named(&NamedRead {
            field: &self.kind,
            category: &category,
            identifiers: &identifiers,
        })
    }
}
