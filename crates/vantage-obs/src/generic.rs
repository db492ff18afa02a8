//! Observables backed by an arbitrary read function.

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use vantage_core::{ArraySpec, EngineError, EngineState, ObsArray, ObservableError};

use crate::observable::sealed::ObservableParts;
use crate::observable::{BoundObservation, Observable};
use crate::options::ObservableOptions;

/// A caller-supplied read over the engine state.
pub type ObservationFn =
    Arc<dyn Fn(&dyn EngineState) -> Result<ObsArray, EngineError> + Send + Sync>;

/// Observes a derived quantity that is not a single named array,
/// e.g. the distance between two bodies.
///
/// The caller declares the output [`ArraySpec`]; the observable does
/// not verify reads against it.
pub struct GenericObservable {
    function: ObservationFn,
    spec: ArraySpec,
    options: ObservableOptions,
}

impl GenericObservable {
    /// Wrap `function`, declaring its output `spec`, with default options.
    pub fn new<F>(spec: ArraySpec, function: F) -> Result<Self, ObservableError>
    where
        F: Fn(&dyn EngineState) -> Result<ObsArray, EngineError> + Send + Sync + 'static,
    {
        Self::with_options(spec, function, ObservableOptions::default())
    }

    /// Wrap `function` with explicit options.
    pub fn with_options<F>(
        spec: ArraySpec,
        function: F,
        options: ObservableOptions,
    ) -> Result<Self, ObservableError>
    where
        F: Fn(&dyn EngineState) -> Result<ObsArray, EngineError> + Send + Sync + 'static,
    {
        options.validate()?;
        debug!(
            spec = %spec,
            update_interval = %options.update_interval,
            "generic observable declared"
        );
        Ok(Self {
            function: Arc::new(function),
            spec,
            options,
        })
    }
}

impl fmt::Debug for GenericObservable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericObservable")
            .field("spec", &self.spec)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ObservableParts for GenericObservable {
    fn raw_reader(&self) -> Arc<dyn BoundObservation> {
        Arc::new(FnReader(Arc::clone(&self.function)))
    }

    fn options_slot(&mut self) -> &mut ObservableOptions {
        &mut self.options
    }
}

impl Observable for GenericObservable {
    fn array_spec(&self) -> ArraySpec {
        self.spec.clone()
    }

    fn options(&self) -> &ObservableOptions {
        &self.options
    }
}

struct FnReader(ObservationFn);

impl BoundObservation for FnReader {
    fn read(&self, engine: &dyn EngineState) -> Result<ObsArray, EngineError> {
        (self.0)(engine)
    }
}
