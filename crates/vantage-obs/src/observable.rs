//! The [`Observable`] contract and bound observation callables.
//!
//! Construction is phase one: bindings are validated and identifiers
//! fixed, with no engine access. Phase two is either
//! [`Observable::reader`], a detached reader taking the engine per call,
//! or [`Observable::observation_callable`], which pairs that reader with
//! a borrowed engine handle. Both apply the configured corruptor, and
//! both re-read the engine on every call; nothing is cached.

use std::fmt;
use std::sync::Arc;

use tracing::trace;
use vantage_core::{ArraySpec, EngineError, EngineState, ObsArray, ObservableError};

use crate::interval::UpdateInterval;
use crate::options::{Corruptor, ObservableOptions};

/// A value-type reader detached from any particular engine handle.
///
/// Schedulers that supply the engine per call can hold one of these
/// directly instead of an [`ObservationCallable`].
pub trait BoundObservation: Send + Sync {
    /// Read the observation from `engine`.
    fn read(&self, engine: &dyn EngineState) -> Result<ObsArray, EngineError>;
}

/// Applies a corruptor on top of a raw reader.
struct CorruptedReader {
    raw: Arc<dyn BoundObservation>,
    corruptor: Corruptor,
}

impl BoundObservation for CorruptedReader {
    fn read(&self, engine: &dyn EngineState) -> Result<ObsArray, EngineError> {
        let raw = self.raw.read(engine)?;
        Ok((self.corruptor)(raw))
    }
}

/// A zero-argument observation bound to a live engine handle.
///
/// Borrows the engine for `'e` and re-reads it on every [`call`](Self::call).
/// Engine errors pass through unmodified.
pub struct ObservationCallable<'e> {
    engine: &'e dyn EngineState,
    reader: Arc<dyn BoundObservation>,
}

impl<'e> ObservationCallable<'e> {
    /// Bind `reader` to `engine`.
    pub fn new(engine: &'e dyn EngineState, reader: Arc<dyn BoundObservation>) -> Self {
        Self { engine, reader }
    }

    /// Read the engine's current state.
    pub fn call(&self) -> Result<ObsArray, EngineError> {
        let value = self.reader.read(self.engine)?;
        trace!(shape = ?value.shape(), dtype = %value.dtype(), "observation read");
        Ok(value)
    }
}

impl fmt::Debug for ObservationCallable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationCallable").finish_non_exhaustive()
    }
}

pub(crate) mod sealed {
    use std::sync::Arc;

    use crate::observable::BoundObservation;
    use crate::options::ObservableOptions;

    /// Crate-internal access an observable grants to the provided
    /// methods of [`Observable`](crate::Observable).
    pub trait ObservableParts {
        /// Reader producing uncorrupted values. Shares any mutable
        /// configuration (camera size) with the observable.
        fn raw_reader(&self) -> Arc<dyn BoundObservation>;

        /// Options storage. Callers must keep it valid.
        fn options_slot(&mut self) -> &mut ObservableOptions;
    }
}

/// An observable quantity of the simulation.
///
/// Implemented by [`FeatureObservable`](crate::FeatureObservable),
/// [`CameraObservable`](crate::CameraObservable), and
/// [`GenericObservable`](crate::GenericObservable). Options change only
/// through the validated setters, so an observable's options always
/// pass [`ObservableOptions::validate`].
pub trait Observable: sealed::ObservableParts {
    /// The `(shape, dtype)` of this observable's output, as of now.
    fn array_spec(&self) -> ArraySpec;

    /// Policy values for the scheduler.
    fn options(&self) -> &ObservableOptions;

    /// A reader that evaluates this observable, corruptor included,
    /// against any engine handle.
    ///
    /// The reader shares mutable configuration (camera size) with the
    /// observable, so later resizes are seen by existing readers. The
    /// corruptor is captured when the reader is made.
    fn reader(&self) -> Arc<dyn BoundObservation> {
        let raw = self.raw_reader();
        match &self.options().corruptor {
            Some(corruptor) => Arc::new(CorruptedReader {
                raw,
                corruptor: Arc::clone(corruptor),
            }),
            None => raw,
        }
    }

    /// Bind this observable to a live engine handle.
    fn observation_callable<'e>(&self, engine: &'e dyn EngineState) -> ObservationCallable<'e> {
        ObservationCallable::new(engine, self.reader())
    }

    /// Ticks between recomputations.
    fn update_interval(&self) -> UpdateInterval {
        self.options().update_interval
    }

    /// Set the ticks between recomputations. Rejects zero and leaves the
    /// previous value in place.
    fn set_update_interval(&mut self, ticks: u32) -> Result<(), ObservableError> {
        self.options_slot().update_interval = UpdateInterval::new(ticks)?;
        Ok(())
    }

    /// Set how many past values the scheduler should retain. Rejects
    /// zero and leaves the previous value in place.
    fn set_buffer_size(&mut self, buffer_size: usize) -> Result<(), ObservableError> {
        let options = ObservableOptions {
            buffer_size,
            ..self.options().clone()
        };
        self.replace_options(options)
    }

    /// Set the delivery delay in ticks.
    fn set_delay(&mut self, delay: u32) {
        self.options_slot().delay = delay;
    }

    /// Whether the scheduler should poll this observable.
    fn enabled(&self) -> bool {
        self.options().enabled
    }

    /// Enable or disable polling by the scheduler.
    fn set_enabled(&mut self, enabled: bool) {
        self.options_slot().enabled = enabled;
    }

    /// Install or remove the corruptor. Readers and callables made
    /// afterwards use the new one.
    fn set_corruptor(&mut self, corruptor: Option<Corruptor>) {
        self.options_slot().corruptor = corruptor;
    }

    /// Replace all options at once. Invalid options are rejected and the
    /// previous ones kept.
    fn replace_options(&mut self, options: ObservableOptions) -> Result<(), ObservableError> {
        options.validate()?;
        *self.options_slot() = options;
        Ok(())
    }
}
