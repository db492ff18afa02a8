//! Scheduler-facing policy values carried by every observable.

use std::fmt;
use std::sync::Arc;

use vantage_core::{ObsArray, ObservableError};

use crate::interval::UpdateInterval;

/// A pure function applied to every raw read before it is returned,
/// e.g. additive noise, clipping, or masking.
pub type Corruptor = Arc<dyn Fn(ObsArray) -> ObsArray + Send + Sync>;

/// Policy values an observable stores for the external scheduler.
///
/// Only `corruptor` affects what an observation call returns; the other
/// fields are stored and exposed unmodified for the scheduler to
/// interpret.
#[derive(Clone)]
pub struct ObservableOptions {
    /// Ticks between recomputations. Default: 1.
    pub update_interval: UpdateInterval,
    /// Number of past values the scheduler should retain. Default: 1. Minimum: 1.
    pub buffer_size: usize,
    /// Ticks by which the scheduler should delay delivery. Default: 0.
    pub delay: u32,
    /// Whether the scheduler should poll this observable. Default: false.
    pub enabled: bool,
    /// Optional post-read transform. Default: none.
    pub corruptor: Option<Corruptor>,
}

impl Default for ObservableOptions {
    fn default() -> Self {
        Self {
            update_interval: UpdateInterval::default(),
            buffer_size: 1,
            delay: 0,
            enabled: false,
            corruptor: None,
        }
    }
}

impl fmt::Debug for ObservableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableOptions")
            .field("update_interval", &self.update_interval)
            .field("buffer_size", &self.buffer_size)
            .field("delay", &self.delay)
            .field("enabled", &self.enabled)
            .field("corruptor", &self.corruptor.as_ref().map(|_| ".."))
            .finish()
    }
}

impl ObservableOptions {
    /// Validate structural invariants.
    pub fn validate(&self) -> Result<(), ObservableError> {
        if self.buffer_size == 0 {
            return Err(ObservableError::InvalidOption {
                reason: "buffer_size must be at least 1".into(),
            });
        }
        Ok(())
    }
}
