//! The update-interval policy value.

use std::fmt;
use std::num::NonZeroU32;

use vantage_core::ObservableError;

/// Number of scheduler ticks between recomputations of an observable.
///
/// A policy value only: the observable stores it and hands it back
/// verbatim. The scheduler decides what "every N ticks" means (counted
/// from the previous recomputation or on a fixed phase).
///
/// # Examples
///
/// ```
/// use vantage_obs::UpdateInterval;
///
/// assert_eq!(UpdateInterval::default().get(), 1);
/// assert_eq!(UpdateInterval::new(5).unwrap().get(), 5);
/// assert!(UpdateInterval::new(0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UpdateInterval(NonZeroU32);

impl UpdateInterval {
    /// Recompute on every tick.
    pub const EVERY_TICK: Self = Self(NonZeroU32::MIN);

    /// Validate and wrap a tick count.
    pub fn new(ticks: u32) -> Result<Self, ObservableError> {
        NonZeroU32::new(ticks)
            .map(Self)
            .ok_or(ObservableError::InvalidInterval { value: ticks })
    }

    /// The tick count.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for UpdateInterval {
    fn default() -> Self {
        Self::EVERY_TICK
    }
}

impl TryFrom<u32> for UpdateInterval {
    type Error = ObservableError;

    fn try_from(ticks: u32) -> Result<Self, Self::Error> {
        Self::new(ticks)
    }
}

impl From<UpdateInterval> for u32 {
    fn from(interval: UpdateInterval) -> Self {
        interval.get()
    }
}

impl fmt::Display for UpdateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(
            UpdateInterval::new(0),
            Err(ObservableError::InvalidInterval { value: 0 })
        );
        assert!(UpdateInterval::try_from(0).is_err());
    }

    #[test]
    fn default_is_every_tick() {
        assert_eq!(UpdateInterval::default(), UpdateInterval::EVERY_TICK);
        assert_eq!(u32::from(UpdateInterval::default()), 1);
    }

    proptest! {
        #[test]
        fn positive_values_round_trip(n in 1u32..=u32::MAX) {
            let interval = UpdateInterval::new(n).unwrap();
            prop_assert_eq!(interval.get(), n);
            prop_assert_eq!(interval.to_string(), n.to_string());
        }
    }
}
