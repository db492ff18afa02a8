//! Observable binding and evaluation for physics-engine state.
//!
//! An observable is declared against scene elements (or a camera),
//! validated immediately, and later turned into an
//! [`ObservationCallable`] bound to a live [`EngineState`]. Every call
//! re-reads the engine, so values always track the current simulation
//! state. How often to call is the scheduler's business, steered by each
//! observable's [`UpdateInterval`].
//!
//! [`EngineState`]: vantage_core::EngineState

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binding;
pub mod camera;
pub mod feature;
pub mod generic;
pub mod interval;
pub mod observable;
pub mod options;
pub mod resolve;

pub use binding::{
    classify, validate_camera_binding, validate_element_binding, BindingTarget, Classification,
    ElementBinding,
};
pub use camera::{camera_spec, CameraObservable};
pub use feature::{feature_spec, FeatureObservable};
pub use generic::{GenericObservable, ObservationFn};
pub use interval::UpdateInterval;
pub use observable::{BoundObservation, Observable, ObservationCallable};
pub use options::{Corruptor, ObservableOptions};
pub use resolve::resolve;
