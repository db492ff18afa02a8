//! Vantage: declarative observables over physics-engine state.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Vantage sub-crates. For most users, adding `vantage` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use vantage::prelude::*;
//! use vantage_test_utils::fixture_scene;
//!
//! let (scene, engine) = fixture_scene();
//!
//! // A joint's generalized position.
//! let hinge = scene.find("joint", "my_hinge").unwrap();
//! let qpos = FeatureObservable::new(FieldKind::scalar("qpos"), hinge).unwrap();
//!
//! // Two geoms' Cartesian positions, stacked in declaration order.
//! let geoms = vec![
//!     scene.find("geom", "my_box").unwrap(),
//!     scene.find("geom", "small_sphere").unwrap(),
//! ];
//! let mut xpos = FeatureObservable::new(FieldKind::vector("xpos", 3), geoms).unwrap();
//! xpos.set_update_interval(5).unwrap();
//!
//! // A camera frame.
//! let camera = scene.find("camera", "world").unwrap();
//! let pixels = CameraObservable::new(camera, 480, 640).unwrap();
//!
//! let observables: Vec<&dyn Observable> = vec![&qpos, &xpos, &pixels];
//! for obs in observables {
//!     let value = obs.observation_callable(&engine).call().unwrap();
//!     assert_eq!(value.spec(), obs.array_spec());
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vantage-core` | Categories, identifiers, field kinds, arrays, errors, collaborator traits |
//! | [`obs`] | `vantage-obs` | Binding validation and the observables |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, errors, and collaborator traits (`vantage-core`).
///
/// Implement [`types::SceneElement`] and [`types::EngineState`] to
/// connect a scene model and an engine.
pub use vantage_core as types;

/// Binding validation and observables (`vantage-obs`).
///
/// [`obs::FeatureObservable`] for named state arrays,
/// [`obs::CameraObservable`] for renders, [`obs::GenericObservable`]
/// for anything else.
pub use vantage_obs as obs;

/// Common imports for typical Vantage usage.
///
/// ```rust
/// use vantage::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use vantage_core::{
        ArraySpec, Dtype, ElementCategory, ElementHandle, EngineState, FieldKind, ObsArray,
        RenderMode, SceneElement,
    };

    // Errors
    pub use vantage_core::{EngineError, ObservableError};

    // Observables
    pub use vantage_obs::{
        BindingTarget, CameraObservable, FeatureObservable, GenericObservable, Observable,
        ObservableOptions, ObservationCallable, UpdateInterval,
    };
}
