//! Observables that render images from a scene camera.
//!
//! Height and width stay mutable after construction. They live in a
//! size cell shared with every reader handed out, so a resize is
//! honored by the next call of any existing callable. The array spec is
//! never cached: [`camera_spec`] derives it from the current size on
//! every query.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;
use vantage_core::{
    ArraySpec, ElementHandle, EngineError, EngineState, ObsArray, ObservableError, RenderMode,
    RenderRequest, Shape,
};

use crate::binding::{validate_camera_binding, BindingTarget};
use crate::observable::sealed::ObservableParts;
use crate::observable::{BoundObservation, Observable};
use crate::options::ObservableOptions;

/// Derive the output spec of a render at `height` x `width`.
///
/// `(height, width, channels)` for multi-channel modes, `(height, width)`
/// for depth.
///
/// # Examples
///
/// ```
/// use vantage_core::{Dtype, RenderMode};
/// use vantage_obs::camera_spec;
///
/// let spec = camera_spec(RenderMode::Rgb, 480, 640);
/// assert_eq!(spec.shape.as_slice(), &[480, 640, 3]);
/// assert_eq!(spec.dtype, Dtype::U8);
/// ```
pub fn camera_spec(mode: RenderMode, height: usize, width: usize) -> ArraySpec {
    let mut shape = Shape::from_slice(&[height, width]);
    if let Some(channels) = mode.channels() {
        shape.push(channels);
    }
    ArraySpec {
        shape,
        dtype: mode.dtype(),
    }
}

/// Render size shared between an observable and its readers.
///
/// Each dimension is individually coherent; a concurrent resize may be
/// observed half-applied, so callers serialize resizes against renders.
#[derive(Debug)]
struct CameraDims {
    height: AtomicUsize,
    width: AtomicUsize,
}

impl CameraDims {
    fn current(&self) -> (usize, usize) {
        (
            self.height.load(Ordering::Relaxed),
            self.width.load(Ordering::Relaxed),
        )
    }
}

fn check_dimension(name: &'static str, value: usize) -> Result<usize, ObservableError> {
    if value == 0 {
        return Err(ObservableError::InvalidDimension { name, value });
    }
    Ok(value)
}

/// Renders an image from one camera element at a mutable size.
///
/// # Examples
///
/// ```
/// use vantage_obs::{CameraObservable, Observable};
/// use vantage_test_utils::fixture_scene;
///
/// let (scene, engine) = fixture_scene();
/// let camera = scene.find("camera", "world").unwrap();
///
/// let mut obs = CameraObservable::new(camera, 480, 640).unwrap();
/// assert_eq!(obs.array_spec().shape.as_slice(), &[480, 640, 3]);
///
/// obs.set_height(300).unwrap();
/// obs.set_width(400).unwrap();
/// let image = obs.observation_callable(&engine).call().unwrap();
/// assert_eq!(image.shape(), &[300, 400, 3]);
/// ```
#[derive(Debug)]
pub struct CameraObservable {
    camera: ElementHandle,
    mode: RenderMode,
    dims: Arc<CameraDims>,
    options: ObservableOptions,
}

impl CameraObservable {
    /// Render RGB from `target` at `height` x `width` with default options.
    pub fn new(
        target: impl Into<BindingTarget>,
        height: usize,
        width: usize,
    ) -> Result<Self, ObservableError> {
        Self::with_options(target, height, width, ObservableOptions::default())
    }

    /// Render RGB from `target` at `height` x `width` with explicit options.
    ///
    /// # Errors
    ///
    /// - [`ObservableError::BindingType`] unless `target` is exactly one
    ///   element of category `camera`.
    /// - [`ObservableError::InvalidDimension`] if either size is zero.
    /// - [`ObservableError::InvalidOption`] if `options` fail validation.
    pub fn with_options(
        target: impl Into<BindingTarget>,
        height: usize,
        width: usize,
        options: ObservableOptions,
    ) -> Result<Self, ObservableError> {
        let camera = validate_camera_binding(&target.into())?;
        let height = check_dimension("height", height)?;
        let width = check_dimension("width", width)?;
        options.validate()?;
        debug!(
            camera = %camera.full_identifier(),
            height,
            width,
            update_interval = %options.update_interval,
            "camera observable declared"
        );
        Ok(Self {
            camera,
            mode: RenderMode::default(),
            dims: Arc::new(CameraDims {
                height: AtomicUsize::new(height),
                width: AtomicUsize::new(width),
            }),
            options,
        })
    }

    /// Switch what the camera renders. Only available while building,
    /// since the mode fixes the output dtype.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// The bound camera.
    pub fn camera(&self) -> &ElementHandle {
        &self.camera
    }

    /// What the camera renders.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Current render height in pixels.
    pub fn height(&self) -> usize {
        self.dims.current().0
    }

    /// Current render width in pixels.
    pub fn width(&self) -> usize {
        self.dims.current().1
    }

    /// Change the render height. Takes effect on the next call.
    pub fn set_height(&mut self, height: usize) -> Result<(), ObservableError> {
        let height = check_dimension("height", height)?;
        self.dims.height.store(height, Ordering::Relaxed);
        Ok(())
    }

    /// Change the render width. Takes effect on the next call.
    pub fn set_width(&mut self, width: usize) -> Result<(), ObservableError> {
        let width = check_dimension("width", width)?;
        self.dims.width.store(width, Ordering::Relaxed);
        Ok(())
    }
}

impl ObservableParts for CameraObservable {
    fn raw_reader(&self) -> Arc<dyn BoundObservation> {
        Arc::new(CameraReader {
            camera: ElementHandle::clone(&self.camera),
            mode: self.mode,
            dims: Arc::clone(&self.dims),
        })
    }

    fn options_slot(&mut self) -> &mut ObservableOptions {
        &mut self.options
    }
}

impl Observable for CameraObservable {
    fn array_spec(&self) -> ArraySpec {
        let (height, width) = self.dims.current();
        camera_spec(self.mode, height, width)
    }

    fn options(&self) -> &ObservableOptions {
        &self.options
    }
}

struct CameraReader {
    camera: ElementHandle,
    mode: RenderMode,
    dims: Arc<CameraDims>,
}

impl BoundObservation for CameraReader {
    fn read(&self, engine: &dyn EngineState) -> Result<ObsArray, EngineError> {
        let (height, width) = self.dims.current();
        let camera = self.camera.full_identifier();
        engine.render(&RenderRequest {
            camera: &camera,
            height,
            width,
            mode: self.mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vantage_core::{Dtype, ExpectedBinding};
    use vantage_test_utils::fixture_scene;

    #[test]
    fn resize_is_seen_by_existing_callable() {
        let (scene, engine) = fixture_scene();
        let camera = scene.find("camera", "world").unwrap();
        let mut obs = CameraObservable::new(camera, 48, 64).unwrap();
        let reader = obs.reader();

        assert_eq!(reader.read(&engine).unwrap().shape(), &[48, 64, 3]);
        obs.set_height(30).unwrap();
        obs.set_width(40).unwrap();
        assert_eq!(reader.read(&engine).unwrap().shape(), &[30, 40, 3]);
    }

    #[test]
    fn render_matches_fresh_engine_render() {
        let (scene, engine) = fixture_scene();
        let camera = scene.find("camera", "world").unwrap();
        let obs = CameraObservable::new(camera, 12, 16).unwrap();
        let image = obs.observation_callable(&engine).call().unwrap();
        let fresh = engine
            .render(&RenderRequest {
                camera: "world",
                height: 12,
                width: 16,
                mode: RenderMode::Rgb,
            })
            .unwrap();
        assert_eq!(image, fresh);
        assert_eq!(image.spec(), obs.array_spec());
    }

    #[test]
    fn depth_and_segmentation_modes() {
        let (scene, engine) = fixture_scene();
        let camera = scene.find("camera", "world").unwrap();

        let depth = CameraObservable::new(ElementHandle::clone(&camera), 8, 10)
            .unwrap()
            .with_mode(RenderMode::Depth);
        let image = depth.observation_callable(&engine).call().unwrap();
        assert_eq!(depth.array_spec(), ArraySpec::new(&[8, 10], Dtype::F32));
        assert_eq!(image.spec(), depth.array_spec());

        let seg = CameraObservable::new(camera, 8, 10)
            .unwrap()
            .with_mode(RenderMode::Segmentation);
        let image = seg.observation_callable(&engine).call().unwrap();
        assert_eq!(seg.array_spec(), ArraySpec::new(&[8, 10, 2], Dtype::I32));
        assert_eq!(image.spec(), seg.array_spec());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let (scene, _) = fixture_scene();
        let camera = scene.find("camera", "world").unwrap();
        assert_eq!(
            CameraObservable::new(ElementHandle::clone(&camera), 0, 640).unwrap_err(),
            ObservableError::InvalidDimension {
                name: "height",
                value: 0
            }
        );

        let mut obs = CameraObservable::new(camera, 480, 640).unwrap();
        assert!(obs.set_width(0).is_err());
        assert_eq!(obs.width(), 640);
    }

    #[test]
    fn non_camera_element_is_rejected() {
        let (scene, _) = fixture_scene();
        let geom = scene.find("geom", "my_box").unwrap();
        match CameraObservable::new(geom, 480, 640) {
            Err(ObservableError::BindingType { expected, .. }) => {
                assert_eq!(expected, ExpectedBinding::Camera)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn spec_tracks_current_size(
            h0 in 1usize..2048, w0 in 1usize..2048,
            h1 in 1usize..2048, w1 in 1usize..2048,
        ) {
            let (scene, _) = fixture_scene();
            let camera = scene.find("camera", "world").unwrap();
            let mut obs = CameraObservable::new(camera, h0, w0).unwrap();
            prop_assert_eq!(obs.array_spec(), camera_spec(RenderMode::Rgb, h0, w0));
            obs.set_height(h1).unwrap();
            obs.set_width(w1).unwrap();
            prop_assert_eq!(obs.height(), h1);
            prop_assert_eq!(obs.width(), w1);
            let spec = obs.array_spec();
            prop_assert_eq!(spec.shape.as_slice(), &[h1, w1, 3]);
        }
    }
}
