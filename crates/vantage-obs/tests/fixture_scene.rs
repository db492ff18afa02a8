//! Integration test: feature and camera observables over the fixture scene.
//!
//! Mirrors how a scheduler drives the layer: declare observables,
//! bind them to the engine, call them while the engine moves.

use vantage_core::{
    Dtype, ElementHandle, EngineState, ExpectedBinding, FieldKind, ObservableError, RenderMode,
    RenderRequest,
};
use vantage_obs::{
    BindingTarget, CameraObservable, FeatureObservable, Observable, ObservableOptions,
    UpdateInterval,
};
use vantage_test_utils::fixture_scene;

fn expect_binding_error<T: std::fmt::Debug>(
    result: Result<T, ObservableError>,
    want: ExpectedBinding,
) {
    match result {
        Err(ObservableError::BindingType { expected, .. }) => assert_eq!(expected, want),
        other => panic!("expected BindingType({want:?}), got {other:?}"),
    }
}

fn render(engine: &dyn EngineState, height: usize, width: usize) -> vantage_core::ObsArray {
    engine
        .render(&RenderRequest {
            camera: "world",
            height,
            width,
            mode: RenderMode::Rgb,
        })
        .unwrap()
}

// ── Feature observables ──────────────────────────────────────────

#[test]
fn hinge_qpos_reads_named_slice() {
    let (scene, engine) = fixture_scene();
    let hinge = scene.find("joint", "my_hinge").unwrap();
    let obs = FeatureObservable::new(FieldKind::scalar("qpos"), hinge).unwrap();

    let value = obs.observation_callable(&engine).call().unwrap();
    assert_eq!(value, engine.row("qpos", "my_hinge").unwrap());
    assert_eq!(obs.update_interval(), UpdateInterval::default());
}

#[test]
fn geom_xpos_with_update_interval() {
    let (scene, engine) = fixture_scene();
    let sphere = scene.find("geom", "small_sphere").unwrap();
    let options = ObservableOptions {
        update_interval: UpdateInterval::new(5).unwrap(),
        ..Default::default()
    };
    let obs = FeatureObservable::with_options(FieldKind::vector("xpos", 3), sphere, options)
        .unwrap();

    assert_eq!(obs.update_interval().get(), 5);
    let value = obs.observation_callable(&engine).call().unwrap();
    assert_eq!(value, engine.row("geom_xpos", "small_sphere").unwrap());
}

#[test]
fn geom_list_stacks_rows_in_order() {
    let (scene, engine) = fixture_scene();
    let my_box = scene.find("geom", "my_box").unwrap();
    let sphere = scene.find("geom", "small_sphere").unwrap();

    let obs = FeatureObservable::new(
        FieldKind::vector("xpos", 3),
        vec![ElementHandle::clone(&my_box), ElementHandle::clone(&sphere)],
    )
    .unwrap();
    let value = obs.observation_callable(&engine).call().unwrap();
    assert_eq!(
        value,
        engine.rows("geom_xpos", &["my_box", "small_sphere"]).unwrap()
    );
    assert_eq!(value.shape(), &[2, 3]);
    assert_eq!(value.spec(), obs.array_spec());

    let reversed = FeatureObservable::new(FieldKind::vector("xpos", 3), vec![sphere, my_box])
        .unwrap()
        .observation_callable(&engine)
        .call()
        .unwrap();
    assert_eq!(
        reversed,
        engine.rows("geom_xpos", &["small_sphere", "my_box"]).unwrap()
    );
}

#[test]
fn reads_reflect_state_at_call_time() {
    let (scene, engine) = fixture_scene();
    let body = scene.find("body", "body").unwrap();
    let obs = FeatureObservable::new(FieldKind::vector("xpos", 3), body).unwrap();
    let callable = obs.observation_callable(&engine);

    for _ in 0..3 {
        assert_eq!(callable.call().unwrap(), engine.row("xpos", "body").unwrap());
        engine.step();
    }
    let z = callable.call().unwrap().as_f64().unwrap()[2];
    assert!((z - 0.53).abs() < 1e-12);
}

#[test]
fn bare_names_are_not_elements() {
    let (scene, _) = fixture_scene();
    let my_box = scene.find("geom", "my_box").unwrap();

    expect_binding_error(
        FeatureObservable::new(FieldKind::scalar("qpos"), "my_hinge"),
        ExpectedBinding::Element,
    );
    expect_binding_error(
        FeatureObservable::new(
            FieldKind::vector("geom_xpos", 3),
            BindingTarget::Sequence(vec![my_box.into(), "small_sphere".into()]),
        ),
        ExpectedBinding::Element,
    );
    expect_binding_error(
        FeatureObservable::new(FieldKind::scalar("qpos"), Vec::<ElementHandle>::new()),
        ExpectedBinding::Element,
    );
}

#[test]
fn update_interval_set_and_reject() {
    let (scene, _) = fixture_scene();
    let hinge = scene.find("joint", "my_hinge").unwrap();
    let mut obs = FeatureObservable::new(FieldKind::scalar("qpos"), hinge).unwrap();

    for n in [1, 2, 7, 1000, u32::MAX] {
        obs.set_update_interval(n).unwrap();
        assert_eq!(obs.update_interval().get(), n);
    }
    assert_eq!(
        obs.set_update_interval(0),
        Err(ObservableError::InvalidInterval { value: 0 })
    );
    assert_eq!(obs.update_interval().get(), u32::MAX);
}

// ── Camera observables ───────────────────────────────────────────

#[test]
fn camera_renders_at_current_size() {
    let (scene, engine) = fixture_scene();
    let camera = scene.find("camera", "world").unwrap();
    let options = ObservableOptions {
        update_interval: UpdateInterval::new(7).unwrap(),
        ..Default::default()
    };
    let mut obs = CameraObservable::with_options(camera, 480, 640, options).unwrap();
    assert_eq!(obs.update_interval().get(), 7);

    let image = obs.observation_callable(&engine).call().unwrap();
    assert_eq!(image, render(&engine, 480, 640));
    assert_eq!(image.shape(), obs.array_spec().shape.as_slice());
    assert_eq!(image.dtype(), obs.array_spec().dtype);
    assert_eq!(obs.array_spec().shape.as_slice(), &[480, 640, 3]);

    obs.set_height(300).unwrap();
    obs.set_width(400).unwrap();
    let image = obs.observation_callable(&engine).call().unwrap();
    assert_eq!(obs.height(), 300);
    assert_eq!(obs.width(), 400);
    assert_eq!(image, render(&engine, 300, 400));
    assert_eq!(image.shape(), obs.array_spec().shape.as_slice());
    assert_eq!(image.dtype(), Dtype::U8);
    assert_eq!(obs.array_spec().shape.as_slice(), &[300, 400, 3]);
}

#[test]
fn camera_render_tracks_engine_frames() {
    let (scene, engine) = fixture_scene();
    let camera = scene.find("camera", "world").unwrap();
    let obs = CameraObservable::new(camera, 16, 16).unwrap();
    let callable = obs.observation_callable(&engine);

    let first = callable.call().unwrap();
    engine.step();
    let second = callable.call().unwrap();
    assert_ne!(first, second);
    assert_eq!(second, render(&engine, 16, 16));
}

#[test]
fn camera_binding_rejections() {
    let (scene, _) = fixture_scene();
    let camera = scene.find("camera", "world").unwrap();

    expect_binding_error(CameraObservable::new("world", 480, 640), ExpectedBinding::Element);
    expect_binding_error(
        CameraObservable::new(vec![camera], 480, 640),
        ExpectedBinding::Element,
    );
    expect_binding_error(
        CameraObservable::new(scene.find("body", "body").unwrap(), 480, 640),
        ExpectedBinding::Camera,
    );
}

#[test]
fn observables_share_one_interface() {
    let (scene, engine) = fixture_scene();
    let mut observables: Vec<Box<dyn Observable>> = vec![
        Box::new(
            FeatureObservable::new(
                FieldKind::scalar("qpos"),
                scene.find("joint", "my_hinge").unwrap(),
            )
            .unwrap(),
        ),
        Box::new(
            CameraObservable::new(scene.find("camera", "world").unwrap(), 24, 32)
                .unwrap()
                .with_mode(RenderMode::Depth),
        ),
    ];
    for obs in observables.iter_mut() {
        obs.set_enabled(true);
        let value = obs.observation_callable(&engine).call().unwrap();
        assert!(obs.enabled());
        assert_eq!(value.spec(), obs.array_spec());
    }
}
