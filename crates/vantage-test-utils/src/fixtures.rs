//! Standard fixture scene.
//!
//! A single body carrying a hinge joint and two geoms, watched by a
//! camera:
//!
//! - body `body` (`xpos`)
//! - joint `my_hinge` (`qpos`, scalar)
//! - geoms `my_box` and `small_sphere` (`geom_xpos`, 3-vectors)
//! - camera `world`

use crate::{MockEngine, MockScene};

/// Build the fixture scene and a matching engine.
pub fn fixture_scene() -> (MockScene, MockEngine) {
    let mut scene = MockScene::new();
    scene.add("body", "body");
    scene.add("joint", "my_hinge");
    scene.add("geom", "my_box");
    scene.add("geom", "small_sphere");
    scene.add("camera", "world");

    let engine = MockEngine::new();
    engine.define_array("qpos", &[]);
    engine.set_row("qpos", "my_hinge", vec![0.3]);

    engine.define_array("xpos", &[3]);
    engine.set_row("xpos", "body", vec![0.0, 0.0, 0.5]);

    engine.define_array("geom_xpos", &[3]);
    engine.set_row("geom_xpos", "my_box", vec![0.0, 0.0, 0.5]);
    engine.set_row("geom_xpos", "small_sphere", vec![0.1, 0.2, 0.8]);

    engine.add_camera("world");

    (scene, engine)
}
