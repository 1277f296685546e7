//! Shared fixtures for focus pipeline integration tests.
//!
//! The standard fixture is a scene with two objects, each with one visible
//! representation rendered by a surface primitive, viewed from a 3D
//! viewport with a perspective camera looking at object A.

#![allow(dead_code)]

use glam::{Vec2, Vec3};

use redlilium_focus::viewport::SurfaceMaterial;
use redlilium_focus::{
    Aabb, Camera, FocusManager, ObjectId, Primitive, PrimitiveId, PropStage, RepresentationId,
    Scene, StageId, ViewKind, Viewport,
};

/// Stage id the focus manager owns.
pub const FOCUS_STAGE: StageId = StageId(0);
/// Stage rendering the fixture models.
pub const MODEL_STAGE: StageId = StageId(1);
/// Surface size of the fixture viewport.
pub const VIEW_SIZE: Vec2 = Vec2::new(800.0, 600.0);

/// Install a logger once so `RUST_LOG=debug` shows cascade traces.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One object rendered by one surface primitive.
#[derive(Debug, Clone, Copy)]
pub struct FixtureObject {
    pub id: ObjectId,
    pub representation: RepresentationId,
    pub primitive: PrimitiveId,
}

pub struct Fixture {
    pub scene: Scene,
    pub viewport: Viewport,
    pub manager: FocusManager,
    pub a: FixtureObject,
    pub b: FixtureObject,
}

impl Fixture {
    /// Drains pending notifications through the manager.
    pub fn pump(&mut self) -> usize {
        self.manager.pump(&mut self.scene, &mut self.viewport)
    }

    pub fn stage(&mut self) -> &mut PropStage {
        self.viewport
            .stage_mut::<PropStage>(MODEL_STAGE)
            .expect("model stage")
    }
}

pub fn red_surface(bounds: Aabb) -> Primitive {
    Primitive::surface(
        SurfaceMaterial {
            color: Vec3::new(0.9, 0.1, 0.1),
            ..SurfaceMaterial::default()
        },
        bounds,
    )
}

fn add_object(
    scene: &mut Scene,
    stage: &mut PropStage,
    name: &str,
    bounds: Aabb,
) -> FixtureObject {
    let id = scene.add_object(name);
    let representation = scene.add_representation(id).expect("object exists");
    let primitive = stage.add(id, representation, None, red_surface(bounds));
    FixtureObject {
        id,
        representation,
        primitive,
    }
}

/// Builds the standard fixture in the given view kind and attaches the manager.
pub fn fixture_with_kind(kind: ViewKind) -> Fixture {
    init_logging();

    let mut scene = Scene::new();
    let mut stage = PropStage::new(MODEL_STAGE, "models");
    let a = add_object(
        &mut scene,
        &mut stage,
        "A",
        Aabb::new(Vec3::ZERO, Vec3::splat(10.0)),
    );
    let b = add_object(
        &mut scene,
        &mut stage,
        "B",
        Aabb::new(Vec3::new(20.0, 0.0, 0.0), Vec3::new(25.0, 5.0, 5.0)),
    );

    let mut viewport = Viewport::new(kind, VIEW_SIZE);
    viewport.add_stage(stage);
    viewport.set_camera(Some(Camera::new(
        Vec3::new(5.0, 5.0, 100.0),
        Vec3::splat(5.0),
    )));

    let mut manager = FocusManager::new(FOCUS_STAGE);
    scene.drain_events();
    viewport.drain_events();
    manager.attach(&scene, &mut viewport);
    viewport.take_render_request();

    Fixture {
        scene,
        viewport,
        manager,
        a,
        b,
    }
}

pub fn fixture() -> Fixture {
    fixture_with_kind(ViewKind::ThreeD)
}
