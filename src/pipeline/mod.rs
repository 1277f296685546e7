//! Focus highlighting pipelines
//!
//! 1. Soft focus - mirrors every visible primitive of each focused object,
//!    flattens the mirror to a white silhouette and lists the original on
//!    the outline layer, where the glow pass draws the outline.
//! 2. Hard focus - folds the bounds of the hard-focused object's
//!    primitives and draws screen-space corner brackets around them.

pub mod appearance;
pub mod bracket;
pub mod hard_focus;
pub mod outline_layer;
pub mod postprocess;
pub mod soft_focus;

pub use bracket::{BracketGeometry, BracketOverlay};
pub use hard_focus::{BoundsAccumulator, HardFocusPipeline};
pub use outline_layer::OutlineLayer;
pub use postprocess::{OutlineGlowPass, OutlineGlowUniforms};
pub use soft_focus::{Mirror, SoftFocusPipeline};

use crate::scene::{ObjectId, Scene};
use crate::selection::ComponentRef;
use crate::viewport::{PrimitiveId, StageId, Viewport};

/// Appends the visible primitives rendering `object` to `originals`.
///
/// Every visible representation of the object is queried on every stage
/// except `exclude`. Hidden and unresolvable primitives are skipped and a
/// primitive already in `originals` is not added twice.
pub(crate) fn collect_original_primitives(
    scene: &Scene,
    viewport: &Viewport,
    exclude: StageId,
    object: ObjectId,
    component: Option<ComponentRef>,
    originals: &mut Vec<PrimitiveId>,
) {
    let Some(scene_object) = scene.object(object) else {
        log::trace!("Focused object {:?} no longer exists", object);
        return;
    };

    for representation in scene_object.visible_representations() {
        for id in viewport.primitives_for(exclude, object, representation.id, component) {
            match viewport.primitive(id) {
                Some(primitive) if primitive.visible => {
                    if !originals.contains(&id) {
                        originals.push(id);
                    }
                }
                Some(_) => {}
                None => log::trace!("Skipping unresolved primitive {:?}", id),
            }
        }
    }
}

/// Component filter applied when collecting primitives of `object`.
///
/// The hard-focused object is scoped by the focused component; any other
/// member by its own soft focus component.
pub(crate) fn component_filter(scene: &Scene, object: ObjectId) -> Option<ComponentRef> {
    let selection = scene.selection();
    if selection.focused_object() == Some(object) {
        selection.focused_component()
    } else {
        selection.soft_focus_component(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Aabb;
    use crate::viewport::{Primitive, PropStage, SurfaceMaterial, ViewKind};
    use glam::{Vec2, Vec3};

    fn unit_surface() -> Primitive {
        Primitive::surface(SurfaceMaterial::default(), Aabb::new(Vec3::ZERO, Vec3::ONE))
    }

    #[test]
    fn skips_hidden_representations_and_primitives() {
        let mut scene = Scene::new();
        let a = scene.add_object("a");
        let shown = scene.add_representation(a).unwrap();
        let hidden_rep = scene.add_representation(a).unwrap();
        scene.set_representation_visible(a, hidden_rep, false);

        let mut viewport = Viewport::new(ViewKind::ThreeD, Vec2::new(100.0, 100.0));
        let mut stage = PropStage::new(StageId(1), "models");
        let visible = stage.add(a, shown, None, unit_surface());
        stage.add(a, shown, None, unit_surface().hidden());
        stage.add(a, hidden_rep, None, unit_surface());
        viewport.add_stage(stage);

        let mut originals = Vec::new();
        collect_original_primitives(&scene, &viewport, StageId(0), a, None, &mut originals);
        collect_original_primitives(&scene, &viewport, StageId(0), a, None, &mut originals);
        assert_eq!(originals, vec![visible]);
    }

    #[test]
    fn missing_object_contributes_nothing() {
        let scene = Scene::new();
        let viewport = Viewport::new(ViewKind::ThreeD, Vec2::new(100.0, 100.0));
        let mut originals = Vec::new();
        collect_original_primitives(&scene, &viewport, StageId(0), ObjectId(5), None, &mut originals);
        assert!(originals.is_empty());
    }

    #[test]
    fn hard_focus_uses_focused_component() {
        let mut scene = Scene::new();
        let a = scene.add_object("a");
        let point = ComponentRef::new(1, 2);
        let handle = ComponentRef::new(1, 7);
        scene.modify_selection(|s| {
            s.add_soft_focus(a, Some(handle));
            s.set_focused_component(Some(point));
        });
        assert_eq!(component_filter(&scene, a), Some(handle));

        scene.set_focused_object(Some(a));
        assert_eq!(component_filter(&scene, a), Some(point));
    }
}
