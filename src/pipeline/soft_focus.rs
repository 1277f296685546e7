//! Soft focus: silhouette mirrors composited on the outline layer.

use std::collections::HashMap;

use crate::config::FocusConfig;
use crate::scene::{ObjectId, Scene};
use crate::viewport::{Primitive, PrimitiveId, PrimitiveKind, StageId, Viewport};

use super::appearance;
use super::outline_layer::OutlineLayer;
use super::{collect_original_primitives, component_filter};

/// Flattened duplicate of one original primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Mirror {
    original: PrimitiveId,
    kind: PrimitiveKind,
    primitive: Primitive,
}

impl Mirror {
    /// Creates a mirror of the same kind as `source`. Mirrors are never pickable.
    fn new(original: PrimitiveId, source: &Primitive) -> Self {
        let mut primitive = source.clone();
        primitive.pickable = false;
        Self {
            original,
            kind: source.kind(),
            primitive,
        }
    }

    pub fn original(&self) -> PrimitiveId {
        self.original
    }

    /// Kind fixed at creation; appearance refreshes dispatch on it.
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Copies the current state of `original` and flattens it.
    fn refresh(&mut self, original: &Primitive) {
        self.primitive = original.clone();
        self.primitive.pickable = false;
        appearance::flatten(&mut self.primitive.appearance, self.kind);
    }
}

/// Mirrors of every visible primitive of the soft-focused objects.
#[derive(Debug)]
pub struct SoftFocusPipeline {
    stage_id: StageId,
    members: Vec<ObjectId>,
    originals: Vec<PrimitiveId>,
    mirrors: HashMap<PrimitiveId, Mirror>,
    layer: OutlineLayer,
}

impl SoftFocusPipeline {
    /// Creates the pipeline for the stage `stage_id`, whose own primitives
    /// are never mirrored.
    pub fn new(stage_id: StageId, config: &FocusConfig) -> Self {
        Self {
            stage_id,
            members: Vec::new(),
            originals: Vec::new(),
            mirrors: HashMap::new(),
            layer: OutlineLayer::new(config.outline_layer, config.use_fxaa),
        }
    }

    /// Soft-focused objects, followed by the hard-focused one.
    pub fn members(&self) -> &[ObjectId] {
        &self.members
    }

    /// Visible primitives of the members, in discovery order.
    pub fn originals(&self) -> &[PrimitiveId] {
        &self.originals
    }

    pub fn mirrors(&self) -> &HashMap<PrimitiveId, Mirror> {
        &self.mirrors
    }

    pub fn mirror(&self, original: PrimitiveId) -> Option<&Mirror> {
        self.mirrors.get(&original)
    }

    pub fn layer(&self) -> &OutlineLayer {
        &self.layer
    }

    pub fn is_original(&self, id: PrimitiveId) -> bool {
        self.originals.contains(&id)
    }

    /// Recomputes the member list from the selection.
    ///
    /// Objects that no longer exist are skipped and the hard-focused object
    /// is always included, once.
    pub fn recompute_membership(&mut self, scene: &Scene) {
        let selection = scene.selection();
        self.members.clear();

        let candidates = selection
            .soft_focus_objects()
            .chain(selection.focused_object());
        for object in candidates {
            if scene.object(object).is_none() {
                log::trace!("Skipping missing soft focus object {:?}", object);
                continue;
            }
            if !self.members.contains(&object) {
                self.members.push(object);
            }
        }
    }

    /// Re-queries the visible primitives of every member.
    pub fn refresh_original_primitives(&mut self, scene: &Scene, viewport: &Viewport) {
        self.originals.clear();
        for &object in &self.members {
            let component = component_filter(scene, object);
            collect_original_primitives(
                scene,
                viewport,
                self.stage_id,
                object,
                component,
                &mut self.originals,
            );
        }
    }

    /// Replaces the mirror map, reusing mirrors of originals still present.
    ///
    /// Mirrors whose original left the list are dropped with the old map.
    /// Every mirrored original is put on the outline layer.
    pub fn rebuild_mirrors(&mut self, viewport: &Viewport) {
        self.layer.clear_props();

        let mut previous = std::mem::take(&mut self.mirrors);
        for &id in &self.originals {
            let Some(original) = viewport.primitive(id).filter(|p| p.visible) else {
                continue;
            };
            let mirror = previous
                .remove(&id)
                .unwrap_or_else(|| Mirror::new(id, original));
            self.mirrors.insert(id, mirror);
            self.layer.add_prop(id);
        }

        if !previous.is_empty() {
            log::trace!("Released {} stale mirrors", previous.len());
        }
    }

    /// Refreshes the mirror of `original` from its current state.
    ///
    /// Returns `false` if there is no such mirror or the original is gone.
    pub fn refresh_appearance(&mut self, original: PrimitiveId, viewport: &Viewport) -> bool {
        let Some(mirror) = self.mirrors.get_mut(&original) else {
            return false;
        };
        let Some(source) = viewport.primitive(original) else {
            log::trace!("Mirrored primitive {:?} no longer resolves", original);
            return false;
        };
        mirror.refresh(source);
        true
    }

    /// Refreshes every mirror.
    pub fn refresh_appearances(&mut self, viewport: &Viewport) {
        for id in self.originals.clone() {
            self.refresh_appearance(id, viewport);
        }
    }

    /// Brings mirrors and the outline layer up to date with the originals.
    pub fn update(&mut self, scene: &Scene, viewport: &mut Viewport) {
        self.rebuild_mirrors(viewport);
        self.refresh_appearances(viewport);

        self.layer
            .set_intensity(scene.selection().highlight_strength());
        self.layer.ensure_attached(viewport);

        log::debug!(
            "Soft focus: {} members, {} mirrors",
            self.members.len(),
            self.mirrors.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Aabb;
    use crate::viewport::{Appearance, PropStage, SurfaceMaterial, ViewKind};
    use glam::{Vec2, Vec3};

    struct Fixture {
        scene: Scene,
        viewport: Viewport,
        a: ObjectId,
        b: ObjectId,
        a_surface: PrimitiveId,
        b_surface: PrimitiveId,
    }

    fn fixture() -> Fixture {
        let mut scene = Scene::new();
        let a = scene.add_object("a");
        let b = scene.add_object("b");
        let rep_a = scene.add_representation(a).unwrap();
        let rep_b = scene.add_representation(b).unwrap();

        let material = SurfaceMaterial {
            color: Vec3::new(1.0, 0.0, 0.0),
            ..SurfaceMaterial::default()
        };
        let bounds = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let mut stage = PropStage::new(StageId(1), "models");
        let a_surface = stage.add(a, rep_a, None, Primitive::surface(material.clone(), bounds));
        let b_surface = stage.add(b, rep_b, None, Primitive::surface(material, bounds));

        let mut viewport = Viewport::new(ViewKind::ThreeD, Vec2::new(320.0, 240.0));
        viewport.add_stage(stage);
        Fixture {
            scene,
            viewport,
            a,
            b,
            a_surface,
            b_surface,
        }
    }

    fn run(pipeline: &mut SoftFocusPipeline, f: &mut Fixture) {
        pipeline.recompute_membership(&f.scene);
        pipeline.refresh_original_primitives(&f.scene, &f.viewport);
        pipeline.update(&f.scene, &mut f.viewport);
    }

    #[test]
    fn membership_includes_hard_focus_once() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        f.scene.modify_selection(|s| {
            s.add_soft_focus(b, None);
            s.add_soft_focus(a, None);
            s.set_focused_object(Some(a));
        });
        let mut pipeline = SoftFocusPipeline::new(StageId(0), &FocusConfig::default());
        pipeline.recompute_membership(&f.scene);
        assert_eq!(pipeline.members(), &[b, a]);
    }

    #[test]
    fn dangling_members_are_skipped() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        f.scene.modify_selection(|s| {
            s.add_soft_focus(a, None);
            s.add_soft_focus(b, None);
        });
        f.scene.remove_object(a);
        let mut pipeline = SoftFocusPipeline::new(StageId(0), &FocusConfig::default());
        pipeline.recompute_membership(&f.scene);
        assert_eq!(pipeline.members(), &[b]);
    }

    #[test]
    fn mirrors_are_flat_and_unpickable() {
        let mut f = fixture();
        f.scene.add_soft_focus(f.a);
        let mut pipeline = SoftFocusPipeline::new(StageId(0), &FocusConfig::default());
        run(&mut pipeline, &mut f);

        let mirror = pipeline.mirror(f.a_surface).unwrap();
        assert_eq!(mirror.kind(), PrimitiveKind::Surface);
        assert!(!mirror.primitive().pickable);
        let Appearance::Surface(material) = &mirror.primitive().appearance else {
            panic!("mirror changed kind");
        };
        assert_eq!(material.color, Vec3::ONE);
        assert!(!material.lighting);
        assert_eq!(pipeline.layer().props(), &[f.a_surface]);
    }

    #[test]
    fn stale_mirrors_are_released() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        f.scene.modify_selection(|s| {
            s.add_soft_focus(a, None);
            s.add_soft_focus(b, None);
        });
        let mut pipeline = SoftFocusPipeline::new(StageId(0), &FocusConfig::default());
        run(&mut pipeline, &mut f);
        assert_eq!(pipeline.mirrors().len(), 2);

        f.scene.modify_selection(|s| s.remove_soft_focus(a));
        run(&mut pipeline, &mut f);
        assert_eq!(pipeline.mirrors().len(), 1);
        assert!(pipeline.mirror(f.a_surface).is_none());
        assert!(pipeline.mirror(f.b_surface).is_some());
    }

    #[test]
    fn refresh_tracks_original_changes() {
        let mut f = fixture();
        f.scene.add_soft_focus(f.a);
        let mut pipeline = SoftFocusPipeline::new(StageId(0), &FocusConfig::default());
        run(&mut pipeline, &mut f);

        let grown = Aabb::new(Vec3::ZERO, Vec3::splat(4.0));
        f.viewport
            .modify_primitive(f.a_surface, |p| p.bounds = Some(grown));
        assert!(pipeline.refresh_appearance(f.a_surface, &f.viewport));
        assert_eq!(
            pipeline.mirror(f.a_surface).unwrap().primitive().bounds,
            Some(grown)
        );
        assert!(!pipeline.refresh_appearance(f.b_surface, &f.viewport));
    }

    #[test]
    fn own_stage_is_never_mirrored() {
        let mut f = fixture();
        f.scene.add_soft_focus(f.a);
        let mut pipeline = SoftFocusPipeline::new(StageId(1), &FocusConfig::default());
        run(&mut pipeline, &mut f);
        assert!(pipeline.originals().is_empty());
        assert!(pipeline.layer().props().is_empty());
        assert!(pipeline.layer().is_attached());
    }

    #[test]
    fn glow_follows_highlight_strength() {
        let mut f = fixture();
        f.scene.modify_selection(|s| {
            s.add_soft_focus(f.a, None);
            s.set_highlight_strength(2.5);
        });
        let mut pipeline = SoftFocusPipeline::new(StageId(0), &FocusConfig::default());
        run(&mut pipeline, &mut f);
        assert_eq!(pipeline.layer().glow().intensity, 2.5);
        assert_eq!(f.viewport.surface().layer_count(), 2);
    }
}
