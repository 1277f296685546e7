//! Hard focus: corner brackets around the focused object's screen footprint.

use glam::{Vec2, Vec3};

use crate::config::FocusConfig;
use crate::scene::{Aabb, ObjectId, Scene};
use crate::selection::SelectionState;
use crate::viewport::{PrimitiveId, StageId, ViewKind, Viewport};

use super::bracket::{BracketGeometry, BracketOverlay};
use super::{collect_original_primitives, component_filter};

/// Running per-axis min/max of primitive bounds.
///
/// Starts out inverted so the first fold replaces it; it is only valid
/// once `min <= max` holds on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsAccumulator {
    bounds: Aabb,
}

impl Default for BoundsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self { bounds: Aabb::EMPTY }
    }

    pub fn reset(&mut self) {
        self.bounds = Aabb::EMPTY;
    }

    pub fn add(&mut self, bounds: &Aabb) {
        self.bounds = self.bounds.union(bounds);
    }

    pub fn is_valid(&self) -> bool {
        self.bounds.is_valid()
    }

    /// Accumulated bounds, if any were folded in.
    pub fn bounds(&self) -> Option<Aabb> {
        self.is_valid().then_some(self.bounds)
    }

    /// Raw accumulator contents, including the sentinel.
    pub fn raw(&self) -> Aabb {
        self.bounds
    }
}

/// Bracket indicator for the single hard-focused object.
#[derive(Debug)]
pub struct HardFocusPipeline {
    stage_id: StageId,
    bracket_length: f32,
    member: Option<ObjectId>,
    originals: Vec<PrimitiveId>,
    bounds: BoundsAccumulator,
    overlay: BracketOverlay,
}

impl HardFocusPipeline {
    pub fn new(stage_id: StageId, config: &FocusConfig) -> Self {
        Self {
            stage_id,
            bracket_length: config.bracket_length_px,
            member: None,
            originals: Vec::new(),
            bounds: BoundsAccumulator::new(),
            overlay: BracketOverlay::new(config.line_width_px),
        }
    }

    pub fn member(&self) -> Option<ObjectId> {
        self.member
    }

    pub fn originals(&self) -> &[PrimitiveId] {
        &self.originals
    }

    pub fn is_original(&self, id: PrimitiveId) -> bool {
        self.originals.contains(&id)
    }

    pub fn bounds(&self) -> &BoundsAccumulator {
        &self.bounds
    }

    pub fn overlay(&self) -> &BracketOverlay {
        &self.overlay
    }

    pub fn geometry(&self) -> &BracketGeometry {
        self.overlay.geometry()
    }

    /// The hard-focused object, if it still exists.
    pub fn recompute_membership(&mut self, scene: &Scene) {
        self.member = scene
            .selection()
            .focused_object()
            .filter(|&object| scene.object(object).is_some());
    }

    pub fn refresh_original_primitives(&mut self, scene: &Scene, viewport: &Viewport) {
        self.originals.clear();
        if let Some(object) = self.member {
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

    /// Folds the bounds of every original. Primitives without bounds are skipped.
    pub fn recompute_bounds(&mut self, viewport: &Viewport) {
        self.bounds.reset();
        for &id in &self.originals {
            if let Some(bounds) = viewport.primitive(id).and_then(|p| p.bounds) {
                self.bounds.add(&bounds);
            }
        }
    }

    /// Rewrites the brackets from the accumulated bounds and current camera.
    ///
    /// The geometry is cleared instead when nothing is hard-focused, the
    /// bounds are invalid, there is no camera or the view is a 2D slice.
    pub fn recompute_bracket_geometry(&mut self, selection: &SelectionState, viewport: &Viewport) {
        let geometry = self.overlay.geometry_mut();

        let bounds = match (selection.focused_object(), self.bounds.bounds()) {
            (Some(_), Some(bounds)) => bounds,
            _ => {
                geometry.clear();
                return;
            }
        };
        let Some(camera) = viewport.camera() else {
            geometry.clear();
            return;
        };
        if viewport.kind() == ViewKind::Slice {
            geometry.clear();
            return;
        }

        let size = viewport.surface().size();
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for corner in bounds.corners() {
            let display: Vec3 = camera.world_to_display(corner, size);
            min = min.min(display.truncate());
            max = max.max(display.truncate());
        }
        let min = min.max(Vec2::ZERO).min(size);
        let max = max.max(Vec2::ZERO).min(size);

        geometry.set_rect(min, max, self.bracket_length);
    }

    /// Recomputes bounds and brackets and makes sure the overlay is shown.
    pub fn update(&mut self, scene: &Scene, viewport: &mut Viewport) {
        self.recompute_bounds(viewport);
        self.recompute_bracket_geometry(scene.selection(), viewport);
        self.overlay.ensure_attached(viewport);

        log::debug!(
            "Hard focus: {:?}, {} originals, valid bounds: {}",
            self.member,
            self.originals.len(),
            self.bounds.is_valid()
        );
    }
}
