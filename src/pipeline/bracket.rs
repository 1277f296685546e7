//! Screen-space corner brackets around the hard-focused object.

use glam::Vec2;

use crate::viewport::{OverlayId, Viewport};

/// Number of bracket points: three per corner.
pub const BRACKET_POINT_COUNT: usize = 12;
/// Number of bracket segments: two per corner.
pub const BRACKET_LINE_COUNT: usize = 8;

/// Points and segments of the four corner brackets.
///
/// Each corner contributes `(arm end, corner, arm end)` and the segments
/// `(p0, p1)` and `(p2, p1)`. Segment topology never changes once built,
/// so it is only rebuilt after the geometry was cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BracketGeometry {
    points: Vec<Vec2>,
    lines: Vec<[u32; 2]>,
}

impl BracketGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn lines(&self) -> &[[u32; 2]] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drops points and segments.
    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
    }

    /// Writes brackets for the display rectangle `[min, max]` with arms of
    /// `arm` pixels, corners counter-clockwise from the bottom-left.
    pub fn set_rect(&mut self, min: Vec2, max: Vec2, arm: f32) {
        self.points.clear();
        self.points.extend_from_slice(&[
            // bottom-left
            Vec2::new(min.x + arm, min.y),
            Vec2::new(min.x, min.y),
            Vec2::new(min.x, min.y + arm),
            // top-left
            Vec2::new(min.x, max.y - arm),
            Vec2::new(min.x, max.y),
            Vec2::new(min.x + arm, max.y),
            // top-right
            Vec2::new(max.x - arm, max.y),
            Vec2::new(max.x, max.y),
            Vec2::new(max.x, max.y - arm),
            // bottom-right
            Vec2::new(max.x, min.y + arm),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x - arm, min.y),
        ]);

        if self.lines.is_empty() {
            for corner in 0..4u32 {
                let first = corner * 3;
                self.lines.push([first, first + 1]);
                self.lines.push([first + 2, first + 1]);
            }
        }
    }
}

/// The 2D line primitive drawing the bracket geometry on the base renderer.
#[derive(Debug, Clone)]
pub struct BracketOverlay {
    line_width: f32,
    geometry: BracketGeometry,
    overlay: Option<OverlayId>,
}

impl BracketOverlay {
    pub fn new(line_width: f32) -> Self {
        Self {
            line_width,
            geometry: BracketGeometry::new(),
            overlay: None,
        }
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn geometry(&self) -> &BracketGeometry {
        &self.geometry
    }

    pub(crate) fn geometry_mut(&mut self) -> &mut BracketGeometry {
        &mut self.geometry
    }

    pub fn overlay(&self) -> Option<OverlayId> {
        self.overlay
    }

    /// Adds the overlay to the base renderer on first use.
    pub(crate) fn ensure_attached(&mut self, viewport: &mut Viewport) {
        let surface = viewport.surface_mut();
        if self.overlay.is_some_and(|id| surface.has_overlay(id)) {
            return;
        }
        let id = surface.add_overlay();
        log::debug!("Added bracket overlay {:?}", id);
        self.overlay = Some(id);
    }
}
