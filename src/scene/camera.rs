//! Viewport camera and world-to-display projection.

use glam::{Mat4, Vec2, Vec3};

/// How the camera maps view space to clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Vertical field of view in radians.
    Perspective { fov_y: f32, aspect: f32, depth: DepthRange },
    /// Parallel projection; `half_extent` is half the visible width and height.
    Orthographic { half_extent: Vec2, depth: DepthRange },
}

/// Near and far clip distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub near: f32,
    pub far: f32,
}

impl DepthRange {
    pub const fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(30.0, 1.0, 0.1, 1000.0)
    }
}

impl Projection {
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::Perspective {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            depth: DepthRange::new(near, far),
        }
    }

    /// Parallel projection showing `width` x `height` world units.
    pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::Orthographic {
            half_extent: Vec2::new(width, height) * 0.5,
            depth: DepthRange::new(near, far),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective { fov_y, aspect, depth } => {
                Mat4::perspective_rh(fov_y, aspect, depth.near, depth.far)
            }
            Self::Orthographic { half_extent: h, depth } => {
                Mat4::orthographic_rh(-h.x, h.x, -h.y, h.y, depth.near, depth.far)
            }
        }
    }

    /// Orthographic extents are kept as given.
    pub fn set_aspect(&mut self, ratio: f32) {
        if let Self::Perspective { aspect, .. } = self {
            *aspect = ratio;
        }
    }
}

/// Active camera of a viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 500.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::default(),
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            projection: Projection::default(),
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// World to clip space.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio for perspective projection
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.projection.set_aspect(width / height);
        }
    }

    /// Projects a world point to display coordinates.
    ///
    /// Display coordinates are pixels with the origin at the bottom-left of
    /// a viewport of `size` pixels. The returned `z` is normalized depth.
    /// Points on the camera plane (`w == 0`) skip the perspective divide, and
    /// points behind the camera project mirrored, so callers that need a
    /// visible rectangle must clamp.
    pub fn world_to_display(&self, point: Vec3, size: Vec2) -> Vec3 {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        let ndc = if clip.w.abs() > f32::EPSILON {
            clip.truncate() / clip.w
        } else {
            clip.truncate()
        };
        Vec3::new(
            (ndc.x + 1.0) * 0.5 * size.x,
            (ndc.y + 1.0) * 0.5 * size.y,
            ndc.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn target_projects_to_viewport_center() {
        let mut camera = Camera::new(Vec3::new(5.0, 5.0, 60.0), Vec3::new(5.0, 5.0, 5.0));
        camera.set_aspect(SIZE.x, SIZE.y);
        let display = camera.world_to_display(Vec3::new(5.0, 5.0, 5.0), SIZE);
        assert!((display.x - 400.0).abs() < 1e-3);
        assert!((display.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn display_y_grows_upwards() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO);
        let low = camera.world_to_display(Vec3::new(0.0, -1.0, 0.0), SIZE);
        let high = camera.world_to_display(Vec3::new(0.0, 1.0, 0.0), SIZE);
        assert!(high.y > low.y);
    }

    #[test]
    fn orthographic_maps_extent_to_edges() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
            .with_projection(Projection::orthographic(80.0, 60.0, 0.1, 100.0));
        let corner = camera.world_to_display(Vec3::new(40.0, 30.0, 0.0), SIZE);
        assert!((corner.x - 800.0).abs() < 1e-3);
        assert!((corner.y - 600.0).abs() < 1e-3);
    }
}
