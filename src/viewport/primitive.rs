//! Renderable primitives and their appearance.

use glam::{Vec2, Vec3, Vec4};

use super::StageId;
use crate::scene::Aabb;

/// Identifier of a primitive: the stage that produced it plus a stage-local index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId {
    pub stage: StageId,
    pub index: u32,
}

impl PrimitiveId {
    pub const fn new(stage: StageId, index: u32) -> Self {
        Self { stage, index }
    }
}

/// Closed set of primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Lit 3D surface geometry.
    Surface,
    /// Volume rendering.
    Volume,
    /// Screen-space 2D geometry.
    Overlay,
    /// 2D label placement.
    Labels,
    /// Screen-space text.
    Text,
}

/// Texture handle bound to a surface material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Screen position a 2D primitive is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenAnchor {
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMaterial {
    pub color: Vec3,
    pub opacity: f32,
    pub lighting: bool,
    pub texture: Option<TextureId>,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            opacity: 1.0,
            lighting: true,
            texture: None,
        }
    }
}

/// Piecewise-linear scalar to color mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferFunction {
    points: Vec<(f32, Vec3)>,
}

impl TransferFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// A function mapping every scalar to `color`.
    pub fn constant(color: Vec3) -> Self {
        Self {
            points: vec![(0.0, color)],
        }
    }

    /// Inserts a control point, keeping points sorted by scalar value.
    pub fn add_point(&mut self, value: f32, color: Vec3) {
        let index = self.points.partition_point(|(v, _)| *v < value);
        self.points.insert(index, (value, color));
    }

    pub fn points(&self) -> &[(f32, Vec3)] {
        &self.points
    }

    /// Evaluates the function, clamping outside the control range.
    pub fn sample(&self, value: f32) -> Vec3 {
        let Some(first) = self.points.first() else {
            return Vec3::ZERO;
        };
        if value <= first.0 {
            return first.1;
        }
        for pair in self.points.windows(2) {
            let (v0, c0) = pair[0];
            let (v1, c1) = pair[1];
            if value <= v1 {
                let t = if v1 > v0 { (value - v0) / (v1 - v0) } else { 1.0 };
                return c0.lerp(c1, t);
            }
        }
        self.points.last().map_or(Vec3::ZERO, |(_, c)| *c)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeMaterial {
    pub color: TransferFunction,
    pub ambient: f32,
    pub diffuse: f32,
    pub shade: bool,
}

impl Default for VolumeMaterial {
    fn default() -> Self {
        Self {
            color: TransferFunction::new(),
            ambient: 0.0,
            diffuse: 1.0,
            shade: true,
        }
    }
}

/// Material of a screen-space primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material2d {
    pub color: Vec3,
    pub opacity: f32,
}

impl Default for Material2d {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Vec3,
    pub opacity: f32,
    /// Background RGBA. Fully transparent by default.
    pub background: Vec4,
    pub font_size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            opacity: 1.0,
            background: Vec4::ZERO,
            font_size: 12.0,
        }
    }
}

/// Point-set input of a label placement primitive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelHierarchy {
    pub positions: Vec<Vec3>,
    pub labels: Vec<String>,
    pub priorities: Vec<f32>,
    /// Name of the point array holding label strings.
    pub label_array: String,
    /// Name of the point array holding placement priorities.
    pub priority_array: String,
    pub text: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelAppearance {
    pub material: Material2d,
    /// Present when labels are placed from a point-set hierarchy.
    pub hierarchy: Option<LabelHierarchy>,
}

/// Kind-specific appearance of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    Surface(SurfaceMaterial),
    Volume(VolumeMaterial),
    Overlay(Material2d),
    Labels(LabelAppearance),
    Text(TextStyle),
}

impl Appearance {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Appearance::Surface(_) => PrimitiveKind::Surface,
            Appearance::Volume(_) => PrimitiveKind::Volume,
            Appearance::Overlay(_) => PrimitiveKind::Overlay,
            Appearance::Labels(_) => PrimitiveKind::Labels,
            Appearance::Text(_) => PrimitiveKind::Text,
        }
    }
}

/// A renderable output of a render stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub visible: bool,
    pub pickable: bool,
    /// World-space bounds, if the primitive has any.
    pub bounds: Option<Aabb>,
    /// Screen anchor of a screen-positioned 2D primitive.
    pub anchor: Option<ScreenAnchor>,
    pub appearance: Appearance,
}

impl Primitive {
    /// Visible, pickable primitive without bounds or anchor.
    pub fn new(appearance: Appearance) -> Self {
        Self {
            visible: true,
            pickable: true,
            bounds: None,
            anchor: None,
            appearance,
        }
    }

    pub fn surface(material: SurfaceMaterial, bounds: Aabb) -> Self {
        Self::new(Appearance::Surface(material)).with_bounds(bounds)
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_anchor(mut self, position: Vec2) -> Self {
        self.anchor = Some(ScreenAnchor { position });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.appearance.kind()
    }
}
