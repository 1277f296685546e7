//! Silhouette flattening of mirrored primitives.
//!
//! The outline pass only needs coverage, so a mirror keeps the geometry of
//! its original and drops everything that would vary its color.

use glam::{Vec3, Vec4};

use crate::viewport::{Appearance, LabelHierarchy, PrimitiveKind, TextStyle, TransferFunction};

/// Label array name of a rebuilt label hierarchy.
pub const LABEL_ARRAY: &str = "labels";
/// Priority array name of a rebuilt label hierarchy.
pub const PRIORITY_ARRAY: &str = "priority";

/// Flattens `appearance` to white according to `kind`.
///
/// Returns `false`, leaving the appearance untouched, if the appearance no
/// longer matches the kind the mirror was created with.
pub fn flatten(appearance: &mut Appearance, kind: PrimitiveKind) -> bool {
    match (kind, appearance) {
        (PrimitiveKind::Surface, Appearance::Surface(material)) => {
            material.texture = None;
            material.lighting = false;
            material.color = Vec3::ONE;
            material.opacity = 1.0;
        }
        (PrimitiveKind::Volume, Appearance::Volume(material)) => {
            material.color = TransferFunction::constant(Vec3::ONE);
            material.diffuse = 0.0;
            material.ambient = 1.0;
            material.shade = false;
        }
        (PrimitiveKind::Overlay, Appearance::Overlay(material)) => {
            material.color = Vec3::ONE;
        }
        (PrimitiveKind::Labels, Appearance::Labels(labels)) => {
            labels.material.color = Vec3::ONE;
            labels.hierarchy = labels.hierarchy.take().map(rebuild_label_hierarchy);
        }
        (PrimitiveKind::Text, Appearance::Text(style)) => {
            style.background = Vec4::ONE;
        }
        (kind, appearance) => {
            log::trace!(
                "Mirror kind {:?} does not match appearance {:?}",
                kind,
                appearance.kind()
            );
            return false;
        }
    }
    true
}

/// Rebuilds a label hierarchy over the same points with an opaque white
/// text background.
fn rebuild_label_hierarchy(source: LabelHierarchy) -> LabelHierarchy {
    LabelHierarchy {
        positions: source.positions,
        labels: source.labels,
        priorities: source.priorities,
        label_array: LABEL_ARRAY.to_string(),
        priority_array: PRIORITY_ARRAY.to_string(),
        text: TextStyle {
            background: Vec4::ONE,
            opacity: 1.0,
            ..source.text
        },
    }
}
