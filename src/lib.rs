//! RedLilium Focus - focus highlighting for interactive viewports
//!
//! Two visual treatments are driven from a shared [`SelectionState`]:
//! - **Soft focus**: every visible primitive of a softly-focused object is
//!   mirrored, flattened to a white silhouette and composited on an extra
//!   render layer carrying an outline glow pass.
//! - **Hard focus**: the single hard-focused object gets screen-space corner
//!   brackets around the projection of its 3D bounds.
//!
//! # Architecture
//! - [`Scene`] and [`Viewport`] are the collaborators the pipeline reads.
//!   They push [`ChangeEvent`]s into queues when they change.
//! - [`FocusManager`] owns an [`ObservationRegistry`] and routes each
//!   observed event to the cheapest recompute that covers it.
//! - [`FocusWidget`] turns the cancel-focus key into a selection reset.
//!
//! Everything is single-threaded and synchronous: a cascade runs to
//! completion inside the call that triggered it, and rendering is only
//! requested through [`Viewport::request_render`].

pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod manager;
pub mod observation;
pub mod pipeline;
pub mod scene;
pub mod selection;
pub mod viewport;
pub mod widget;

pub use config::FocusConfig;
pub use error::FocusError;
pub use events::{ChangeEvent, EventKind, EventQueue, SourceId};
pub use input::{InputEvent, KeyBinding, KeyCode, Modifiers};
pub use manager::FocusManager;
pub use observation::{ObservationRegistry, Route};
pub use scene::{Aabb, Camera, ObjectId, Projection, RepresentationId, Scene, SceneObject};
pub use selection::{ComponentRef, SelectionState, SoftFocusEntry};
pub use viewport::{
    Appearance, Primitive, PrimitiveId, PrimitiveKind, PropStage, RenderStage, RenderSurface,
    StageId, ViewKind, Viewport,
};
pub use widget::{FocusWidget, WidgetEvent, WidgetState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
