//! The render surface and its stages, as seen by the focus pipeline.
//!
//! A [`Viewport`] bundles one render surface, the active camera and the
//! render stages that draw into it. Camera and surface changes push events
//! into the viewport's own [`EventQueue`], and so do primitive edits made
//! through [`Viewport::modify_primitive`], [`Viewport::add_primitive`] and
//! [`Viewport::remove_primitive`].

mod primitive;
mod stage;

pub use primitive::*;
pub use stage::*;

use glam::Vec2;

use crate::events::{ChangeEvent, EventKind, EventQueue, SourceId};
use crate::scene::{Camera, ObjectId, RepresentationId};
use crate::selection::ComponentRef;

/// What the viewport shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Free 3D view.
    ThreeD,
    /// 2D slice through the scene.
    Slice,
}

/// Handle of a renderer attached to the surface on top of the base one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RendererId(pub u32);

/// Handle of a 2D overlay hosted by the base renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u32);

/// A renderer drawing on one surface layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerRenderer {
    pub id: RendererId,
    pub layer: u32,
}

/// Window area the viewport renders into.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    size: Vec2,
    layer_count: u32,
    renderers: Vec<LayerRenderer>,
    base_overlays: Vec<OverlayId>,
    next_handle: u32,
}

impl RenderSurface {
    /// A single-layer surface of `size` pixels.
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            layer_count: 1,
            renderers: Vec::new(),
            base_overlays: Vec::new(),
            next_handle: 0,
        }
    }

    /// Size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn layer_count(&self) -> u32 {
        self.layer_count
    }

    pub fn set_layer_count(&mut self, count: u32) {
        self.layer_count = count.max(1);
    }

    pub fn renderers(&self) -> &[LayerRenderer] {
        &self.renderers
    }

    pub fn has_renderer(&self, id: RendererId) -> bool {
        self.renderers.iter().any(|r| r.id == id)
    }

    /// Attaches a new renderer on `layer`.
    pub fn attach_renderer(&mut self, layer: u32) -> RendererId {
        let id = RendererId(self.allocate_handle());
        self.renderers.push(LayerRenderer { id, layer });
        id
    }

    pub fn base_overlays(&self) -> &[OverlayId] {
        &self.base_overlays
    }

    pub fn has_overlay(&self, id: OverlayId) -> bool {
        self.base_overlays.contains(&id)
    }

    /// Adds a 2D overlay to the base renderer.
    pub fn add_overlay(&mut self) -> OverlayId {
        let id = OverlayId(self.allocate_handle());
        self.base_overlays.push(id);
        id
    }

    fn allocate_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

/// One interactive view: surface, camera and render stages.
pub struct Viewport {
    kind: ViewKind,
    camera: Option<Camera>,
    surface: RenderSurface,
    stages: Vec<Box<dyn RenderStage>>,
    events: EventQueue,
    render_requested: bool,
}

impl Viewport {
    /// A viewport without camera or stages.
    pub fn new(kind: ViewKind, size: Vec2) -> Self {
        Self {
            kind,
            camera: None,
            surface: RenderSurface::new(size),
            stages: Vec::new(),
            events: EventQueue::new(),
            render_requested: false,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Replaces the active camera. The aspect ratio follows the surface.
    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
        if let Some(camera) = self.camera.as_mut() {
            camera.set_aspect(self.surface.size.x, self.surface.size.y);
        }
        self.events.send(ChangeEvent::modified(SourceId::Camera));
    }

    /// Edits the active camera, if there is one.
    pub fn update_camera(&mut self, f: impl FnOnce(&mut Camera)) -> bool {
        let Some(camera) = self.camera.as_mut() else {
            return false;
        };
        f(camera);
        self.events.send(ChangeEvent::modified(SourceId::Camera));
        true
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    /// Mutable surface access. Does not emit a change event.
    pub fn surface_mut(&mut self) -> &mut RenderSurface {
        &mut self.surface
    }

    /// Resizes the surface.
    pub fn resize(&mut self, size: Vec2) {
        if self.surface.size == size {
            return;
        }
        self.surface.size = size;
        if let Some(camera) = self.camera.as_mut() {
            camera.set_aspect(size.x, size.y);
        }
        self.events.send(ChangeEvent::modified(SourceId::Surface));
    }

    pub fn add_stage(&mut self, stage: impl RenderStage + 'static) {
        self.stages.push(Box::new(stage));
    }

    pub fn stages(&self) -> impl Iterator<Item = &dyn RenderStage> {
        self.stages.iter().map(|stage| stage.as_ref())
    }

    /// Returns the stage registered under `id` as a concrete type.
    pub fn stage_mut<T: RenderStage + 'static>(&mut self, id: StageId) -> Option<&mut T> {
        self.stages
            .iter_mut()
            .find(|stage| stage.id() == id)
            .and_then(|stage| stage.as_any_mut().downcast_mut::<T>())
    }

    /// Resolves a primitive through the stage that produced it.
    pub fn primitive(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.stages
            .iter()
            .filter(|stage| stage.id() == id.stage)
            .find_map(|stage| stage.primitive(id))
    }

    /// Object rendered by a primitive.
    pub fn primitive_owner(&self, id: PrimitiveId) -> Option<ObjectId> {
        self.stages
            .iter()
            .filter(|stage| stage.id() == id.stage)
            .find_map(|stage| stage.owner(id))
    }

    /// Edits a primitive in place and notifies its observers.
    ///
    /// A visibility change is reported as a display change of the owning
    /// object, since it changes which primitives render the object. Other
    /// edits are reported on the primitive, and a moved screen anchor on
    /// the anchor alone. Edits that change nothing are not reported.
    pub fn modify_primitive(&mut self, id: PrimitiveId, f: impl FnOnce(&mut Primitive)) -> bool {
        let owner = self.primitive_owner(id);
        let Some(primitive) = self
            .stages
            .iter_mut()
            .filter(|stage| stage.id() == id.stage)
            .find_map(|stage| stage.primitive_mut(id))
        else {
            return false;
        };
        let before = primitive.clone();
        f(primitive);
        if *primitive == before {
            return true;
        }

        let anchor_moved = matches!(
            (before.anchor, primitive.anchor),
            (Some(old), Some(new)) if old != new
        );
        // Gaining or losing an anchor is an edit of the primitive itself.
        let mut rest = primitive.clone();
        rest.anchor = before.anchor;
        let rest_changed =
            rest != before || before.anchor.is_some() != primitive.anchor.is_some();

        match owner {
            Some(object) if primitive.visible != before.visible => {
                self.events.send(ChangeEvent::new(
                    SourceId::Object(object),
                    EventKind::DisplayModified,
                ));
            }
            _ => {
                if rest_changed {
                    self.events.send(ChangeEvent::modified(SourceId::Primitive(id)));
                }
                if anchor_moved {
                    self.events.send(ChangeEvent::modified(SourceId::Anchor(id)));
                }
            }
        }
        true
    }

    /// Adds a primitive to `stage` and reports a display change of `object`.
    ///
    /// Returns `None` if there is no such stage or it does not accept
    /// external primitives.
    pub fn add_primitive(
        &mut self,
        stage: StageId,
        object: ObjectId,
        representation: RepresentationId,
        component: Option<ComponentRef>,
        primitive: Primitive,
    ) -> Option<PrimitiveId> {
        let id = self
            .stages
            .iter_mut()
            .find(|s| s.id() == stage)?
            .add_primitive(object, representation, component, primitive)?;
        self.events.send(ChangeEvent::new(
            SourceId::Object(object),
            EventKind::DisplayModified,
        ));
        Some(id)
    }

    /// Removes a primitive from its stage.
    ///
    /// Reported as a display change of the owning object, or on the
    /// primitive itself when the stage did not know the owner.
    pub fn remove_primitive(&mut self, id: PrimitiveId) -> Option<Primitive> {
        let owner = self.primitive_owner(id);
        let removed = self
            .stages
            .iter_mut()
            .filter(|stage| stage.id() == id.stage)
            .find_map(|stage| stage.remove_primitive(id))?;
        let event = match owner {
            Some(object) => ChangeEvent::new(SourceId::Object(object), EventKind::DisplayModified),
            None => ChangeEvent::modified(SourceId::Primitive(id)),
        };
        self.events.send(event);
        Some(removed)
    }

    /// Primitives produced for one representation by every stage except `exclude`.
    pub fn primitives_for(
        &self,
        exclude: StageId,
        object: ObjectId,
        representation: RepresentationId,
        component: Option<ComponentRef>,
    ) -> Vec<PrimitiveId> {
        self.stages
            .iter()
            .filter(|stage| stage.id() != exclude)
            .flat_map(|stage| stage.primitives_for(object, representation, component))
            .collect()
    }

    /// Asks the host to render the next frame. Requests coalesce.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    pub fn render_requested(&self) -> bool {
        self.render_requested
    }

    /// Returns and resets the pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    pub fn drain_events(&mut self) -> Vec<ChangeEvent> {
        self.events.drain()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}
