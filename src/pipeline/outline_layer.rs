//! Compositing layer hosting the soft focus silhouettes.

use crate::scene::Camera;
use crate::viewport::{PrimitiveId, RendererId, Viewport};

use super::postprocess::OutlineGlowPass;

/// Extra renderer drawing focused primitives on their own surface layer.
///
/// The layer lists original primitive ids; the soft focus pipeline
/// resolves each to its flattened mirror when drawing.
#[derive(Debug, Clone)]
pub struct OutlineLayer {
    layer: u32,
    use_fxaa: bool,
    use_shadows: bool,
    use_depth_peeling: bool,
    use_depth_peeling_for_volumes: bool,
    renderer: Option<RendererId>,
    glow: OutlineGlowPass,
    props: Vec<PrimitiveId>,
}

impl OutlineLayer {
    pub fn new(layer: u32, use_fxaa: bool) -> Self {
        Self {
            layer,
            use_fxaa,
            use_shadows: false,
            use_depth_peeling: false,
            use_depth_peeling_for_volumes: false,
            renderer: None,
            glow: OutlineGlowPass::new(layer),
            props: Vec::new(),
        }
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn use_fxaa(&self) -> bool {
        self.use_fxaa
    }

    pub fn use_shadows(&self) -> bool {
        self.use_shadows
    }

    pub fn use_depth_peeling(&self) -> bool {
        self.use_depth_peeling
    }

    pub fn use_depth_peeling_for_volumes(&self) -> bool {
        self.use_depth_peeling_for_volumes
    }

    pub fn glow(&self) -> &OutlineGlowPass {
        &self.glow
    }

    /// Original primitive ids currently drawn on the layer.
    pub fn props(&self) -> &[PrimitiveId] {
        &self.props
    }

    pub fn renderer(&self) -> Option<RendererId> {
        self.renderer
    }

    pub fn is_attached(&self) -> bool {
        self.renderer.is_some()
    }

    /// The layer renders through the viewport's active camera.
    pub fn camera<'a>(&self, viewport: &'a Viewport) -> Option<&'a Camera> {
        viewport.camera()
    }

    pub(crate) fn clear_props(&mut self) {
        self.props.clear();
    }

    pub(crate) fn add_prop(&mut self, id: PrimitiveId) {
        if !self.props.contains(&id) {
            self.props.push(id);
        }
    }

    pub(crate) fn set_intensity(&mut self, intensity: f32) {
        self.glow.set_intensity(intensity);
    }

    /// Makes sure the surface has room for the layer and hosts its renderer.
    ///
    /// Attaching happens once; the renderer is never detached.
    pub(crate) fn ensure_attached(&mut self, viewport: &mut Viewport) {
        let surface = viewport.surface_mut();
        if surface.layer_count() < self.layer + 1 {
            surface.set_layer_count(self.layer + 1);
        }

        let attached = self.renderer.is_some_and(|id| surface.has_renderer(id));
        if !attached {
            let id = surface.attach_renderer(self.layer);
            log::debug!("Attached outline renderer {:?} on layer {}", id, self.layer);
            self.renderer = Some(id);
        }
    }
}
