//! Focus manager: event routing for both focus pipelines.
//!
//! The manager is the only part of the crate that talks to the event
//! system. Everything it observes is recorded in its
//! [`ObservationRegistry`], and every observed event is routed to the
//! smallest recompute that covers it:
//!
//! | Source | Route | Work |
//! |---|---|---|
//! | selection | [`Route::Selection`] | widget state, full cascade |
//! | focused object | [`Route::FocusedObject`] | full cascade |
//! | original primitive | [`Route::Primitive`] | one mirror and its anchor observation, plus brackets for hard originals |
//! | screen anchor | [`Route::Anchor`] | every mirror |
//! | camera, surface | [`Route::View`] | brackets |

use std::collections::HashMap;

use crate::config::FocusConfig;
use crate::error::FocusError;
use crate::events::{ChangeEvent, EventKind, SourceId};
use crate::input::InputEvent;
use crate::observation::{
    sync_anchor_observation, sync_primitive_observations, ObservationRegistry, Route,
};
use crate::pipeline::{
    BoundsAccumulator, BracketGeometry, HardFocusPipeline, Mirror, OutlineLayer,
    SoftFocusPipeline,
};
use crate::scene::{ObjectId, Scene};
use crate::viewport::{PrimitiveId, StageId, Viewport};
use crate::widget::{FocusWidget, WidgetState};

/// Maximum number of drain rounds in one [`FocusManager::pump`] call.
///
/// Prevents infinite loops when handling events keeps producing new ones.
pub const MAX_CASCADE_ROUNDS: usize = 100;

/// Focus highlighting for one viewport.
pub struct FocusManager {
    stage_id: StageId,
    config: FocusConfig,
    registry: ObservationRegistry,
    widget: FocusWidget,
    soft: SoftFocusPipeline,
    hard: HardFocusPipeline,
    observed_objects: Vec<ObjectId>,
    observed_primitives: Vec<PrimitiveId>,
}

impl FocusManager {
    /// Creates a manager with the default configuration.
    ///
    /// `stage_id` identifies the stage owning the focus overlays; stages
    /// registered under it are never queried for original primitives.
    pub fn new(stage_id: StageId) -> Self {
        Self::build(stage_id, FocusConfig::default())
    }

    /// Creates a manager with a custom configuration.
    pub fn with_config(stage_id: StageId, config: FocusConfig) -> Result<Self, FocusError> {
        config.validate()?;
        Ok(Self::build(stage_id, config))
    }

    fn build(stage_id: StageId, config: FocusConfig) -> Self {
        Self {
            stage_id,
            registry: ObservationRegistry::new(),
            widget: FocusWidget::new(&config),
            soft: SoftFocusPipeline::new(stage_id, &config),
            hard: HardFocusPipeline::new(stage_id, &config),
            observed_objects: Vec::new(),
            observed_primitives: Vec::new(),
            config,
        }
    }

    pub fn stage_id(&self) -> StageId {
        self.stage_id
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    pub fn registry(&self) -> &ObservationRegistry {
        &self.registry
    }

    pub fn widget(&self) -> &FocusWidget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut FocusWidget {
        &mut self.widget
    }

    pub fn widget_state(&self) -> WidgetState {
        self.widget.state()
    }

    pub fn soft_focus(&self) -> &SoftFocusPipeline {
        &self.soft
    }

    pub fn hard_focus(&self) -> &HardFocusPipeline {
        &self.hard
    }

    pub fn outline_layer(&self) -> &OutlineLayer {
        self.soft.layer()
    }

    pub fn mirrors(&self) -> &HashMap<PrimitiveId, Mirror> {
        self.soft.mirrors()
    }

    pub fn bracket_geometry(&self) -> &BracketGeometry {
        self.hard.geometry()
    }

    pub fn bounds(&self) -> &BoundsAccumulator {
        self.hard.bounds()
    }

    pub fn soft_focus_members(&self) -> &[ObjectId] {
        self.soft.members()
    }

    pub fn hard_focus_member(&self) -> Option<ObjectId> {
        self.hard.member()
    }

    /// Connects the manager to a scene and viewport.
    ///
    /// Observes the selection, the camera and the surface, then runs the
    /// full update. Calling it again is harmless.
    pub fn attach(&mut self, scene: &Scene, viewport: &mut Viewport) {
        self.registry
            .observe(SourceId::Selection, EventKind::Modified, Route::Selection);
        for source in [SourceId::Camera, SourceId::Surface] {
            if !self.registry.exists(source, EventKind::Modified) {
                self.registry.observe(source, EventKind::Modified, Route::View);
            }
        }

        self.widget.on_selection_modified(scene.selection());
        self.update_from_scene(scene, viewport);
    }

    /// Full recompute of both pipelines from the current selection.
    pub fn update_from_scene(&mut self, scene: &Scene, viewport: &mut Viewport) {
        self.remove_object_observations();
        self.update_focus(scene, viewport);
        self.add_object_observations(scene);
        viewport.request_render();
    }

    fn update_focus(&mut self, scene: &Scene, viewport: &mut Viewport) {
        self.soft.recompute_membership(scene);
        self.soft.refresh_original_primitives(scene, viewport);
        self.hard.recompute_membership(scene);
        self.hard.refresh_original_primitives(scene, viewport);
        self.update_primitive_observations(viewport);

        self.soft.update(scene, viewport);
        self.hard.update(scene, viewport);
    }

    fn remove_object_observations(&mut self) {
        for object in self.observed_objects.drain(..) {
            self.registry.unobserve_source(SourceId::Object(object));
        }
    }

    fn add_object_observations(&mut self, scene: &Scene) {
        let members = self.soft.members().iter().copied().chain(self.hard.member());
        for object in members {
            if self.observed_objects.contains(&object) {
                continue;
            }
            let Some(scene_object) = scene.object(object) else {
                continue;
            };
            for kind in scene_object.observed_events() {
                self.registry
                    .observe(SourceId::Object(object), kind, Route::FocusedObject);
            }
            self.observed_objects.push(object);
        }
    }

    /// Primitives are shared by both pipelines, so observations follow
    /// the union of their original lists.
    fn update_primitive_observations(&mut self, viewport: &Viewport) {
        let mut current: Vec<PrimitiveId> = self.soft.originals().to_vec();
        for &id in self.hard.originals() {
            if !current.contains(&id) {
                current.push(id);
            }
        }
        sync_primitive_observations(
            &mut self.registry,
            &self.observed_primitives,
            &current,
            viewport,
        );
        self.observed_primitives = current;
    }

    /// Routes one event. Returns `false` if the event is not observed.
    pub fn process_event(
        &mut self,
        scene: &Scene,
        viewport: &mut Viewport,
        event: &ChangeEvent,
    ) -> bool {
        let Some(route) = self.registry.route(event) else {
            return false;
        };
        log::trace!("Routing {:?} to {:?}", event, route);

        match route {
            Route::Selection => {
                self.widget.on_selection_modified(scene.selection());
                self.update_from_scene(scene, viewport);
            }
            Route::FocusedObject => self.update_from_scene(scene, viewport),
            Route::Primitive => {
                let SourceId::Primitive(id) = event.source else {
                    return false;
                };
                self.on_primitive_modified(id, scene, viewport);
            }
            Route::Anchor => {
                self.soft.refresh_appearances(viewport);
                viewport.request_render();
            }
            Route::View => {
                self.hard.recompute_bracket_geometry(scene.selection(), viewport);
                viewport.request_render();
            }
        }
        true
    }

    fn on_primitive_modified(&mut self, id: PrimitiveId, scene: &Scene, viewport: &mut Viewport) {
        let visible = viewport.primitive(id).is_some_and(|p| p.visible);
        if !visible {
            // Membership of the original lists changed.
            self.update_from_scene(scene, viewport);
            return;
        }

        self.soft.refresh_appearance(id, viewport);
        sync_anchor_observation(&mut self.registry, id, viewport);
        if self.hard.is_original(id) {
            self.hard.recompute_bounds(viewport);
            self.hard.recompute_bracket_geometry(scene.selection(), viewport);
        }
        viewport.request_render();
    }

    /// Drains the scene and viewport queues until both are empty.
    ///
    /// Returns the number of events handled.
    pub fn pump(&mut self, scene: &mut Scene, viewport: &mut Viewport) -> usize {
        let mut handled = 0;
        for _ in 0..MAX_CASCADE_ROUNDS {
            let mut events = scene.drain_events();
            events.extend(viewport.drain_events());
            if events.is_empty() {
                return handled;
            }
            for event in &events {
                if self.process_event(scene, viewport, event) {
                    handled += 1;
                }
            }
        }

        if scene.has_pending_events() || viewport.has_pending_events() {
            log::warn!(
                "Focus event cascade did not settle after {} rounds",
                MAX_CASCADE_ROUNDS
            );
        }
        handled
    }

    /// Returns the claim distance if the widget wants `event`.
    pub fn can_process_interaction(&self, event: &InputEvent) -> Option<f64> {
        self.widget.can_process(event)
    }

    /// Lets the widget handle `event`. The resulting selection change is
    /// picked up by the next [`pump`](Self::pump).
    pub fn process_interaction(&mut self, event: &InputEvent, scene: &mut Scene) -> bool {
        self.widget.process(event, scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_rejected() {
        let config = FocusConfig::default().with_outline_layer(0);
        assert!(FocusManager::with_config(StageId(0), config).is_err());
    }

    #[test]
    fn attach_observes_view_sources_once() {
        let mut scene = Scene::new();
        let mut viewport = Viewport::new(crate::ViewKind::ThreeD, glam::Vec2::splat(64.0));
        let mut manager = FocusManager::new(StageId(0));
        manager.attach(&scene, &mut viewport);
        manager.attach(&scene, &mut viewport);

        assert_eq!(manager.registry().len(), 3);
        assert!(viewport.take_render_request());
        assert!(manager.outline_layer().is_attached());
        assert_eq!(manager.pump(&mut scene, &mut viewport), 0);
    }

    #[test]
    fn unobserved_events_are_ignored() {
        let scene = Scene::new();
        let mut viewport = Viewport::new(crate::ViewKind::ThreeD, glam::Vec2::splat(64.0));
        let mut manager = FocusManager::new(StageId(0));
        let event = ChangeEvent::modified(SourceId::Camera);
        assert!(!manager.process_event(&scene, &mut viewport, &event));
        assert!(!viewport.render_requested());
    }
}
