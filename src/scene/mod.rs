//! Scene objects and the focus selection they are picked from.
//!
//! The scene is the external collaborator the focus pipeline reads:
//! objects with their representations, plus the shared [`SelectionState`].
//! Every observable mutation goes through a `Scene` method so it can push
//! the matching [`ChangeEvent`] into the scene's [`EventQueue`].

mod bounds;
mod camera;
mod object;

pub use bounds::*;
pub use camera::*;
pub use object::*;

use std::collections::HashMap;

use crate::events::{ChangeEvent, EventKind, EventQueue, SourceId};
use crate::selection::SelectionState;

/// Identifier of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Identifier of one representation of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepresentationId(pub u64);

/// Objects, selection and pending change notifications.
pub struct Scene {
    objects: HashMap<ObjectId, SceneObject>,
    selection: SelectionState,
    events: EventQueue,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            selection: SelectionState::new(),
            events: EventQueue::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adds an empty object and returns its id.
    pub fn add_object(&mut self, name: impl Into<String>) -> ObjectId {
        let id = ObjectId(self.allocate_id());
        self.objects.insert(id, SceneObject::new(id, name));
        id
    }

    /// Adds a visible representation to an object.
    ///
    /// Returns `None` if the object does not exist.
    pub fn add_representation(&mut self, object: ObjectId) -> Option<RepresentationId> {
        if !self.objects.contains_key(&object) {
            return None;
        }
        let id = RepresentationId(self.allocate_id());
        let scene_object = self.objects.get_mut(&object)?;
        scene_object.push_representation(Representation::new(id));
        self.events
            .send(ChangeEvent::new(SourceId::Object(object), EventKind::DisplayModified));
        Some(id)
    }

    /// Removes an object.
    ///
    /// Selection entries referencing it are left in place; consumers skip
    /// ids that no longer resolve.
    pub fn remove_object(&mut self, object: ObjectId) -> Option<SceneObject> {
        let removed = self.objects.remove(&object)?;
        self.events.send(ChangeEvent::modified(SourceId::Object(object)));
        Some(removed)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Iterates over all objects in unspecified order.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Declares an extra content event code for an object.
    pub fn add_content_event(&mut self, object: ObjectId, code: u32) -> bool {
        match self.objects.get_mut(&object) {
            Some(scene_object) => scene_object.add_content_event(code),
            None => false,
        }
    }

    /// Shows or hides one representation of an object.
    pub fn set_representation_visible(
        &mut self,
        object: ObjectId,
        representation: RepresentationId,
        visible: bool,
    ) -> bool {
        let Some(scene_object) = self.objects.get_mut(&object) else {
            return false;
        };
        let Some(rep) = scene_object.representation_mut(representation) else {
            return false;
        };
        if rep.visible == visible {
            return false;
        }
        rep.visible = visible;
        self.events
            .send(ChangeEvent::new(SourceId::Object(object), EventKind::DisplayModified));
        true
    }

    /// Shows or hides every representation of an object.
    pub fn set_object_visible(&mut self, object: ObjectId, visible: bool) -> bool {
        let representations: Vec<_> = match self.objects.get(&object) {
            Some(scene_object) => scene_object.representations().iter().map(|r| r.id).collect(),
            None => return false,
        };
        let mut changed = false;
        for representation in representations {
            changed |= self.set_representation_visible(object, representation, visible);
        }
        changed
    }

    /// Reports that an object's content changed.
    pub fn notify_content_modified(&mut self, object: ObjectId, code: u32) {
        self.events.send(ChangeEvent::new(
            SourceId::Object(object),
            EventKind::ContentModified(code),
        ));
    }

    /// Reports that an object's transform changed.
    pub fn notify_transform_modified(&mut self, object: ObjectId) {
        self.events.send(ChangeEvent::new(
            SourceId::Object(object),
            EventKind::TransformModified,
        ));
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Applies a batch of selection mutations.
    ///
    /// Observers see at most one [`SourceId::Selection`] notification per
    /// call, and none if the batch left the state unchanged.
    pub fn modify_selection<R>(&mut self, f: impl FnOnce(&mut SelectionState) -> R) -> R {
        let before = self.selection.clone();
        let result = f(&mut self.selection);
        if self.selection != before {
            self.events.send(ChangeEvent::modified(SourceId::Selection));
        }
        result
    }

    /// Sets the hard-focused object in its own batch.
    pub fn set_focused_object(&mut self, object: Option<ObjectId>) -> bool {
        self.modify_selection(|selection| selection.set_focused_object(object))
    }

    /// Adds an unscoped soft focus member in its own batch.
    pub fn add_soft_focus(&mut self, object: ObjectId) -> bool {
        self.modify_selection(|selection| selection.add_soft_focus(object, None))
    }

    /// Removes and returns all pending notifications.
    pub fn drain_events(&mut self) -> Vec<ChangeEvent> {
        self.events.drain()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
