//! Scene objects and their representations.

use crate::events::EventKind;

use super::{ObjectId, RepresentationId};

/// One renderable view of a scene object. Render stages turn visible
/// representations into primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representation {
    pub id: RepresentationId,
    pub visible: bool,
}

impl Representation {
    pub fn new(id: RepresentationId) -> Self {
        Self { id, visible: true }
    }
}

/// An entity in the scene that may be focused.
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    name: String,
    representations: Vec<Representation>,
    content_events: Vec<u32>,
}

impl SceneObject {
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            representations: Vec::new(),
            content_events: Vec::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn representations(&self) -> &[Representation] {
        &self.representations
    }

    pub fn visible_representations(&self) -> impl Iterator<Item = &Representation> {
        self.representations.iter().filter(|rep| rep.visible)
    }

    pub(crate) fn push_representation(&mut self, representation: Representation) {
        self.representations.push(representation);
    }

    pub(crate) fn representation_mut(
        &mut self,
        id: RepresentationId,
    ) -> Option<&mut Representation> {
        self.representations.iter_mut().find(|rep| rep.id == id)
    }

    pub(crate) fn add_content_event(&mut self, code: u32) -> bool {
        if self.content_events.contains(&code) {
            return false;
        }
        self.content_events.push(code);
        true
    }

    /// Content event codes this object emits besides the generic ones.
    pub fn content_events(&self) -> &[u32] {
        &self.content_events
    }

    /// Every event kind a focus observer must subscribe to on this object.
    pub fn observed_events(&self) -> Vec<EventKind> {
        let mut kinds: Vec<EventKind> = self
            .content_events
            .iter()
            .map(|&code| EventKind::ContentModified(code))
            .collect();
        kinds.extend([
            EventKind::Modified,
            EventKind::TransformModified,
            EventKind::DisplayModified,
        ]);
        kinds
    }
}
