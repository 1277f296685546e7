//! Render stages: producers of primitives for scene objects.

use std::any::Any;

use super::{Primitive, PrimitiveId};
use crate::scene::{ObjectId, RepresentationId};
use crate::selection::ComponentRef;

/// Identifier of a render stage within a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StageId(pub u32);

/// A stage that turns object representations into primitives.
///
/// The focus pipeline only reads stages: it asks which primitives a
/// representation produced and inspects them.
pub trait RenderStage {
    fn id(&self) -> StageId;

    fn name(&self) -> &str;

    /// Primitives produced for one representation of `object`.
    ///
    /// With a `component`, only primitives rendering that component are
    /// returned. With `None`, every primitive of the representation is.
    fn primitives_for(
        &self,
        object: ObjectId,
        representation: RepresentationId,
        component: Option<ComponentRef>,
    ) -> Vec<PrimitiveId>;

    fn primitive(&self, id: PrimitiveId) -> Option<&Primitive>;

    /// Object the primitive renders.
    fn owner(&self, id: PrimitiveId) -> Option<ObjectId>;

    /// Mutable access for stages that allow external edits.
    fn primitive_mut(&mut self, _id: PrimitiveId) -> Option<&mut Primitive> {
        None
    }

    /// Adds a primitive for stages that accept external ones.
    fn add_primitive(
        &mut self,
        _object: ObjectId,
        _representation: RepresentationId,
        _component: Option<ComponentRef>,
        _primitive: Primitive,
    ) -> Option<PrimitiveId> {
        None
    }

    fn remove_primitive(&mut self, _id: PrimitiveId) -> Option<Primitive> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Debug)]
struct PropEntry {
    object: ObjectId,
    representation: RepresentationId,
    component: Option<ComponentRef>,
    primitive: Primitive,
}

/// A render stage backed by an explicit list of primitives.
///
/// Hosts register one entry per primitive they render; tests use it to
/// stand in for real geometry stages.
#[derive(Debug)]
pub struct PropStage {
    id: StageId,
    name: String,
    entries: Vec<(PrimitiveId, PropEntry)>,
    next_index: u32,
}

impl PropStage {
    pub fn new(id: StageId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            entries: Vec::new(),
            next_index: 0,
        }
    }

    /// Registers a primitive rendering `representation` of `object`.
    pub fn add(
        &mut self,
        object: ObjectId,
        representation: RepresentationId,
        component: Option<ComponentRef>,
        primitive: Primitive,
    ) -> PrimitiveId {
        let id = PrimitiveId::new(self.id, self.next_index);
        self.next_index += 1;
        self.entries.push((
            id,
            PropEntry {
                object,
                representation,
                component,
                primitive,
            },
        ));
        id
    }

    pub fn remove(&mut self, id: PrimitiveId) -> Option<Primitive> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1.primitive)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RenderStage for PropStage {
    fn id(&self) -> StageId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn primitives_for(
        &self,
        object: ObjectId,
        representation: RepresentationId,
        component: Option<ComponentRef>,
    ) -> Vec<PrimitiveId> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.object == object && entry.representation == representation)
            .filter(|(_, entry)| component.is_none() || entry.component == component)
            .map(|(id, _)| *id)
            .collect()
    }

    fn primitive(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, entry)| &entry.primitive)
    }

    fn owner(&self, id: PrimitiveId) -> Option<ObjectId> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, entry)| entry.object)
    }

    fn primitive_mut(&mut self, id: PrimitiveId) -> Option<&mut Primitive> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, entry)| &mut entry.primitive)
    }

    fn add_primitive(
        &mut self,
        object: ObjectId,
        representation: RepresentationId,
        component: Option<ComponentRef>,
        primitive: Primitive,
    ) -> Option<PrimitiveId> {
        Some(self.add(object, representation, component, primitive))
    }

    fn remove_primitive(&mut self, id: PrimitiveId) -> Option<Primitive> {
        self.remove(id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
