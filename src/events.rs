//! Change notifications.
//!
//! Collaborators ([`Scene`](crate::Scene), [`Viewport`](crate::Viewport))
//! push a [`ChangeEvent`] into their [`EventQueue`] whenever something
//! observable changes. The focus manager drains the queues and decides,
//! through its [`ObservationRegistry`](crate::ObservationRegistry), which
//! events it actually cares about.

use std::collections::VecDeque;

use crate::scene::ObjectId;
use crate::viewport::PrimitiveId;

/// What changed on a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Generic modification of the source itself.
    Modified,
    /// Object-specific content change. The code is declared by the object.
    ContentModified(u32),
    /// The object's transform (or a parent transform) changed.
    TransformModified,
    /// One of the object's representations changed (visibility, style).
    DisplayModified,
}

/// Identity of something that can emit change events.
///
/// Sources are referenced by id only, so an observation never keeps its
/// target alive and a destroyed target simply stops emitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Selection,
    Object(ObjectId),
    Primitive(PrimitiveId),
    /// Screen-anchor position of a 2D primitive.
    Anchor(PrimitiveId),
    Camera,
    Surface,
}

/// A single change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    pub source: SourceId,
    pub kind: EventKind,
}

impl ChangeEvent {
    pub const fn new(source: SourceId, kind: EventKind) -> Self {
        Self { source, kind }
    }

    /// Shorthand for a generic [`EventKind::Modified`] event.
    pub const fn modified(source: SourceId) -> Self {
        Self::new(source, EventKind::Modified)
    }
}

/// FIFO queue of pending change events.
///
/// Events are delivered in the order they were sent. Draining hands the
/// whole batch to the caller, so events sent while the batch is being
/// processed land in the next batch.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<ChangeEvent>,
}

impl EventQueue {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Appends an event to the back of the queue.
    pub fn send(&mut self, event: ChangeEvent) {
        self.pending.push_back(event);
    }

    /// Removes and returns every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.pending).into()
    }

    /// Iterates over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeEvent> {
        self.pending.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order() {
        let mut queue = EventQueue::new();
        queue.send(ChangeEvent::modified(SourceId::Camera));
        queue.send(ChangeEvent::new(
            SourceId::Object(ObjectId(3)),
            EventKind::TransformModified,
        ));

        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].source, SourceId::Camera);
        assert_eq!(events[1].kind, EventKind::TransformModified);
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_drops_pending() {
        let mut queue = EventQueue::new();
        queue.send(ChangeEvent::modified(SourceId::Surface));
        assert_eq!(queue.len(), 1);
        queue.clear();
        assert_eq!(queue.iter().count(), 0);
    }
}
