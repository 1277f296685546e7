//! Explicit subscription registry.
//!
//! The focus manager records every `(source, event kind)` pair it wants to
//! hear about, together with the [`Route`] that handles it. Events whose
//! pair is not registered are ignored. Registration and removal are
//! symmetric: whatever a membership update observes, the next membership
//! update removes before it observes again.

use std::collections::HashMap;

use crate::events::{ChangeEvent, EventKind, SourceId};
use crate::viewport::{PrimitiveId, Viewport};

/// Recompute entry point an observed event is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Selection changed: full cascade for both pipelines.
    Selection,
    /// A focused object changed: full cascade for both pipelines.
    FocusedObject,
    /// A mirrored primitive changed: refresh that mirror and its anchor observation.
    Primitive,
    /// A screen anchor moved: refresh every mirror.
    Anchor,
    /// Camera or render surface changed: recompute the brackets only.
    View,
}

/// Mapping from `(source, event kind)` to the route that handles it.
#[derive(Debug, Default)]
pub struct ObservationRegistry {
    routes: HashMap<(SourceId, EventKind), Route>,
}

impl ObservationRegistry {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registers an observation.
    ///
    /// Returns `false` without touching the existing route if the pair is
    /// already observed, so repeated calls never stack callbacks.
    pub fn observe(&mut self, source: SourceId, kind: EventKind, route: Route) -> bool {
        match self.routes.entry((source, kind)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(route);
                true
            }
        }
    }

    /// Returns `true` if the pair is observed.
    pub fn exists(&self, source: SourceId, kind: EventKind) -> bool {
        self.routes.contains_key(&(source, kind))
    }

    /// Removes one observation. Returns `true` if it existed.
    pub fn unobserve(&mut self, source: SourceId, kind: EventKind) -> bool {
        self.routes.remove(&(source, kind)).is_some()
    }

    /// Removes every observation on `source`. Returns how many were removed.
    pub fn unobserve_source(&mut self, source: SourceId) -> usize {
        let before = self.routes.len();
        self.routes.retain(|(s, _), _| *s != source);
        before - self.routes.len()
    }

    /// Returns `true` if anything on `source` is observed.
    pub fn observes_source(&self, source: SourceId) -> bool {
        self.routes.keys().any(|(s, _)| *s == source)
    }

    /// Looks up the route for an incoming event.
    pub fn route(&self, event: &ChangeEvent) -> Option<Route> {
        self.routes.get(&(event.source, event.kind)).copied()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Moves primitive observations from `previous` to `current`.
///
/// Primitives that left the list lose their observation (and their anchor
/// observation); primitives that joined gain one. A primitive present in
/// both lists keeps its single observation. Anchors are looked up in the
/// viewport for joining primitives only; for leaving primitives the anchor
/// observation is removed unconditionally since the primitive may be gone.
pub fn sync_primitive_observations(
    registry: &mut ObservationRegistry,
    previous: &[PrimitiveId],
    current: &[PrimitiveId],
    viewport: &Viewport,
) {
    for id in previous.iter().filter(|id| !current.contains(id)) {
        registry.unobserve(SourceId::Primitive(*id), EventKind::Modified);
        registry.unobserve(SourceId::Anchor(*id), EventKind::Modified);
    }

    for &id in current {
        registry.observe(SourceId::Primitive(id), EventKind::Modified, Route::Primitive);
        sync_anchor_observation(registry, id, viewport);
    }
}

/// Observes the screen anchor of `id` exactly while the primitive has one.
pub fn sync_anchor_observation(
    registry: &mut ObservationRegistry,
    id: PrimitiveId,
    viewport: &Viewport,
) {
    let anchored = viewport
        .primitive(id)
        .is_some_and(|primitive| primitive.anchor.is_some());
    if anchored {
        registry.observe(SourceId::Anchor(id), EventKind::Modified, Route::Anchor);
    } else {
        registry.unobserve(SourceId::Anchor(id), EventKind::Modified);
    }
}
