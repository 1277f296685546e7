//! Shared focus selection state.
//!
//! [`SelectionState`] is a plain value. Change notification is the job of
//! its owner: [`Scene::modify_selection`](crate::Scene::modify_selection)
//! compares the state before and after a batch of mutations and emits a
//! single event if anything changed.

use crate::scene::ObjectId;

/// Sub-part of an object that focus is scoped to (e.g. one control point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    /// Object-defined component type.
    pub kind: u32,
    /// Index of the component within its type.
    pub index: u32,
}

impl ComponentRef {
    pub const fn new(kind: u32, index: u32) -> Self {
        Self { kind, index }
    }
}

/// One member of the soft-focus set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftFocusEntry {
    pub object: ObjectId,
    /// Component the soft focus is scoped to, or `None` for the whole object.
    pub component: Option<ComponentRef>,
}

/// Which objects are focused, and how strongly they are highlighted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    focused_object: Option<ObjectId>,
    focused_component: Option<ComponentRef>,
    soft_focus: Vec<SoftFocusEntry>,
    highlight_strength: f32,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    /// Creates an empty selection with unit highlight strength.
    pub fn new() -> Self {
        Self {
            focused_object: None,
            focused_component: None,
            soft_focus: Vec::new(),
            highlight_strength: 1.0,
        }
    }

    /// The hard-focused object, if any.
    pub fn focused_object(&self) -> Option<ObjectId> {
        self.focused_object
    }

    /// Sets the hard-focused object. Returns `true` if it changed.
    pub fn set_focused_object(&mut self, object: Option<ObjectId>) -> bool {
        if self.focused_object == object {
            return false;
        }
        self.focused_object = object;
        true
    }

    /// Component of the hard-focused object that focus is scoped to.
    pub fn focused_component(&self) -> Option<ComponentRef> {
        self.focused_component
    }

    pub fn set_focused_component(&mut self, component: Option<ComponentRef>) -> bool {
        if self.focused_component == component {
            return false;
        }
        self.focused_component = component;
        true
    }

    /// Soft-focus members in insertion order.
    pub fn soft_focus(&self) -> &[SoftFocusEntry] {
        &self.soft_focus
    }

    /// Soft-focused object ids in insertion order.
    pub fn soft_focus_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.soft_focus.iter().map(|entry| entry.object)
    }

    pub fn is_soft_focused(&self, object: ObjectId) -> bool {
        self.soft_focus.iter().any(|entry| entry.object == object)
    }

    /// Component a soft-focus member is scoped to.
    pub fn soft_focus_component(&self, object: ObjectId) -> Option<ComponentRef> {
        self.soft_focus
            .iter()
            .find(|entry| entry.object == object)
            .and_then(|entry| entry.component)
    }

    /// Adds an object to the soft-focus set, or updates its component if it
    /// is already a member. Returns `true` if anything changed.
    pub fn add_soft_focus(&mut self, object: ObjectId, component: Option<ComponentRef>) -> bool {
        if let Some(entry) = self.soft_focus.iter_mut().find(|e| e.object == object) {
            if entry.component == component {
                return false;
            }
            entry.component = component;
            return true;
        }
        self.soft_focus.push(SoftFocusEntry { object, component });
        true
    }

    pub fn remove_soft_focus(&mut self, object: ObjectId) -> bool {
        let before = self.soft_focus.len();
        self.soft_focus.retain(|entry| entry.object != object);
        self.soft_focus.len() != before
    }

    pub fn clear_soft_focus(&mut self) -> bool {
        if self.soft_focus.is_empty() {
            return false;
        }
        self.soft_focus.clear();
        true
    }

    /// Glow intensity of the soft focus outline.
    pub fn highlight_strength(&self) -> f32 {
        self.highlight_strength
    }

    /// Sets the glow intensity. Negative and NaN values clamp to zero.
    pub fn set_highlight_strength(&mut self, strength: f32) -> bool {
        let strength = if strength.is_nan() { 0.0 } else { strength.max(0.0) };
        if self.highlight_strength == strength {
            return false;
        }
        self.highlight_strength = strength;
        true
    }

    /// `true` if there is a hard-focused object or any soft focus.
    pub fn has_focus(&self) -> bool {
        self.focused_object.is_some() || !self.soft_focus.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_has_no_focus() {
        let selection = SelectionState::new();
        assert!(!selection.has_focus());
        assert_eq!(selection.highlight_strength(), 1.0);
    }

    #[test]
    fn setters_report_changes() {
        let mut selection = SelectionState::new();
        assert!(selection.set_focused_object(Some(ObjectId(1))));
        assert!(!selection.set_focused_object(Some(ObjectId(1))));
        assert!(selection.has_focus());
        assert!(selection.set_focused_object(None));
        assert!(!selection.has_focus());
    }

    #[test]
    fn soft_focus_is_an_ordered_set() {
        let mut selection = SelectionState::new();
        assert!(selection.add_soft_focus(ObjectId(2), None));
        assert!(selection.add_soft_focus(ObjectId(1), None));
        assert!(!selection.add_soft_focus(ObjectId(2), None));

        let ids: Vec<_> = selection.soft_focus_objects().collect();
        assert_eq!(ids, vec![ObjectId(2), ObjectId(1)]);
    }

    #[test]
    fn re_adding_updates_component() {
        let mut selection = SelectionState::new();
        selection.add_soft_focus(ObjectId(4), None);
        assert!(selection.add_soft_focus(ObjectId(4), Some(ComponentRef::new(0, 3))));
        assert_eq!(
            selection.soft_focus_component(ObjectId(4)),
            Some(ComponentRef::new(0, 3))
        );
        assert_eq!(selection.soft_focus().len(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let mut selection = SelectionState::new();
        selection.add_soft_focus(ObjectId(1), None);
        selection.add_soft_focus(ObjectId(2), None);
        assert!(selection.remove_soft_focus(ObjectId(1)));
        assert!(!selection.remove_soft_focus(ObjectId(1)));
        assert!(selection.is_soft_focused(ObjectId(2)));
        assert!(selection.clear_soft_focus());
        assert!(!selection.clear_soft_focus());
    }

    #[test]
    fn highlight_strength_clamps() {
        let mut selection = SelectionState::new();
        assert!(selection.set_highlight_strength(-2.0));
        assert_eq!(selection.highlight_strength(), 0.0);
        assert!(!selection.set_highlight_strength(f32::NAN));
        assert!(selection.set_highlight_strength(3.5));
        assert_eq!(selection.highlight_strength(), 3.5);
    }
}
