//! Keyboard interaction for clearing focus.

use std::collections::HashMap;

use crate::config::FocusConfig;
use crate::input::{InputEvent, KeyBinding};
use crate::scene::Scene;
use crate::selection::SelectionState;

/// Interaction state of the focus widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetState {
    /// Nothing is focused.
    #[default]
    Idle,
    /// Something has hard or soft focus.
    Focused,
}

/// Widget-level action an input event translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetEvent {
    /// Clear hard focus and every soft focus member.
    CancelFocus,
}

/// Translates key presses into focus actions.
///
/// The state is never changed by input directly; it follows the selection
/// through [`FocusWidget::on_selection_modified`].
#[derive(Debug, Clone)]
pub struct FocusWidget {
    state: WidgetState,
    translations: HashMap<(WidgetState, KeyBinding), WidgetEvent>,
    claim_distance2: f64,
}

impl FocusWidget {
    pub fn new(config: &FocusConfig) -> Self {
        let mut widget = Self {
            state: WidgetState::Idle,
            translations: HashMap::new(),
            claim_distance2: config.claim_distance2,
        };
        widget.set_translation(
            WidgetState::Focused,
            config.cancel_binding,
            WidgetEvent::CancelFocus,
        );
        widget
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Adds or replaces a translation. Returns the one it replaced.
    pub fn set_translation(
        &mut self,
        state: WidgetState,
        binding: KeyBinding,
        event: WidgetEvent,
    ) -> Option<WidgetEvent> {
        self.translations.insert((state, binding), event)
    }

    pub fn remove_translation(&mut self, state: WidgetState, binding: KeyBinding) -> Option<WidgetEvent> {
        self.translations.remove(&(state, binding))
    }

    /// Follows the selection: `Focused` whenever anything has focus.
    pub fn on_selection_modified(&mut self, selection: &SelectionState) {
        self.state = if selection.has_focus() {
            WidgetState::Focused
        } else {
            WidgetState::Idle
        };
    }

    /// Widget event for `event` in the current state.
    pub fn translate(&self, event: &InputEvent) -> Option<WidgetEvent> {
        let binding = event.pressed_binding()?;
        self.translations.get(&(self.state, binding)).copied()
    }

    /// Claims `event` if it maps to an action.
    ///
    /// The returned squared distance is the configured claim distance, far
    /// beyond any widget under the pointer.
    pub fn can_process(&self, event: &InputEvent) -> Option<f64> {
        match self.translate(event)? {
            WidgetEvent::CancelFocus => Some(self.claim_distance2),
        }
    }

    /// Performs the action `event` maps to. Returns whether it was handled.
    pub fn process(&mut self, event: &InputEvent, scene: &mut Scene) -> bool {
        match self.translate(event) {
            Some(WidgetEvent::CancelFocus) => {
                log::debug!("Cancelling focus");
                scene.modify_selection(|selection| {
                    selection.set_focused_object(None);
                    selection.clear_soft_focus();
                });
                true
            }
            None => false,
        }
    }
}

impl Default for FocusWidget {
    fn default() -> Self {
        Self::new(&FocusConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LOW_PRIORITY_CLAIM_DISTANCE2;
    use crate::events::{ChangeEvent, SourceId};
    use crate::input::{KeyCode, Modifiers};

    fn focused_scene() -> Scene {
        let mut scene = Scene::new();
        let a = scene.add_object("a");
        let b = scene.add_object("b");
        scene.modify_selection(|s| {
            s.set_focused_object(Some(a));
            s.add_soft_focus(b, None);
        });
        scene.drain_events();
        scene
    }

    #[test]
    fn idle_ignores_escape() {
        let widget = FocusWidget::default();
        let escape = InputEvent::key_press(KeyCode::Escape);
        assert_eq!(widget.state(), WidgetState::Idle);
        assert_eq!(widget.can_process(&escape), None);
    }

    #[test]
    fn escape_cancels_in_one_notification() {
        let mut scene = focused_scene();
        let mut widget = FocusWidget::default();
        widget.on_selection_modified(scene.selection());
        assert_eq!(widget.state(), WidgetState::Focused);

        let escape = InputEvent::key_press(KeyCode::Escape);
        assert_eq!(widget.can_process(&escape), Some(LOW_PRIORITY_CLAIM_DISTANCE2));
        assert!(widget.process(&escape, &mut scene));

        assert!(!scene.selection().has_focus());
        assert_eq!(
            scene.drain_events(),
            vec![ChangeEvent::modified(SourceId::Selection)]
        );
        // State only changes through the selection notification.
        assert_eq!(widget.state(), WidgetState::Focused);
        widget.on_selection_modified(scene.selection());
        assert_eq!(widget.state(), WidgetState::Idle);
    }

    #[test]
    fn modified_escape_is_not_claimed() {
        let scene = focused_scene();
        let mut widget = FocusWidget::default();
        widget.on_selection_modified(scene.selection());
        let shifted = InputEvent::KeyPress {
            key: KeyCode::Escape,
            modifiers: Modifiers::SHIFT,
        };
        assert_eq!(widget.can_process(&shifted), None);
        let release = InputEvent::KeyRelease {
            key: KeyCode::Escape,
            modifiers: Modifiers::empty(),
        };
        assert_eq!(widget.translate(&release), None);
    }

    #[test]
    fn configured_cancel_binding() {
        let config = FocusConfig::default()
            .with_cancel_binding(KeyBinding::with_modifiers(KeyCode::Backspace, Modifiers::CONTROL));
        let mut scene = focused_scene();
        let mut widget = FocusWidget::new(&config);
        widget.on_selection_modified(scene.selection());

        assert!(!widget.process(&InputEvent::key_press(KeyCode::Escape), &mut scene));
        let event = InputEvent::KeyPress {
            key: KeyCode::Backspace,
            modifiers: Modifiers::CONTROL,
        };
        assert!(widget.process(&event, &mut scene));
        assert!(!scene.selection().has_focus());
    }

    #[test]
    fn translations_can_be_replaced() {
        let mut widget = FocusWidget::default();
        let escape = KeyBinding::key(KeyCode::Escape);
        assert_eq!(
            widget.remove_translation(WidgetState::Focused, escape),
            Some(WidgetEvent::CancelFocus)
        );
        assert_eq!(
            widget.set_translation(WidgetState::Idle, escape, WidgetEvent::CancelFocus),
            None
        );
        assert_eq!(
            widget.can_process(&InputEvent::key_press(KeyCode::Escape)),
            Some(LOW_PRIORITY_CLAIM_DISTANCE2)
        );
    }
}
