//! Focus pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::FocusError;
use crate::input::{KeyBinding, KeyCode};

/// Squared pick distance reported when claiming the cancel-focus key.
///
/// Large enough that any widget with a real claim wins the tie.
pub const LOW_PRIORITY_CLAIM_DISTANCE2: f64 = 1e10;

/// Configuration for a [`FocusManager`](crate::FocusManager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Length of each corner bracket arm, in pixels.
    pub bracket_length_px: f32,
    /// Line width of the bracket overlay, in pixels.
    pub line_width_px: f32,
    /// Render layer of the outline compositing renderer. Layer 0 is the scene.
    pub outline_layer: u32,
    /// Enable FXAA on the outline renderer.
    pub use_fxaa: bool,
    /// Key that clears focus while something is focused.
    pub cancel_binding: KeyBinding,
    /// Squared distance reported when the cancel key is claimable.
    pub claim_distance2: f64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            bracket_length_px: 10.0,
            line_width_px: 5.0,
            outline_layer: 1,
            use_fxaa: true,
            cancel_binding: KeyBinding::key(KeyCode::Escape),
            claim_distance2: LOW_PRIORITY_CLAIM_DISTANCE2,
        }
    }
}

impl FocusConfig {
    /// Parses a configuration from RON. Missing fields take their defaults.
    pub fn from_ron(source: &str) -> Result<Self, FocusError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), FocusError> {
        if self.bracket_length_px.is_nan() || self.bracket_length_px < 0.0 {
            return Err(FocusError::InvalidConfig(format!(
                "bracket length must be non-negative, got {}",
                self.bracket_length_px
            )));
        }
        if self.line_width_px.is_nan() || self.line_width_px <= 0.0 {
            return Err(FocusError::InvalidConfig(format!(
                "line width must be positive, got {}",
                self.line_width_px
            )));
        }
        if self.outline_layer == 0 {
            return Err(FocusError::InvalidConfig(
                "outline layer 0 is reserved for the base scene renderer".to_string(),
            ));
        }
        if self.claim_distance2.is_nan() || self.claim_distance2 < 0.0 {
            return Err(FocusError::InvalidConfig(format!(
                "claim distance must be non-negative, got {}",
                self.claim_distance2
            )));
        }
        Ok(())
    }

    pub fn with_bracket_length(mut self, px: f32) -> Self {
        self.bracket_length_px = px;
        self
    }

    pub fn with_line_width(mut self, px: f32) -> Self {
        self.line_width_px = px;
        self
    }

    pub fn with_outline_layer(mut self, layer: u32) -> Self {
        self.outline_layer = layer;
        self
    }

    pub fn with_cancel_binding(mut self, binding: KeyBinding) -> Self {
        self.cancel_binding = binding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    #[test]
    fn default_config_is_valid() {
        let config = FocusConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bracket_length_px, 10.0);
        assert_eq!(config.line_width_px, 5.0);
        assert_eq!(config.outline_layer, 1);
    }

    #[test]
    fn rejects_base_layer() {
        let config = FocusConfig::default().with_outline_layer(0);
        assert!(matches!(
            config.validate(),
            Err(FocusError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_non_positive_line_width() {
        let config = FocusConfig::default().with_line_width(0.0);
        assert!(config.validate().is_err());
        let config = FocusConfig::default().with_line_width(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_ron() {
        let config = FocusConfig::from_ron("(bracket_length_px: 16.0, outline_layer: 2)").unwrap();
        assert_eq!(config.bracket_length_px, 16.0);
        assert_eq!(config.outline_layer, 2);
        assert_eq!(config.line_width_px, 5.0);
        assert_eq!(config.cancel_binding, KeyBinding::key(KeyCode::Escape));
    }

    #[test]
    fn parses_cancel_binding() {
        let config = FocusConfig::from_ron(
            "(cancel_binding: (key: Backspace, modifiers: \"SHIFT\"))",
        )
        .unwrap();
        assert_eq!(
            config.cancel_binding,
            KeyBinding::with_modifiers(KeyCode::Backspace, Modifiers::SHIFT)
        );
    }

    #[test]
    fn any_key_can_cancel() {
        let config = FocusConfig::from_ron(
            "(cancel_binding: (key: Q, modifiers: \"CONTROL | SHIFT\"))",
        )
        .unwrap();
        assert_eq!(
            config.cancel_binding,
            KeyBinding::with_modifiers(KeyCode::Q, Modifiers::CONTROL | Modifiers::SHIFT)
        );
        let config = FocusConfig::from_ron("(cancel_binding: (key: F10))").unwrap();
        assert_eq!(config.cancel_binding, KeyBinding::key(KeyCode::F10));
    }

    #[test]
    fn ron_values_are_validated() {
        let result = FocusConfig::from_ron("(line_width_px: -1.0)");
        assert!(matches!(result, Err(FocusError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let result = FocusConfig::from_ron("(bracket_length_px: )");
        assert!(matches!(result, Err(FocusError::Parse(_))));
    }
}
