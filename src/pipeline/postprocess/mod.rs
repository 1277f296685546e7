//! Post-processing effects

mod outline_glow;

pub use outline_glow::{OutlineGlowPass, OutlineGlowUniforms, OUTLINE_GLOW_SHADER};
