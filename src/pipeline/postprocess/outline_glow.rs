//! Outline glow post-processing effect

/// Glow pass drawing an outline around everything on the outline layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineGlowPass {
    pub intensity: f32,
    layer: u32,
}

impl OutlineGlowPass {
    pub fn new(layer: u32) -> Self {
        Self {
            intensity: 1.0,
            layer,
        }
    }

    pub fn name(&self) -> &str {
        "OutlineGlow"
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
    }

    /// Uniform block matching `OutlineParams` in [`OUTLINE_GLOW_SHADER`].
    pub fn uniforms(&self) -> OutlineGlowUniforms {
        OutlineGlowUniforms {
            intensity: self.intensity,
            layer: self.layer,
            _padding: [0; 2],
        }
    }
}

/// GPU uniform data for the outline glow pass
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OutlineGlowUniforms {
    pub intensity: f32,
    pub layer: u32,
    pub _padding: [u32; 2],
}

pub const OUTLINE_GLOW_SHADER: &str = r#"
struct OutlineParams {
    intensity: f32,
    layer: u32,
}

@group(0) @binding(0) var silhouette_texture: texture_2d<f32>;
@group(0) @binding(1) var silhouette_sampler: sampler;
@group(0) @binding(2) var<uniform> params: OutlineParams;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var output: VertexOutput;
    let x = f32((vertex_index << 1u) & 2u);
    let y = f32(vertex_index & 2u);
    output.position = vec4<f32>(x * 2.0 - 1.0, y * 2.0 - 1.0, 0.0, 1.0);
    output.uv = vec2<f32>(x, 1.0 - y);
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let texel = 1.0 / vec2<f32>(textureDimensions(silhouette_texture));
    let center = textureSample(silhouette_texture, silhouette_sampler, input.uv).a;

    var spread = 0.0;
    for (var dy = -2; dy <= 2; dy++) {
        for (var dx = -2; dx <= 2; dx++) {
            let offset = vec2<f32>(f32(dx), f32(dy)) * texel;
            spread = max(spread, textureSample(silhouette_texture, silhouette_sampler, input.uv + offset).a);
        }
    }

    // Glow only outside the silhouette itself
    let glow = max(spread - center, 0.0) * params.intensity;
    return vec4<f32>(vec3<f32>(1.0), clamp(glow, 0.0, 1.0));
}
"#;
