//! Blit shader.
//!
//! Draws one fullscreen triangle and samples the window-sized slice of the
//! canvas texture that starts at the current scroll offset.

/// Scroll parameters shared with the blit shader.
///
/// Layout matches `BlitParams` in [`BLIT_SHADER`] (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlitParams {
    /// Top of the visible slice, in canvas pixels.
    pub scroll: f32,
    pub viewport_height: f32,
    pub canvas_height: f32,
    pub _pad: f32,
}

impl BlitParams {
    pub fn new(scroll: f32, viewport_height: f32, canvas_height: f32) -> Self {
        Self {
            scroll,
            viewport_height,
            canvas_height: canvas_height.max(1.0),
            _pad: 0.0,
        }
    }
}

pub const BLIT_SHADER: &str = r#"
struct BlitParams {
    scroll: f32,
    viewport_height: f32,
    canvas_height: f32,
    _pad: f32,
};

@group(0) @binding(0) var canvas: texture_2d<f32>;
@group(0) @binding(1) var canvas_sampler: sampler;
@group(0) @binding(2) var<uniform> params: BlitParams;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    // Oversized triangle covering the whole screen.
    let x = f32((index << 1u) & 2u);
    let y = f32(index & 2u);
    var out: VertexOutput;
    out.position = vec4<f32>(x * 2.0 - 1.0, 1.0 - y * 2.0, 0.0, 1.0);
    out.uv = vec2<f32>(x, y);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let canvas_y = (params.scroll + in.uv.y * params.viewport_height) / params.canvas_height;
    let color = textureSample(canvas, canvas_sampler, vec2<f32>(in.uv.x, canvas_y));
    return vec4<f32>(color.rgb, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_blit_shader_validates() {
        validate_wgsl(BLIT_SHADER).unwrap();
    }

    #[test]
    fn test_params_layout() {
        assert_eq!(std::mem::size_of::<BlitParams>(), 16);
        let params = BlitParams::new(10.0, 720.0, 0.0);
        assert_eq!(params.canvas_height, 1.0);
    }
}
