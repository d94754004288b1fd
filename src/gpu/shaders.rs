// ============================================================================
// WGSL SHADERS — GPU counterparts of the CPU filters
// ============================================================================

/// Shift-invert compute shader. Same arithmetic as
/// `ColorInversionFilter::apply_rgba`; alpha is written back untouched.
pub const SHIFT_INVERT_SHADER: &str = r#"
struct InvertParams {
    width:      u32,
    height:     u32,
    white_bias: f32,
    _pad0:      u32,
};

@group(0) @binding(0) var input_tex:  texture_2d<f32>;
@group(0) @binding(1) var output_tex: texture_storage_2d<rgba8unorm, write>;
@group(0) @binding(2) var<uniform> params: InvertParams;

@compute @workgroup_size(16, 16)
fn cs_shift_invert(@builtin(global_invocation_id) gid: vec3<u32>) {
    if (gid.x >= params.width || gid.y >= params.height) { return; }

    let c = textureLoad(input_tex, vec2<u32>(gid.x, gid.y), 0);

    let m = 1.0 + params.white_bias;
    let lo = min(c.r, min(c.g, c.b));
    let hi = max(c.r, max(c.g, c.b));
    let shift = params.white_bias + c.a - lo - hi;

    textureStore(output_tex, vec2<u32>(gid.x, gid.y),
        vec4<f32>((shift + c.r) / m, (shift + c.g) / m, (shift + c.b) / m, c.a));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_declares_entry_point_and_bindings() {
        assert!(SHIFT_INVERT_SHADER.contains("fn cs_shift_invert"));
        assert!(SHIFT_INVERT_SHADER.contains("@binding(0)"));
        assert!(SHIFT_INVERT_SHADER.contains("@binding(1)"));
        assert!(SHIFT_INVERT_SHADER.contains("@binding(2)"));
        assert!(SHIFT_INVERT_SHADER.contains("@workgroup_size(16, 16)"));
    }
}
