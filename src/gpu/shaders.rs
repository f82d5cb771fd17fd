//! WGSL source for the scene pipelines.
//!
//! One module, two vertex entry points sharing the instance layout:
//!
//! - `vs_billboard` draws camera-facing sprites sized by the length of the
//!   model matrix's first column (ornaments, snow, star);
//! - `vs_panel` draws unit quads transformed by the full model matrix
//!   (card face, frame, dimmer).
//!
//! `params.x` picks the sprite shape in `fs_main`, `params.y` scales the
//! color.

pub const SCENE_WGSL: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_right: vec4<f32>,
    camera_up: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct InstanceInput {
    @location(0) model_0: vec4<f32>,
    @location(1) model_1: vec4<f32>,
    @location(2) model_2: vec4<f32>,
    @location(3) model_3: vec4<f32>,
    @location(4) color: vec4<f32>,
    @location(5) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
    @location(2) params: vec4<f32>,
};

const SPRITE_ROUND: u32 = 0u;
const SPRITE_SQUARE: u32 = 1u;
const SPRITE_STAR: u32 = 2u;
const TAU: f32 = 6.283185307;

fn quad_corner(index: u32) -> vec2<f32> {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    return corners[index % 6u];
}

fn instance_model(c0: vec4<f32>, c1: vec4<f32>, c2: vec4<f32>, c3: vec4<f32>) -> mat4x4<f32> {
    return mat4x4<f32>(c0, c1, c2, c3);
}

@vertex
fn vs_billboard(
    @builtin(vertex_index) vertex_index: u32,
    instance: InstanceInput,
) -> VertexOutput {
    let model = instance_model(instance.model_0, instance.model_1, instance.model_2, instance.model_3);
    let center = (model * vec4<f32>(0.0, 0.0, 0.0, 1.0)).xyz;
    let size = length(model[0].xyz);
    let corner = quad_corner(vertex_index);
    let offset = uniforms.camera_right.xyz * corner.x + uniforms.camera_up.xyz * corner.y;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(center + offset * size, 1.0);
    out.uv = corner;
    out.color = instance.color;
    out.params = instance.params;
    return out;
}

@vertex
fn vs_panel(
    @builtin(vertex_index) vertex_index: u32,
    instance: InstanceInput,
) -> VertexOutput {
    let model = instance_model(instance.model_0, instance.model_1, instance.model_2, instance.model_3);
    let corner = quad_corner(vertex_index);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * model * vec4<f32>(corner * 0.5, 0.0, 1.0);
    out.uv = corner;
    out.color = instance.color;
    out.params = instance.params;
    return out;
}

fn star_radius(uv: vec2<f32>) -> f32 {
    let angle = atan2(uv.x, uv.y);
    let spoke = abs(fract(angle * 5.0 / TAU) - 0.5) * 2.0;
    return mix(1.0, 0.45, spoke);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let sprite = u32(in.params.x + 0.5);
    let r = length(in.uv);
    var shade = 1.0;

    if sprite == SPRITE_ROUND {
        if r > 1.0 {
            discard;
        }
        shade = 0.55 + 0.45 * sqrt(1.0 - r * r);
    } else if sprite == SPRITE_SQUARE {
        let edge = max(abs(in.uv.x), abs(in.uv.y));
        shade = 1.0 - 0.25 * edge;
    } else if sprite == SPRITE_STAR {
        if r > star_radius(in.uv) {
            discard;
        }
    }

    let rgb = in.color.rgb * shade * in.params.y;
    return vec4<f32>(rgb, in.color.a);
}
"#;
