//! Embedded WGSL shaders
//!
//! One uber shader covers every material kind; the fragment stage switches
//! on the kind code carried in the object uniforms. Matcap sampling happens
//! unconditionally before the switch to keep control flow uniform.

/// Scene shader: camera + lights in group 0, per-object uniforms with a
/// dynamic offset in group 1, matcap capture in group 2.
pub const SCENE_SHADER: &str = r#"
struct CameraUniforms {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    view_proj: mat4x4<f32>,
    position: vec4<f32>,
    near_far: vec4<f32>,
}

struct SceneUniforms {
    // rgb = summed ambient (premultiplied by intensity), w = light count
    ambient_count: vec4<f32>,
}

struct GpuLight {
    position: vec4<f32>,       // xyz = position, w = range
    color_intensity: vec4<f32>,
    direction_type: vec4<f32>, // w: 0 = point, 1 = spot, 2 = directional
    spot_params: vec4<f32>,    // x = cos(inner), y = cos(outer)
}

struct ObjectUniforms {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    base_color: vec4<f32>,  // rgb = albedo, w = opacity
    emissive: vec4<f32>,    // rgb = emissive, w = intensity
    specular: vec4<f32>,    // rgb = specular color, w = shininess
    params: vec4<f32>,      // roughness, metalness, clearcoat, clearcoat roughness
    params2: vec4<f32>,     // transmission, ior, thickness, toon gradient size
    kind_flags: vec4<f32>,  // x = material kind
}

@group(0) @binding(0) var<uniform> camera: CameraUniforms;
@group(0) @binding(1) var<uniform> scene: SceneUniforms;
@group(0) @binding(2) var<uniform> lights: array<GpuLight, 16>;
@group(1) @binding(0) var<uniform> object: ObjectUniforms;
@group(2) @binding(0) var matcap_tex: texture_2d<f32>;
@group(2) @binding(1) var matcap_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) view_normal: vec3<f32>,
    @location(3) uv: vec2<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = object.model * vec4<f32>(in.position, 1.0);
    out.world_position = world.xyz;
    out.clip_position = camera.view_proj * world;
    out.world_normal = normalize((object.normal_matrix * vec4<f32>(in.normal, 0.0)).xyz);
    out.view_normal = normalize((camera.view * vec4<f32>(out.world_normal, 0.0)).xyz);
    out.uv = in.uv;
    return out;
}

struct LightSample {
    direction: vec3<f32>, // surface toward light
    radiance: vec3<f32>,
}

fn sample_light(light: GpuLight, world_position: vec3<f32>) -> LightSample {
    var out: LightSample;
    let kind = light.direction_type.w;
    if (kind > 1.5) {
        // directional
        out.direction = -light.direction_type.xyz;
        out.radiance = light.color_intensity.rgb * light.color_intensity.w;
        return out;
    }

    let to_light = light.position.xyz - world_position;
    let distance = length(to_light);
    out.direction = to_light / max(distance, 1e-4);
    var attenuation = 1.0 / (1.0 + 0.045 * distance + 0.0075 * distance * distance);

    if (kind > 0.5) {
        // spot cone falloff
        let cos_angle = dot(-out.direction, normalize(light.direction_type.xyz));
        attenuation *= smoothstep(light.spot_params.y, light.spot_params.x, cos_angle);
    }

    out.radiance = light.color_intensity.rgb * light.color_intensity.w * attenuation;
    return out;
}

fn shade_lit(
    normal: vec3<f32>,
    view_dir: vec3<f32>,
    world_position: vec3<f32>,
    albedo: vec3<f32>,
    specular_color: vec3<f32>,
    shininess: f32,
    specular_strength: f32,
    toon_bands: f32,
) -> vec3<f32> {
    var color = scene.ambient_count.rgb * albedo;
    let count = u32(scene.ambient_count.w);

    for (var i = 0u; i < 16u; i = i + 1u) {
        if (i >= count) {
            break;
        }
        let sample = sample_light(lights[i], world_position);
        var diffuse = max(dot(normal, sample.direction), 0.0);
        if (toon_bands > 0.5) {
            diffuse = floor(diffuse * toon_bands) / toon_bands;
        }
        color += albedo * sample.radiance * diffuse;

        if (specular_strength > 0.0 && diffuse > 0.0) {
            let half_dir = normalize(sample.direction + view_dir);
            let spec = pow(max(dot(normal, half_dir), 0.0), shininess);
            color += specular_color * sample.radiance * spec * specular_strength;
        }
    }
    return color;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(in.world_normal);
    let view_dir = normalize(camera.position.xyz - in.world_position);
    let albedo = object.base_color.rgb;
    var opacity = object.base_color.w;

    // Sampled up front so control flow stays uniform
    let matcap_uv = normalize(in.view_normal).xy * vec2<f32>(0.5, -0.5) + vec2<f32>(0.5, 0.5);
    let matcap_sample = textureSample(matcap_tex, matcap_sampler, matcap_uv);

    let kind = i32(object.kind_flags.x);
    var color = vec3<f32>(0.0);

    switch kind {
        case 0: {
            // basic: unlit
            color = albedo;
        }
        case 1: {
            // lambert
            color = shade_lit(normal, view_dir, in.world_position, albedo,
                vec3<f32>(0.0), 1.0, 0.0, 0.0);
            color += object.emissive.rgb * object.emissive.w;
        }
        case 2: {
            // phong
            color = shade_lit(normal, view_dir, in.world_position, albedo,
                object.specular.rgb, max(object.specular.w, 1.0), 1.0, 0.0);
            color += object.emissive.rgb * object.emissive.w;
        }
        case 3, 4: {
            // standard / physical: metallic-roughness mapped onto blinn-phong
            let roughness = clamp(object.params.x, 0.04, 1.0);
            let metalness = clamp(object.params.y, 0.0, 1.0);
            let shininess = mix(256.0, 4.0, roughness);
            let f0 = mix(vec3<f32>(0.04), albedo, metalness);
            let diffuse_albedo = albedo * (1.0 - metalness);
            color = shade_lit(normal, view_dir, in.world_position, diffuse_albedo,
                f0, shininess, 1.0 - roughness * 0.7, 0.0);
            color += object.emissive.rgb * object.emissive.w;

            if (kind == 4) {
                // clearcoat: second tight specular lobe
                let clearcoat = object.params.z;
                if (clearcoat > 0.0) {
                    let cc_roughness = clamp(object.params.w, 0.04, 1.0);
                    let cc = shade_lit(normal, view_dir, in.world_position,
                        vec3<f32>(0.0), vec3<f32>(1.0),
                        mix(512.0, 8.0, cc_roughness), clearcoat, 0.0);
                    color += cc;
                }
                // transmission: fresnel-weighted transparency
                let transmission = object.params2.x;
                if (transmission > 0.0) {
                    let fresnel = pow(1.0 - max(dot(normal, view_dir), 0.0), 3.0);
                    opacity *= 1.0 - transmission * (1.0 - fresnel) * 0.9;
                }
            }
        }
        case 5: {
            // toon
            let bands = max(object.params2.w, 1.0);
            color = shade_lit(normal, view_dir, in.world_position, albedo,
                vec3<f32>(0.0), 1.0, 0.0, bands);
        }
        case 6: {
            // view-space normal visualisation
            color = normalize(in.view_normal) * 0.5 + vec3<f32>(0.5);
        }
        case 7: {
            // linear depth between clip planes, white near
            let near = camera.near_far.x;
            let far = camera.near_far.y;
            let distance = length(camera.position.xyz - in.world_position);
            let t = clamp((far - distance) / (far - near), 0.0, 1.0);
            color = vec3<f32>(t);
        }
        case 8: {
            // matcap capture modulated by the material color
            color = matcap_sample.rgb * albedo;
        }
        default: {
            color = vec3<f32>(1.0, 0.0, 1.0);
        }
    }

    return vec4<f32>(color, opacity);
}
"#;

/// Line shader for grids, axes and light gizmos
pub const LINE_SHADER: &str = r#"
struct CameraUniforms {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    view_proj: mat4x4<f32>,
    position: vec4<f32>,
    near_far: vec4<f32>,
}

@group(0) @binding(0) var<uniform> camera: CameraUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MAX_LIGHTS;

    // The WGSL light array and its loop bound are literals; this pins them
    // to the host-side constant so a size change cannot desynchronize them
    #[test]
    fn light_array_literals_match_host_constant() {
        assert!(SCENE_SHADER.contains(&format!("array<GpuLight, {MAX_LIGHTS}>")));
        assert!(SCENE_SHADER.contains(&format!("i < {MAX_LIGHTS}u")));
    }
}
