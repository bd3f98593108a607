//! Line-list geometry for helpers
//!
//! Grids, axes and light gizmos are drawn as colored line lists with their
//! own pipeline. Builders append pairs of vertices (one segment each) to a
//! shared buffer for the frame.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::scene::Light;

/// Vertex of the line pipeline
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LineVertex {
    pub position: Vec3,
    pub color: Vec3,
}

impl LineVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

fn segment(out: &mut Vec<LineVertex>, from: Vec3, to: Vec3, color: Vec3) {
    out.push(LineVertex {
        position: from,
        color,
    });
    out.push(LineVertex {
        position: to,
        color,
    });
}

/// Square reference grid in the ground plane, with emphasized center lines
pub fn grid(out: &mut Vec<LineVertex>, size: f32, divisions: u32) {
    let half = size / 2.0;
    let step = size / divisions as f32;
    let minor = Vec3::splat(0.25);
    let major = Vec3::splat(0.45);

    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        let color = if (offset).abs() < step * 0.25 { major } else { minor };
        segment(out, Vec3::new(offset, 0.0, -half), Vec3::new(offset, 0.0, half), color);
        segment(out, Vec3::new(-half, 0.0, offset), Vec3::new(half, 0.0, offset), color);
    }
}

/// World axes: x red, y green, z blue
pub fn axes(out: &mut Vec<LineVertex>, length: f32) {
    segment(out, Vec3::ZERO, Vec3::X * length, Vec3::new(1.0, 0.2, 0.2));
    segment(out, Vec3::ZERO, Vec3::Y * length, Vec3::new(0.2, 1.0, 0.2));
    segment(out, Vec3::ZERO, Vec3::Z * length, Vec3::new(0.2, 0.4, 1.0));
}

/// Append the helper geometry for a light, if the light requests one
pub fn light_gizmo(out: &mut Vec<LineVertex>, light: &Light) {
    if !light.wants_gizmo() {
        return;
    }
    let color = light.color();
    match light {
        Light::Ambient(_) => {}
        Light::Directional(light) => {
            directional_gizmo(out, light.position, color);
        }
        Light::Point(light) => {
            point_gizmo(out, light.position, 0.3, color);
        }
        Light::Spot(light) => {
            spot_gizmo(out, light.position, light.angle, color);
        }
    }
}

/// Small square facing the target plus a ray toward the origin
fn directional_gizmo(out: &mut Vec<LineVertex>, position: Vec3, color: Vec3) {
    let forward = (-position).normalize_or_zero();
    let (right, up) = plane_basis(forward);
    let half = 0.5;

    let corners = [
        position + right * half + up * half,
        position - right * half + up * half,
        position - right * half - up * half,
        position + right * half - up * half,
    ];
    for i in 0..4 {
        segment(out, corners[i], corners[(i + 1) % 4], color);
    }
    segment(out, position, Vec3::ZERO, color);
}

/// Three axis-aligned circles around the light position
fn point_gizmo(out: &mut Vec<LineVertex>, position: Vec3, radius: f32, color: Vec3) {
    const STEPS: u32 = 24;
    for axis in 0..3 {
        for i in 0..STEPS {
            let a0 = i as f32 / STEPS as f32 * 2.0 * std::f32::consts::PI;
            let a1 = (i + 1) as f32 / STEPS as f32 * 2.0 * std::f32::consts::PI;
            let point = |a: f32| {
                let (sin, cos) = a.sin_cos();
                position
                    + match axis {
                        0 => Vec3::new(0.0, cos, sin),
                        1 => Vec3::new(cos, 0.0, sin),
                        _ => Vec3::new(cos, sin, 0.0),
                    } * radius
            };
            segment(out, point(a0), point(a1), color);
        }
    }
}

/// Cone outline from the light position toward the origin
fn spot_gizmo(out: &mut Vec<LineVertex>, position: Vec3, angle: f32, color: Vec3) {
    const STEPS: u32 = 24;
    let length = position.length().min(5.0).max(1.0);
    let forward = (-position).normalize_or_zero();
    let (right, up) = plane_basis(forward);
    let radius = length * angle.tan();
    let base_center = position + forward * length;

    let rim = |i: u32| {
        let a = i as f32 / STEPS as f32 * 2.0 * std::f32::consts::PI;
        base_center + (right * a.cos() + up * a.sin()) * radius
    };

    for i in 0..STEPS {
        segment(out, rim(i), rim(i + 1), color);
    }
    for i in 0..4 {
        segment(out, position, rim(i * STEPS / 4), color);
    }
}

/// Two unit vectors spanning the plane perpendicular to `forward`
fn plane_basis(forward: Vec3) -> (Vec3, Vec3) {
    let reference = if forward.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    let right = forward.cross(reference).normalize();
    let up = right.cross(forward);
    (right, up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{PointLight, SpotLight};

    #[test]
    fn grid_emits_paired_vertices() {
        let mut out = Vec::new();
        grid(&mut out, 20.0, 20);
        assert_eq!(out.len() % 2, 0);
        assert_eq!(out.len(), (21 * 2) * 2);
    }

    #[test]
    fn gizmo_respects_flag() {
        let mut out = Vec::new();
        light_gizmo(
            &mut out,
            &Light::Point(PointLight {
                gizmo: false,
                ..Default::default()
            }),
        );
        assert!(out.is_empty());

        light_gizmo(
            &mut out,
            &Light::Spot(SpotLight {
                gizmo: true,
                ..Default::default()
            }),
        );
        assert!(!out.is_empty());
        assert_eq!(out.len() % 2, 0);
    }
}
