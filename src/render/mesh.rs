//! Mesh data structures and generation
//!
//! All generators emit counter-clockwise triangles in a right-handed space
//! with +Y up. Flat shapes (plane, ring) lie in the XY plane facing +Z and
//! are drawn double-sided by the renderer.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::scene::{GeometryDesc, PolyhedronKind};

/// Vertex format shared by every mesh pipeline
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A mesh with vertex and index data
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub name: String,
}

impl Mesh {
    pub fn new(name: &str) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            name: name.to_string(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get vertex data as bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Get index data as bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Tessellate a geometry description
    pub fn from_desc(desc: &GeometryDesc) -> Self {
        match *desc {
            GeometryDesc::Box {
                width,
                height,
                depth,
                width_segments,
                height_segments,
                depth_segments,
            } => Self::cuboid(
                width,
                height,
                depth,
                width_segments.max(1),
                height_segments.max(1),
                depth_segments.max(1),
            ),
            GeometryDesc::Sphere {
                radius,
                width_segments,
                height_segments,
            } => Self::sphere(radius, width_segments.max(3), height_segments.max(2)),
            GeometryDesc::Plane {
                width,
                height,
                width_segments,
                height_segments,
            } => Self::plane(width, height, width_segments.max(1), height_segments.max(1)),
            GeometryDesc::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => Self::cylinder(radius_top, radius_bottom, height, radial_segments.max(3)),
            GeometryDesc::Cone {
                radius,
                height,
                radial_segments,
            } => Self::cylinder(0.0, radius, height, radial_segments.max(3)),
            GeometryDesc::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => Self::torus(radius, tube, radial_segments.max(3), tubular_segments.max(3)),
            GeometryDesc::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => Self::torus_knot(
                radius,
                tube,
                tubular_segments.max(3),
                radial_segments.max(3),
                p.max(1),
                q.max(1),
            ),
            GeometryDesc::Polyhedron {
                kind,
                radius,
                detail,
            } => Self::polyhedron(kind, radius, detail.min(4)),
            GeometryDesc::Ring {
                inner_radius,
                outer_radius,
                theta_segments,
            } => Self::ring(inner_radius, outer_radius, theta_segments.max(3)),
        }
    }

    /// Axis-aligned box centered at the origin, with subdivided faces
    pub fn cuboid(
        width: f32,
        height: f32,
        depth: f32,
        width_segments: u32,
        height_segments: u32,
        depth_segments: u32,
    ) -> Self {
        let mut mesh = Mesh::new("box");

        // One subdivided grid per face. u_dir/v_dir span the face, w_dir is
        // the outward normal scaled to half depth.
        let faces: [(Vec3, Vec3, Vec3, u32, u32); 6] = [
            // +Z
            (Vec3::X * width, Vec3::Y * height, Vec3::Z * depth, width_segments, height_segments),
            // -Z
            (-Vec3::X * width, Vec3::Y * height, -Vec3::Z * depth, width_segments, height_segments),
            // +X
            (-Vec3::Z * depth, Vec3::Y * height, Vec3::X * width, depth_segments, height_segments),
            // -X
            (Vec3::Z * depth, Vec3::Y * height, -Vec3::X * width, depth_segments, height_segments),
            // +Y
            (Vec3::X * width, -Vec3::Z * depth, Vec3::Y * height, width_segments, depth_segments),
            // -Y
            (Vec3::X * width, Vec3::Z * depth, -Vec3::Y * height, width_segments, depth_segments),
        ];

        for (u_dir, v_dir, w_dir, grid_u, grid_v) in faces {
            let normal = w_dir.normalize();
            let origin = (w_dir - u_dir - v_dir) * 0.5;
            let base = mesh.vertices.len() as u32;

            for v in 0..=grid_v {
                for u in 0..=grid_u {
                    let fu = u as f32 / grid_u as f32;
                    let fv = v as f32 / grid_v as f32;
                    mesh.vertices.push(Vertex {
                        position: origin + u_dir * fu + v_dir * fv,
                        normal,
                        uv: Vec2::new(fu, 1.0 - fv),
                    });
                }
            }

            for v in 0..grid_v {
                for u in 0..grid_u {
                    let current = base + v * (grid_u + 1) + u;
                    let next = current + grid_u + 1;
                    mesh.indices.extend_from_slice(&[
                        current,
                        current + 1,
                        next + 1,
                        current,
                        next + 1,
                        next,
                    ]);
                }
            }
        }

        mesh
    }

    /// UV sphere
    pub fn sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let mut mesh = Mesh::new("sphere");

        let segment_angle = 2.0 * std::f32::consts::PI / segments as f32;
        let ring_angle = std::f32::consts::PI / rings as f32;

        for ring in 0..=rings {
            let phi = ring as f32 * ring_angle;
            let y = phi.cos();
            let ring_radius = phi.sin();

            for segment in 0..=segments {
                let theta = segment as f32 * segment_angle;
                let x = ring_radius * theta.cos();
                let z = ring_radius * theta.sin();

                let normal = Vec3::new(x, y, z).normalize_or_zero();
                mesh.vertices.push(Vertex {
                    position: Vec3::new(x, y, z) * radius,
                    normal: if normal == Vec3::ZERO { Vec3::Y } else { normal },
                    uv: Vec2::new(
                        segment as f32 / segments as f32,
                        ring as f32 / rings as f32,
                    ),
                });
            }
        }

        for ring in 0..rings {
            for segment in 0..segments {
                let current = ring * (segments + 1) + segment;
                let next = current + segments + 1;
                mesh.indices.extend_from_slice(&[
                    current,
                    next,
                    current + 1,
                    current + 1,
                    next,
                    next + 1,
                ]);
            }
        }

        mesh
    }

    /// Subdivided rectangle in the XY plane facing +Z
    pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let mut mesh = Mesh::new("plane");

        for y in 0..=height_segments {
            for x in 0..=width_segments {
                let fx = x as f32 / width_segments as f32;
                let fy = y as f32 / height_segments as f32;
                mesh.vertices.push(Vertex {
                    position: Vec3::new((fx - 0.5) * width, (fy - 0.5) * height, 0.0),
                    normal: Vec3::Z,
                    uv: Vec2::new(fx, 1.0 - fy),
                });
            }
        }

        for y in 0..height_segments {
            for x in 0..width_segments {
                let current = y * (width_segments + 1) + x;
                let next = current + width_segments + 1;
                mesh.indices.extend_from_slice(&[
                    current,
                    current + 1,
                    next + 1,
                    current,
                    next + 1,
                    next,
                ]);
            }
        }

        mesh
    }

    /// Cylinder with independent top and bottom radii. A zero radius makes
    /// the corresponding end a point, which yields a cone.
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Self {
        let mut mesh = Mesh::new("cylinder");

        let half_height = height / 2.0;
        let angle_step = 2.0 * std::f32::consts::PI / segments as f32;
        // Side normals tilt when the radii differ
        let slope = (radius_bottom - radius_top) / height;

        // Side vertices
        for i in 0..=segments {
            let angle = i as f32 * angle_step;
            let (sin, cos) = angle.sin_cos();
            let normal = Vec3::new(cos, slope, sin).normalize();
            let u = i as f32 / segments as f32;

            mesh.vertices.push(Vertex {
                position: Vec3::new(cos * radius_bottom, -half_height, sin * radius_bottom),
                normal,
                uv: Vec2::new(u, 1.0),
            });
            mesh.vertices.push(Vertex {
                position: Vec3::new(cos * radius_top, half_height, sin * radius_top),
                normal,
                uv: Vec2::new(u, 0.0),
            });
        }

        // Side indices
        for i in 0..segments {
            let base = i * 2;
            mesh.indices.extend_from_slice(&[
                base,
                base + 2,
                base + 1,
                base + 1,
                base + 2,
                base + 3,
            ]);
        }

        if radius_top > 0.0 {
            mesh.add_cap(radius_top, half_height, segments, angle_step, true);
        }
        if radius_bottom > 0.0 {
            mesh.add_cap(radius_bottom, -half_height, segments, angle_step, false);
        }

        mesh
    }

    fn add_cap(&mut self, radius: f32, y: f32, segments: u32, angle_step: f32, top: bool) {
        let normal = if top { Vec3::Y } else { -Vec3::Y };

        let center = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: Vec3::new(0.0, y, 0.0),
            normal,
            uv: Vec2::new(0.5, 0.5),
        });

        for i in 0..=segments {
            let angle = i as f32 * angle_step;
            let (sin, cos) = angle.sin_cos();
            let idx = self.vertices.len() as u32;
            self.vertices.push(Vertex {
                position: Vec3::new(cos * radius, y, sin * radius),
                normal,
                uv: Vec2::new(0.5 + cos * 0.5, 0.5 + sin * 0.5),
            });
            if i > 0 {
                if top {
                    self.indices.extend_from_slice(&[center, idx - 1, idx]);
                } else {
                    self.indices.extend_from_slice(&[center, idx, idx - 1]);
                }
            }
        }
    }

    /// Torus around the Y axis
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let mut mesh = Mesh::new("torus");

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * 2.0 * std::f32::consts::PI;
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * 2.0 * std::f32::consts::PI;

                let center = Vec3::new(radius * u.cos(), 0.0, radius * u.sin());
                let position = Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    tube * v.sin(),
                    (radius + tube * v.cos()) * u.sin(),
                );

                mesh.vertices.push(Vertex {
                    position,
                    normal: (position - center).normalize(),
                    uv: Vec2::new(
                        i as f32 / tubular_segments as f32,
                        j as f32 / radial_segments as f32,
                    ),
                });
            }
        }

        for j in 0..radial_segments {
            for i in 0..tubular_segments {
                let current = j * (tubular_segments + 1) + i;
                let next = current + tubular_segments + 1;
                mesh.indices.extend_from_slice(&[
                    current,
                    next,
                    current + 1,
                    current + 1,
                    next,
                    next + 1,
                ]);
            }
        }

        mesh
    }

    /// Tube following a (p, q) torus knot curve
    pub fn torus_knot(
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    ) -> Self {
        let mut mesh = Mesh::new("torus_knot");

        let curve_point = |t: f32| -> Vec3 {
            let qp = q as f32 / p as f32 * t;
            let r = radius * (2.0 + qp.cos()) * 0.5;
            Vec3::new(r * t.cos(), r * t.sin(), radius * qp.sin() * 0.5)
        };

        for i in 0..=tubular_segments {
            let t = i as f32 / tubular_segments as f32 * p as f32 * 2.0 * std::f32::consts::PI;

            // Approximate Frenet frame from neighbouring curve samples
            let p1 = curve_point(t);
            let p2 = curve_point(t + 0.01);
            let tangent = (p2 - p1).normalize();
            let bitangent = tangent.cross((p2 + p1).normalize()).normalize();
            let normal = bitangent.cross(tangent);

            for j in 0..=radial_segments {
                let v = j as f32 / radial_segments as f32 * 2.0 * std::f32::consts::PI;
                let offset = normal * (-tube * v.cos()) + bitangent * (tube * v.sin());

                mesh.vertices.push(Vertex {
                    position: p1 + offset,
                    normal: offset.normalize(),
                    uv: Vec2::new(
                        i as f32 / tubular_segments as f32,
                        j as f32 / radial_segments as f32,
                    ),
                });
            }
        }

        for i in 0..tubular_segments {
            for j in 0..radial_segments {
                let current = i * (radial_segments + 1) + j;
                let next = current + radial_segments + 1;
                mesh.indices.extend_from_slice(&[
                    current,
                    next,
                    current + 1,
                    current + 1,
                    next,
                    next + 1,
                ]);
            }
        }

        mesh
    }

    /// Platonic solid subdivided `detail` times and projected onto a sphere.
    /// Flat-shaded: faces keep their own normals instead of smoothing.
    pub fn polyhedron(kind: PolyhedronKind, radius: f32, detail: u32) -> Self {
        let mut mesh = Mesh::new(kind.label());

        let (base_vertices, base_indices) = polyhedron_base(kind);

        let mut triangles: Vec<[Vec3; 3]> = base_indices
            .chunks(3)
            .map(|tri| {
                [
                    base_vertices[tri[0]],
                    base_vertices[tri[1]],
                    base_vertices[tri[2]],
                ]
            })
            .collect();

        // Midpoint subdivision, 4 triangles per step
        for _ in 0..detail {
            let mut next = Vec::with_capacity(triangles.len() * 4);
            for [a, b, c] in triangles {
                let ab = (a + b) * 0.5;
                let bc = (b + c) * 0.5;
                let ca = (c + a) * 0.5;
                next.push([a, ab, ca]);
                next.push([ab, b, bc]);
                next.push([ca, bc, c]);
                next.push([ab, bc, ca]);
            }
            triangles = next;
        }

        for [a, b, c] in triangles {
            let a = a.normalize() * radius;
            let b = b.normalize() * radius;
            let c = c.normalize() * radius;
            let normal = (b - a).cross(c - a).normalize();

            let base = mesh.vertices.len() as u32;
            for position in [a, b, c] {
                mesh.vertices.push(Vertex {
                    position,
                    normal,
                    uv: spherical_uv(position, radius),
                });
            }
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        mesh
    }

    /// Flat annulus in the XY plane facing +Z
    pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> Self {
        let mut mesh = Mesh::new("ring");

        let angle_step = 2.0 * std::f32::consts::PI / theta_segments as f32;

        for i in 0..=theta_segments {
            let angle = i as f32 * angle_step;
            let (sin, cos) = angle.sin_cos();

            for radius in [inner_radius, outer_radius] {
                mesh.vertices.push(Vertex {
                    position: Vec3::new(cos * radius, sin * radius, 0.0),
                    normal: Vec3::Z,
                    uv: Vec2::new(
                        (cos * radius / outer_radius + 1.0) * 0.5,
                        (sin * radius / outer_radius + 1.0) * 0.5,
                    ),
                });
            }
        }

        for i in 0..theta_segments {
            let base = i * 2;
            mesh.indices.extend_from_slice(&[
                base,
                base + 1,
                base + 3,
                base,
                base + 3,
                base + 2,
            ]);
        }

        mesh
    }
}

fn spherical_uv(position: Vec3, radius: f32) -> Vec2 {
    Vec2::new(
        position.z.atan2(position.x) / (2.0 * std::f32::consts::PI) + 0.5,
        (position.y / radius).clamp(-1.0, 1.0) * 0.5 + 0.5,
    )
}

/// Base vertices and triangle indices of the platonic solids
fn polyhedron_base(kind: PolyhedronKind) -> (Vec<Vec3>, Vec<usize>) {
    match kind {
        PolyhedronKind::Tetrahedron => (
            vec![
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
            ],
            vec![2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1],
        ),
        PolyhedronKind::Octahedron => (
            vec![
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, -1.0),
            ],
            vec![
                0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, 1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
            ],
        ),
        PolyhedronKind::Icosahedron => {
            let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
            (
                vec![
                    Vec3::new(-1.0, t, 0.0),
                    Vec3::new(1.0, t, 0.0),
                    Vec3::new(-1.0, -t, 0.0),
                    Vec3::new(1.0, -t, 0.0),
                    Vec3::new(0.0, -1.0, t),
                    Vec3::new(0.0, 1.0, t),
                    Vec3::new(0.0, -1.0, -t),
                    Vec3::new(0.0, 1.0, -t),
                    Vec3::new(t, 0.0, -1.0),
                    Vec3::new(t, 0.0, 1.0),
                    Vec3::new(-t, 0.0, -1.0),
                    Vec3::new(-t, 0.0, 1.0),
                ],
                vec![
                    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2,
                    10, 7, 6, 7, 1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4,
                    11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
                ],
            )
        }
        PolyhedronKind::Dodecahedron => {
            let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
            let r = 1.0 / t;
            (
                vec![
                    Vec3::new(-1.0, -1.0, -1.0),
                    Vec3::new(-1.0, -1.0, 1.0),
                    Vec3::new(-1.0, 1.0, -1.0),
                    Vec3::new(-1.0, 1.0, 1.0),
                    Vec3::new(1.0, -1.0, -1.0),
                    Vec3::new(1.0, -1.0, 1.0),
                    Vec3::new(1.0, 1.0, -1.0),
                    Vec3::new(1.0, 1.0, 1.0),
                    Vec3::new(0.0, -r, -t),
                    Vec3::new(0.0, -r, t),
                    Vec3::new(0.0, r, -t),
                    Vec3::new(0.0, r, t),
                    Vec3::new(-r, -t, 0.0),
                    Vec3::new(-r, t, 0.0),
                    Vec3::new(r, -t, 0.0),
                    Vec3::new(r, t, 0.0),
                    Vec3::new(-t, 0.0, -r),
                    Vec3::new(t, 0.0, -r),
                    Vec3::new(-t, 0.0, r),
                    Vec3::new(t, 0.0, r),
                ],
                vec![
                    3, 11, 7, 3, 7, 15, 3, 15, 13, 7, 19, 17, 7, 17, 6, 7, 6, 15, 17, 4, 8, 17, 8,
                    10, 17, 10, 6, 8, 0, 16, 8, 16, 2, 8, 2, 10, 0, 12, 1, 0, 1, 18, 0, 18, 16, 6,
                    10, 2, 6, 2, 13, 6, 13, 15, 2, 16, 18, 2, 18, 3, 2, 3, 13, 18, 1, 9, 18, 9,
                    11, 18, 11, 3, 4, 14, 12, 4, 12, 0, 4, 0, 8, 11, 9, 5, 11, 5, 19, 11, 19, 7,
                    19, 5, 14, 19, 14, 4, 19, 4, 17, 1, 12, 14, 1, 14, 5, 1, 5, 9,
                ],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_bounds(mesh: &Mesh) {
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count), "{}", mesh.name);
        assert_eq!(mesh.index_count() % 3, 0, "{}", mesh.name);
    }

    #[test]
    fn box_segments_grow_the_grid() {
        let coarse = Mesh::cuboid(2.0, 2.0, 2.0, 1, 1, 1);
        let fine = Mesh::cuboid(2.0, 2.0, 2.0, 4, 4, 4);
        assert_eq!(coarse.triangle_count(), 12);
        assert!(fine.triangle_count() > coarse.triangle_count());
        assert_indices_in_bounds(&fine);
    }

    #[test]
    fn sphere_stays_on_radius() {
        let mesh = Mesh::sphere(1.2, 32, 32);
        for vertex in &mesh.vertices {
            assert!((vertex.position.length() - 1.2).abs() < 1e-4);
        }
        assert_indices_in_bounds(&mesh);
    }

    #[test]
    fn cone_has_single_cap() {
        let cone = Mesh::from_desc(&GeometryDesc::Cone {
            radius: 1.0,
            height: 2.0,
            radial_segments: 16,
        });
        let cylinder = Mesh::cylinder(1.0, 1.0, 2.0, 16);
        // Cone skips the top cap fan
        assert!(cone.triangle_count() < cylinder.triangle_count());
        assert_indices_in_bounds(&cone);
    }

    #[test]
    fn polyhedron_detail_subdivides() {
        for kind in PolyhedronKind::ALL {
            let base = Mesh::polyhedron(kind, 1.0, 0);
            let refined = Mesh::polyhedron(kind, 1.0, 2);
            assert_eq!(refined.triangle_count(), base.triangle_count() * 16);
            for vertex in &refined.vertices {
                assert!((vertex.position.length() - 1.0).abs() < 1e-4, "{:?}", kind);
            }
        }
    }

    #[test]
    fn tetrahedron_has_four_faces() {
        assert_eq!(Mesh::polyhedron(PolyhedronKind::Tetrahedron, 1.0, 0).triangle_count(), 4);
        assert_eq!(Mesh::polyhedron(PolyhedronKind::Icosahedron, 1.0, 0).triangle_count(), 20);
        assert_eq!(Mesh::polyhedron(PolyhedronKind::Dodecahedron, 1.0, 0).triangle_count(), 36);
    }

    #[test]
    fn ring_is_flat_and_bounded() {
        let mesh = Mesh::ring(0.5, 1.0, 32);
        for vertex in &mesh.vertices {
            assert_eq!(vertex.position.z, 0.0);
            let r = vertex.position.truncate().length();
            assert!(r >= 0.5 - 1e-4 && r <= 1.0 + 1e-4);
        }
        assert_indices_in_bounds(&mesh);
    }

    #[test]
    fn torus_knot_is_well_formed() {
        let mesh = Mesh::torus_knot(1.0, 0.3, 64, 8, 2, 3);
        assert_indices_in_bounds(&mesh);
        assert_eq!(mesh.vertex_count(), 65 * 9);
    }
}
