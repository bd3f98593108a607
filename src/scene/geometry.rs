//! Geometry descriptions
//!
//! Each variant carries the full parameter set of its tessellator. The scene
//! tree stores these descriptions; the renderer turns them into vertex data
//! (and caches the result keyed on the description).

/// Which platonic solid a polyhedron description expands to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolyhedronKind {
    Dodecahedron,
    Icosahedron,
    Octahedron,
    Tetrahedron,
}

impl PolyhedronKind {
    pub const ALL: [PolyhedronKind; 4] = [
        PolyhedronKind::Dodecahedron,
        PolyhedronKind::Icosahedron,
        PolyhedronKind::Octahedron,
        PolyhedronKind::Tetrahedron,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PolyhedronKind::Dodecahedron => "dodecahedron",
            PolyhedronKind::Icosahedron => "icosahedron",
            PolyhedronKind::Octahedron => "octahedron",
            PolyhedronKind::Tetrahedron => "tetrahedron",
        }
    }
}

/// Parametric description of a mesh shape
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryDesc {
    Box {
        width: f32,
        height: f32,
        depth: f32,
        width_segments: u32,
        height_segments: u32,
        depth_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
    Polyhedron {
        kind: PolyhedronKind,
        radius: f32,
        detail: u32,
    },
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        theta_segments: u32,
    },
}

impl GeometryDesc {
    /// Unit cube
    pub fn cube(size: f32) -> Self {
        GeometryDesc::Box {
            width: size,
            height: size,
            depth: size,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }

    pub fn box_dims(width: f32, height: f32, depth: f32) -> Self {
        GeometryDesc::Box {
            width,
            height,
            depth,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        GeometryDesc::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }

    /// Double-sided surfaces are drawn without backface culling
    pub fn double_sided(&self) -> bool {
        matches!(self, GeometryDesc::Plane { .. } | GeometryDesc::Ring { .. })
    }

    /// Stable cache key: the debug form is unique per parameter set
    pub fn cache_key(&self) -> String {
        format!("{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_distinguishes_parameters() {
        let a = GeometryDesc::sphere(1.0, 32, 32);
        let b = GeometryDesc::sphere(1.0, 32, 16);
        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), GeometryDesc::sphere(1.0, 32, 32).cache_key());
    }

    #[test]
    fn flat_shapes_are_double_sided() {
        assert!(GeometryDesc::Plane {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1
        }
        .double_sided());
        assert!(!GeometryDesc::cube(1.0).double_sided());
    }
}
