//! Material descriptions and GPU packing
//!
//! One uniform layout serves every material kind; the shader branches on the
//! kind code. Fields a kind does not use stay zeroed.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Preset matcap capture used by the matcap material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcapStyle {
    Gold,
    Silver,
    Red,
    Blue,
}

impl MatcapStyle {
    pub const ALL: [MatcapStyle; 4] = [
        MatcapStyle::Gold,
        MatcapStyle::Silver,
        MatcapStyle::Red,
        MatcapStyle::Blue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MatcapStyle::Gold => "gold",
            MatcapStyle::Silver => "silver",
            MatcapStyle::Red => "red",
            MatcapStyle::Blue => "blue",
        }
    }

    /// Tint of the generated capture
    pub fn base_color(&self) -> Vec3 {
        match self {
            MatcapStyle::Gold => Vec3::new(1.0, 0.77, 0.25),
            MatcapStyle::Silver => Vec3::new(0.83, 0.85, 0.88),
            MatcapStyle::Red => Vec3::new(0.85, 0.12, 0.12),
            MatcapStyle::Blue => Vec3::new(0.15, 0.35, 0.9),
        }
    }
}

/// Surface appearance of a mesh node
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialDesc {
    /// Unlit flat color
    Basic {
        color: Vec3,
        opacity: f32,
        wireframe: bool,
    },
    /// Diffuse-only shading
    Lambert {
        color: Vec3,
        emissive: Vec3,
        emissive_intensity: f32,
        opacity: f32,
        wireframe: bool,
    },
    /// Diffuse plus a specular highlight
    Phong {
        color: Vec3,
        specular: Vec3,
        shininess: f32,
        emissive: Vec3,
        emissive_intensity: f32,
        opacity: f32,
        wireframe: bool,
    },
    /// Metallic-roughness PBR
    Standard {
        color: Vec3,
        roughness: f32,
        metalness: f32,
        emissive: Vec3,
        emissive_intensity: f32,
        opacity: f32,
        wireframe: bool,
    },
    /// PBR with clearcoat and transmission extensions
    Physical {
        color: Vec3,
        roughness: f32,
        metalness: f32,
        clearcoat: f32,
        clearcoat_roughness: f32,
        transmission: f32,
        ior: f32,
        thickness: f32,
        opacity: f32,
        wireframe: bool,
    },
    /// Banded cartoon shading
    Toon {
        color: Vec3,
        /// Number of shading bands
        gradient_size: f32,
        opacity: f32,
        wireframe: bool,
    },
    /// View-space normals as color
    Normal { opacity: f32, wireframe: bool },
    /// Linear depth between the clip planes as grayscale
    Depth { wireframe: bool },
    /// Prebaked sphere capture looked up by the view-space normal
    Matcap {
        style: MatcapStyle,
        color: Vec3,
        opacity: f32,
        wireframe: bool,
    },
}

pub const MATERIAL_KIND_BASIC: f32 = 0.0;
pub const MATERIAL_KIND_LAMBERT: f32 = 1.0;
pub const MATERIAL_KIND_PHONG: f32 = 2.0;
pub const MATERIAL_KIND_STANDARD: f32 = 3.0;
pub const MATERIAL_KIND_PHYSICAL: f32 = 4.0;
pub const MATERIAL_KIND_TOON: f32 = 5.0;
pub const MATERIAL_KIND_NORMAL: f32 = 6.0;
pub const MATERIAL_KIND_DEPTH: f32 = 7.0;
pub const MATERIAL_KIND_MATCAP: f32 = 8.0;

impl MaterialDesc {
    pub fn basic(color: Vec3) -> Self {
        MaterialDesc::Basic {
            color,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn standard(color: Vec3, roughness: f32, metalness: f32) -> Self {
        MaterialDesc::Standard {
            color,
            roughness,
            metalness,
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn kind_code(&self) -> f32 {
        match self {
            MaterialDesc::Basic { .. } => MATERIAL_KIND_BASIC,
            MaterialDesc::Lambert { .. } => MATERIAL_KIND_LAMBERT,
            MaterialDesc::Phong { .. } => MATERIAL_KIND_PHONG,
            MaterialDesc::Standard { .. } => MATERIAL_KIND_STANDARD,
            MaterialDesc::Physical { .. } => MATERIAL_KIND_PHYSICAL,
            MaterialDesc::Toon { .. } => MATERIAL_KIND_TOON,
            MaterialDesc::Normal { .. } => MATERIAL_KIND_NORMAL,
            MaterialDesc::Depth { .. } => MATERIAL_KIND_DEPTH,
            MaterialDesc::Matcap { .. } => MATERIAL_KIND_MATCAP,
        }
    }

    pub fn wireframe(&self) -> bool {
        match self {
            MaterialDesc::Basic { wireframe, .. }
            | MaterialDesc::Lambert { wireframe, .. }
            | MaterialDesc::Phong { wireframe, .. }
            | MaterialDesc::Standard { wireframe, .. }
            | MaterialDesc::Physical { wireframe, .. }
            | MaterialDesc::Toon { wireframe, .. }
            | MaterialDesc::Normal { wireframe, .. }
            | MaterialDesc::Depth { wireframe }
            | MaterialDesc::Matcap { wireframe, .. } => *wireframe,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            MaterialDesc::Basic { opacity, .. }
            | MaterialDesc::Lambert { opacity, .. }
            | MaterialDesc::Phong { opacity, .. }
            | MaterialDesc::Standard { opacity, .. }
            | MaterialDesc::Physical { opacity, .. }
            | MaterialDesc::Toon { opacity, .. }
            | MaterialDesc::Normal { opacity, .. }
            | MaterialDesc::Matcap { opacity, .. } => *opacity,
            MaterialDesc::Depth { .. } => 1.0,
        }
    }

    /// Needs alpha blending instead of the opaque pipeline
    pub fn transparent(&self) -> bool {
        self.opacity() < 1.0
            || matches!(
                self,
                MaterialDesc::Physical { transmission, .. } if *transmission > 0.0
            )
    }

    /// The matcap style, for kinds that sample a capture texture
    pub fn matcap_style(&self) -> Option<MatcapStyle> {
        match self {
            MaterialDesc::Matcap { style, .. } => Some(*style),
            _ => None,
        }
    }

    pub fn uniform_data(&self) -> MaterialUniformData {
        let mut data = MaterialUniformData::zeroed();
        data.kind_flags.x = self.kind_code();
        data.base_color.w = self.opacity();
        data.params2.y = 1.5; // default ior

        match self {
            MaterialDesc::Basic { color, .. } => {
                data.base_color = color.extend(self.opacity());
            }
            MaterialDesc::Lambert {
                color,
                emissive,
                emissive_intensity,
                ..
            } => {
                data.base_color = color.extend(self.opacity());
                data.emissive = emissive.extend(*emissive_intensity);
            }
            MaterialDesc::Phong {
                color,
                specular,
                shininess,
                emissive,
                emissive_intensity,
                ..
            } => {
                data.base_color = color.extend(self.opacity());
                data.specular = specular.extend(*shininess);
                data.emissive = emissive.extend(*emissive_intensity);
            }
            MaterialDesc::Standard {
                color,
                roughness,
                metalness,
                emissive,
                emissive_intensity,
                ..
            } => {
                data.base_color = color.extend(self.opacity());
                data.emissive = emissive.extend(*emissive_intensity);
                data.params = Vec4::new(*roughness, *metalness, 0.0, 0.0);
            }
            MaterialDesc::Physical {
                color,
                roughness,
                metalness,
                clearcoat,
                clearcoat_roughness,
                transmission,
                ior,
                thickness,
                ..
            } => {
                data.base_color = color.extend(self.opacity());
                data.params = Vec4::new(*roughness, *metalness, *clearcoat, *clearcoat_roughness);
                data.params2 = Vec4::new(*transmission, *ior, *thickness, 0.0);
            }
            MaterialDesc::Toon {
                color,
                gradient_size,
                ..
            } => {
                data.base_color = color.extend(self.opacity());
                data.params2.w = *gradient_size;
            }
            MaterialDesc::Normal { .. } | MaterialDesc::Depth { .. } => {
                data.base_color = Vec3::ONE.extend(self.opacity());
            }
            MaterialDesc::Matcap { color, .. } => {
                data.base_color = color.extend(self.opacity());
            }
        }

        data
    }
}

/// Material uniform data for the GPU, shared by every material kind
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MaterialUniformData {
    /// rgb = albedo, w = opacity
    pub base_color: Vec4,
    /// rgb = emissive color, w = emissive intensity
    pub emissive: Vec4,
    /// rgb = specular color, w = shininess
    pub specular: Vec4,
    /// x = roughness, y = metalness, z = clearcoat, w = clearcoat roughness
    pub params: Vec4,
    /// x = transmission, y = ior, z = thickness, w = toon gradient size
    pub params2: Vec4,
    /// x = material kind code
    pub kind_flags: Vec4,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_are_distinct() {
        let kinds = [
            MaterialDesc::basic(Vec3::ONE),
            MaterialDesc::Lambert {
                color: Vec3::ONE,
                emissive: Vec3::ZERO,
                emissive_intensity: 1.0,
                opacity: 1.0,
                wireframe: false,
            },
            MaterialDesc::Phong {
                color: Vec3::ONE,
                specular: Vec3::ONE,
                shininess: 30.0,
                emissive: Vec3::ZERO,
                emissive_intensity: 1.0,
                opacity: 1.0,
                wireframe: false,
            },
            MaterialDesc::standard(Vec3::ONE, 0.5, 0.5),
            MaterialDesc::Physical {
                color: Vec3::ONE,
                roughness: 0.2,
                metalness: 0.0,
                clearcoat: 0.8,
                clearcoat_roughness: 0.2,
                transmission: 0.0,
                ior: 1.5,
                thickness: 0.5,
                opacity: 1.0,
                wireframe: false,
            },
            MaterialDesc::Toon {
                color: Vec3::ONE,
                gradient_size: 4.0,
                opacity: 1.0,
                wireframe: false,
            },
            MaterialDesc::Normal {
                opacity: 1.0,
                wireframe: false,
            },
            MaterialDesc::Depth { wireframe: false },
            MaterialDesc::Matcap {
                style: MatcapStyle::Gold,
                color: Vec3::ONE,
                opacity: 1.0,
                wireframe: false,
            },
        ];
        let mut codes: Vec<i32> = kinds.iter().map(|m| m.kind_code() as i32).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn transmission_forces_blending() {
        let glass = MaterialDesc::Physical {
            color: Vec3::ONE,
            roughness: 0.2,
            metalness: 0.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            transmission: 0.95,
            ior: 1.5,
            thickness: 0.5,
            opacity: 1.0,
            wireframe: false,
        };
        assert!(glass.transparent());
        assert!(!MaterialDesc::standard(Vec3::ONE, 0.5, 0.5).transparent());
    }

    #[test]
    fn uniform_carries_kind_and_opacity() {
        let material = MaterialDesc::Basic {
            color: Vec3::new(1.0, 0.0, 0.5),
            opacity: 0.4,
            wireframe: false,
        };
        let data = material.uniform_data();
        assert_eq!(data.kind_flags.x, MATERIAL_KIND_BASIC);
        assert_eq!(data.base_color.w, 0.4);
    }
}
