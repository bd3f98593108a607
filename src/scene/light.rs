//! Declarative light descriptions
//!
//! A light that is switched off in a scene's controls is simply absent from
//! the node tree; there is no "disabled" state here. Gizmo flags request the
//! renderer's visual helper for the light's position and orientation.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Uniform illumination with no direction and no gizmo
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 0.5,
        }
    }
}

/// Sun-like light shining from `position` toward the origin
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub cast_shadow: bool,
    pub gizmo: bool,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 0.0),
            color: Vec3::ONE,
            intensity: 1.0,
            cast_shadow: false,
            gizmo: false,
        }
    }
}

impl DirectionalLight {
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

/// Light radiating in all directions from a point
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
    pub cast_shadow: bool,
    pub gizmo: bool,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 2.0),
            color: Vec3::ONE,
            intensity: 1.0,
            range: 50.0,
            cast_shadow: false,
            gizmo: false,
        }
    }
}

/// Cone of light from `position` aimed at the origin
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
    /// Half-angle of the cone in radians
    pub angle: f32,
    pub cast_shadow: bool,
    pub gizmo: bool,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            color: Vec3::ONE,
            intensity: 1.0,
            range: 50.0,
            angle: 0.4,
            cast_shadow: false,
            gizmo: false,
        }
    }
}

impl SpotLight {
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

/// A light node in the scene tree
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    /// Whether the renderer should draw a position/orientation helper
    pub fn wants_gizmo(&self) -> bool {
        match self {
            Light::Ambient(_) => false,
            Light::Directional(light) => light.gizmo,
            Light::Point(light) => light.gizmo,
            Light::Spot(light) => light.gizmo,
        }
    }

    pub fn color(&self) -> Vec3 {
        match self {
            Light::Ambient(light) => light.color,
            Light::Directional(light) => light.color,
            Light::Point(light) => light.color,
            Light::Spot(light) => light.color,
        }
    }

    /// Pack into the GPU light array format, or `None` for ambient lights
    /// (ambient contributions are summed into the scene uniform instead).
    pub fn to_gpu_data(&self) -> Option<GpuLightData> {
        match self {
            Light::Ambient(_) => None,
            Light::Directional(light) => Some(GpuLightData {
                position: Vec4::new(0.0, 0.0, 0.0, f32::INFINITY),
                color_intensity: light.color.extend(light.intensity),
                direction_type: light.direction().extend(LIGHT_TYPE_DIRECTIONAL),
                spot_params: Vec4::ZERO,
            }),
            Light::Point(light) => Some(GpuLightData {
                position: light.position.extend(light.range),
                color_intensity: light.color.extend(light.intensity),
                direction_type: Vec4::new(0.0, 0.0, 0.0, LIGHT_TYPE_POINT),
                spot_params: Vec4::ZERO,
            }),
            Light::Spot(light) => Some(GpuLightData {
                position: light.position.extend(light.range),
                color_intensity: light.color.extend(light.intensity),
                direction_type: light.direction().extend(LIGHT_TYPE_SPOT),
                spot_params: Vec4::new(
                    (light.angle * 0.8).cos(),
                    light.angle.cos(),
                    0.0,
                    0.0,
                ),
            }),
        }
    }
}

pub const LIGHT_TYPE_POINT: f32 = 0.0;
pub const LIGHT_TYPE_SPOT: f32 = 1.0;
pub const LIGHT_TYPE_DIRECTIONAL: f32 = 2.0;

/// GPU-friendly light data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GpuLightData {
    /// xyz = position, w = range
    pub position: Vec4,
    /// xyz = color, w = intensity
    pub color_intensity: Vec4,
    /// xyz = direction, w = light type (0=point, 1=spot, 2=directional)
    pub direction_type: Vec4,
    /// x = cos(inner angle), y = cos(outer angle), zw = unused
    pub spot_params: Vec4,
}

/// Maximum number of non-ambient lights in one scene
pub const MAX_LIGHTS: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_packs_to_none() {
        assert!(Light::Ambient(AmbientLight::default()).to_gpu_data().is_none());
    }

    #[test]
    fn spot_inner_cone_is_tighter() {
        let light = SpotLight {
            angle: 0.5,
            ..Default::default()
        };
        let data = Light::Spot(light).to_gpu_data().unwrap();
        // cos is decreasing: inner cone has the larger cosine
        assert!(data.spot_params.x > data.spot_params.y);
        assert_eq!(data.direction_type.w, LIGHT_TYPE_SPOT);
    }

    #[test]
    fn directional_aims_at_origin() {
        let light = DirectionalLight {
            position: Vec3::new(0.0, 5.0, 0.0),
            ..Default::default()
        };
        assert!((light.direction() - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-6);
    }
}
