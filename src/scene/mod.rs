//! Declarative scene description
//!
//! Examples rebuild a [`SceneDesc`] from their current control values every
//! frame; the renderer consumes it without retained per-scene state. Removing
//! a node from the description removes it from the picture, there is no
//! hidden lifecycle to manage.

pub mod camera;
pub mod geometry;
pub mod light;
pub mod material;
pub mod orbit;
pub mod transform;

pub use camera::{Camera, CameraUniformData, Projection};
pub use geometry::{GeometryDesc, PolyhedronKind};
pub use light::{
    AmbientLight, DirectionalLight, GpuLightData, Light, PointLight, SpotLight, MAX_LIGHTS,
};
pub use material::{MatcapStyle, MaterialDesc, MaterialUniformData};
pub use orbit::{OrbitController, OrbitInput};
pub use transform::{Transform, TransformUniformData};

use glam::Vec3;

/// A shape with a material and a placement
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    pub geometry: GeometryDesc,
    pub material: MaterialDesc,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshNode {
    pub fn new(geometry: GeometryDesc, material: MaterialDesc) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::default(),
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }
}

/// One node of the scene tree
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Light(Light),
    Mesh(MeshNode),
    /// Reference grid in the ground plane
    Grid { size: f32, divisions: u32 },
    /// World axes helper (x red, y green, z blue)
    Axes { length: f32 },
}

/// Complete description of one frame's scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDesc {
    /// Linear-space clear color
    pub background: Vec3,
    pub camera: Camera,
    pub nodes: Vec<SceneNode>,
}

impl SceneDesc {
    pub fn new(camera: Camera) -> Self {
        Self {
            background: Vec3::ZERO,
            camera,
            nodes: Vec::new(),
        }
    }

    pub fn add(&mut self, node: SceneNode) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_light(&mut self, light: Light) -> &mut Self {
        self.add(SceneNode::Light(light))
    }

    pub fn add_mesh(&mut self, mesh: MeshNode) -> &mut Self {
        self.add(SceneNode::Mesh(mesh))
    }

    pub fn add_grid(&mut self, size: f32, divisions: u32) -> &mut Self {
        self.add(SceneNode::Grid { size, divisions })
    }

    pub fn add_axes(&mut self, length: f32) -> &mut Self {
        self.add(SceneNode::Axes { length })
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Light(light) => Some(light),
            _ => None,
        })
    }

    pub fn meshes(&self) -> impl Iterator<Item = &MeshNode> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Mesh(mesh) => Some(mesh),
            _ => None,
        })
    }

    /// Summed ambient contribution, premultiplied by intensity
    pub fn ambient(&self) -> Vec3 {
        self.lights()
            .filter_map(|light| match light {
                Light::Ambient(ambient) => Some(ambient.color * ambient.intensity),
                _ => None,
            })
            .fold(Vec3::ZERO, |acc, c| acc + c)
    }

    /// Non-ambient lights packed for the GPU, truncated to [`MAX_LIGHTS`]
    pub fn gpu_lights(&self) -> Vec<GpuLightData> {
        self.lights()
            .filter_map(Light::to_gpu_data)
            .take(MAX_LIGHTS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_sums_and_stays_out_of_gpu_array() {
        let mut scene = SceneDesc::new(Camera::default());
        scene.add_light(Light::Ambient(AmbientLight {
            color: Vec3::ONE,
            intensity: 0.5,
        }));
        scene.add_light(Light::Ambient(AmbientLight {
            color: Vec3::new(1.0, 0.0, 0.0),
            intensity: 0.25,
        }));
        scene.add_light(Light::Point(PointLight::default()));

        assert_eq!(scene.ambient(), Vec3::new(0.75, 0.5, 0.5));
        assert_eq!(scene.gpu_lights().len(), 1);
    }

    #[test]
    fn node_queries_filter_by_kind() {
        let mut scene = SceneDesc::new(Camera::default());
        scene.add_grid(20.0, 20);
        scene.add_mesh(MeshNode::new(
            GeometryDesc::cube(2.0),
            MaterialDesc::basic(Vec3::ONE),
        ));
        scene.add_light(Light::Directional(DirectionalLight::default()));

        assert_eq!(scene.meshes().count(), 1);
        assert_eq!(scene.lights().count(), 1);
        assert_eq!(scene.nodes.len(), 3);
    }
}
