//! Object transform

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Position, rotation and scale of an object in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Get the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Build uniform data for shaders
    pub fn uniform_data(&self) -> TransformUniformData {
        let model = self.matrix();
        TransformUniformData {
            model,
            normal_matrix: model.inverse().transpose(),
        }
    }
}

/// Transform uniform data for the GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformUniformData {
    pub model: Mat4,
    pub normal_matrix: Mat4,
}
