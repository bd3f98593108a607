//! Camera description and GPU uniform data

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn perspective(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near,
            far,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

/// Camera for viewing a scene
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::default(),
        }
    }
}

impl Camera {
    /// Camera with an explicit perspective projection, the way the examples
    /// declare them: field of view in degrees plus clip planes.
    pub fn perspective(position: Vec3, fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::perspective(fov_y_degrees, near, far),
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Update aspect ratio from a surface size
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.projection.aspect = width / height;
        }
    }

    /// Build camera uniform data for shaders
    pub fn uniform_data(&self) -> CameraUniformData {
        let view = self.view_matrix();
        let proj = self.projection_matrix();

        CameraUniformData {
            view,
            proj,
            view_proj: proj * view,
            position: self.position.extend(1.0),
            near_far: Vec4::new(self.projection.near, self.projection.far, 0.0, 0.0),
        }
    }
}

/// Camera uniform data for the GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniformData {
    pub view: Mat4,
    pub proj: Mat4,
    pub view_proj: Mat4,
    pub position: Vec4,
    pub near_far: Vec4,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_uses_degrees() {
        let camera = Camera::perspective(Vec3::new(5.0, 5.0, 5.0), 75.0, 1.0, 100.0);
        assert!((camera.projection.fov_y - 75.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn aspect_follows_surface_size() {
        let mut camera = Camera::default();
        camera.set_aspect(800.0, 400.0);
        assert_eq!(camera.projection.aspect, 2.0);
        // Degenerate sizes leave the aspect untouched
        camera.set_aspect(800.0, 0.0);
        assert_eq!(camera.projection.aspect, 2.0);
    }
}
