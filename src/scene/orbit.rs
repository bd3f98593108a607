//! Orbit camera controller
//!
//! Pointer-driven camera control over a render surface:
//! - Drag: orbit around the target point
//! - Scroll: zoom in/out (change distance)
//! - Shift + drag: pan the target point

use glam::{Vec2, Vec3};

use super::Camera;

/// Pointer input gathered from the render surface for one frame
#[derive(Debug, Clone, Default)]
pub struct OrbitInput {
    /// Pointer delta while dragging (in points)
    pub drag_delta: Vec2,
    /// Scroll delta (positive = scroll up)
    pub scroll_delta: f32,
    /// Whether the drag should pan instead of orbit
    pub pan: bool,
}

impl OrbitInput {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Orbit camera controller
///
/// Rotates around a target point at a controlled distance, matching the
/// interaction contract of the examples' render surfaces.
#[derive(Debug, Clone)]
pub struct OrbitController {
    /// Target point to orbit around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Minimum distance
    pub min_distance: f32,
    /// Maximum distance
    pub max_distance: f32,
    /// Current azimuth angle (horizontal) in radians
    pub azimuth: f32,
    /// Current elevation angle (vertical) in radians
    pub elevation: f32,
    /// Minimum elevation
    pub min_elevation: f32,
    /// Maximum elevation
    pub max_elevation: f32,
    /// Orbit sensitivity (radians per point)
    pub orbit_sensitivity: f32,
    /// Zoom factor per scroll unit
    pub zoom_factor: f32,
    /// Pan speed in world units per point, scaled by distance
    pub pan_speed: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 10.0,
            min_distance: 1.0,
            max_distance: 100.0,
            azimuth: 0.0,
            elevation: std::f32::consts::FRAC_PI_6, // 30 degrees
            min_elevation: -std::f32::consts::FRAC_PI_2 + 0.05,
            max_elevation: std::f32::consts::FRAC_PI_2 - 0.05,
            orbit_sensitivity: 0.008,
            zoom_factor: 1.1,
            pan_speed: 0.002,
        }
    }
}

impl OrbitController {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            ..Default::default()
        }
    }

    /// Initialize from a camera's declared position and target, so the first
    /// drag continues from the declared view instead of jumping.
    pub fn from_camera(camera: &Camera) -> Self {
        let mut controller = Self::default();
        controller.sync_with_camera(camera);
        controller
    }

    /// Adopt the given camera's position and target
    pub fn sync_with_camera(&mut self, camera: &Camera) {
        self.target = camera.target;
        let offset = camera.position - camera.target;
        self.distance = offset.length().clamp(self.min_distance, self.max_distance);

        if self.distance > 0.0 {
            self.elevation = (offset.y / self.distance)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(self.min_elevation, self.max_elevation);
        }
        self.azimuth = offset.z.atan2(offset.x);
    }

    /// Calculate camera position from orbit parameters
    fn calculate_position(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.cos();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.sin();
        self.target + Vec3::new(x, y, z)
    }

    /// Apply one frame of input and write the resulting pose into the camera
    pub fn update(&mut self, camera: &mut Camera, input: &OrbitInput) {
        if input.scroll_delta != 0.0 {
            if input.scroll_delta > 0.0 {
                self.distance /= self.zoom_factor;
            } else {
                self.distance *= self.zoom_factor;
            }
            self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        }

        if input.drag_delta != Vec2::ZERO {
            if input.pan {
                // Pan in the camera plane, scaled so the world appears to
                // follow the pointer at any zoom level
                let position = self.calculate_position();
                let forward = (self.target - position).normalize();
                let right = forward.cross(Vec3::Y).normalize();
                let up = right.cross(forward);
                let scale = self.pan_speed * self.distance;
                self.target -= right * input.drag_delta.x * scale;
                self.target += up * input.drag_delta.y * scale;
            } else {
                self.azimuth += input.drag_delta.x * self.orbit_sensitivity;
                self.elevation += input.drag_delta.y * self.orbit_sensitivity;
                self.elevation = self.elevation.clamp(self.min_elevation, self.max_elevation);
                self.azimuth %= 2.0 * std::f32::consts::PI;
            }
        }

        camera.position = self.calculate_position();
        camera.target = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_respects_distance_limits() {
        let mut controller = OrbitController::new(Vec3::ZERO, 2.0);
        let mut camera = Camera::default();
        let input = OrbitInput {
            scroll_delta: 100.0,
            ..Default::default()
        };
        for _ in 0..100 {
            controller.update(&mut camera, &input);
        }
        assert!((controller.distance - controller.min_distance).abs() < 1e-6);
    }

    #[test]
    fn sync_round_trips_declared_pose() {
        let camera = Camera::perspective(glam::Vec3::new(5.0, 5.0, 5.0), 75.0, 1.0, 100.0);
        let mut controller = OrbitController::from_camera(&camera);
        let mut moved = camera.clone();
        controller.update(&mut moved, &OrbitInput::new());
        assert!((moved.position - camera.position).length() < 1e-3);
    }

    #[test]
    fn orbit_leaves_target_in_place() {
        let mut controller = OrbitController::new(Vec3::new(1.0, 2.0, 3.0), 5.0);
        let mut camera = Camera::default();
        let input = OrbitInput {
            drag_delta: Vec2::new(30.0, -12.0),
            ..Default::default()
        };
        controller.update(&mut camera, &input);
        assert_eq!(camera.target, Vec3::new(1.0, 2.0, 3.0));
        assert!((camera.position - camera.target).length() - 5.0 < 1e-4);
    }
}
