//! Basic scene: one lit cube and the camera/light/mesh vocabulary

use glam::Vec3;

use crate::gallery::{Example, SceneTemplate, TemplateProps, DEFAULT_SURFACE_HEIGHT};
use crate::render::{RenderCtx, ViewportPool};
use crate::scene::{
    AmbientLight, Camera, DirectionalLight, GeometryDesc, Light, MaterialDesc, MeshNode,
    OrbitController, SceneDesc,
};

const PROPS: TemplateProps = TemplateProps {
    title: "Basic Scene",
    description: "The smallest complete scene: a perspective camera, two \
        lights and a single cube. A wide 75 degree field of view gives the \
        cube a dramatic perspective, and the camera sits diagonally at \
        (5, 5, 5) looking at the origin.",
    guide: &[
        "Drag to orbit the cube, scroll to zoom, shift-drag to pan.",
        "Orbit around the cube and watch how the directional light falls on its faces.",
    ],
    code: Some(
        r#"let mut scene = SceneDesc::new(Camera::perspective(
    Vec3::new(5.0, 5.0, 5.0), 75.0, 1.0, 100.0,
));
scene.add_light(Light::Ambient(AmbientLight {
    intensity: 0.5,
    ..Default::default()
}));
scene.add_light(Light::Directional(DirectionalLight {
    position: Vec3::new(0.0, 2.0, 5.0),
    cast_shadow: true,
    ..Default::default()
}));
scene.add_mesh(MeshNode::new(
    GeometryDesc::cube(2.0),
    MaterialDesc::standard(HOTPINK, 1.0, 0.0),
));"#,
    ),
};

const HOTPINK: Vec3 = Vec3::new(1.0, 0.412, 0.706);

pub struct BasicExample {
    template: SceneTemplate,
    camera: Camera,
    orbit: OrbitController,
}

impl Default for BasicExample {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicExample {
    pub fn new() -> Self {
        let camera = Camera::perspective(Vec3::new(5.0, 5.0, 5.0), 75.0, 1.0, 100.0);
        let orbit = OrbitController::from_camera(&camera);
        Self {
            template: SceneTemplate::new(),
            camera,
            orbit,
        }
    }

    /// The scene has no controls; it is the same every frame
    pub fn scene() -> SceneDesc {
        let mut scene = SceneDesc::new(Camera::perspective(
            Vec3::new(5.0, 5.0, 5.0),
            75.0,
            1.0,
            100.0,
        ));

        scene.add_light(Light::Ambient(AmbientLight {
            color: Vec3::ONE,
            intensity: 0.5,
        }));
        scene.add_light(Light::Directional(DirectionalLight {
            position: Vec3::new(0.0, 2.0, 5.0),
            color: Vec3::ONE,
            intensity: 1.0,
            cast_shadow: true,
            gizmo: false,
        }));

        scene.add_mesh(MeshNode::new(
            GeometryDesc::cube(2.0),
            MaterialDesc::standard(HOTPINK, 1.0, 0.0),
        ));

        scene.add_grid(10.0, 10);
        scene.add_axes(5.0);
        scene
    }
}

impl Example for BasicExample {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut RenderCtx<'_>, pool: &mut ViewportPool) {
        let Self {
            template,
            camera,
            orbit,
        } = self;
        egui::ScrollArea::vertical().show(ui, |ui| {
            template.show(ui, &PROPS, |ui| {
                pool.show(
                    ui,
                    ctx,
                    "basic",
                    DEFAULT_SURFACE_HEIGHT,
                    camera,
                    orbit,
                    Self::scene(),
                );
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_matches_declared_setup() {
        let scene = BasicExample::scene();
        assert_eq!(scene.background, Vec3::ZERO);
        assert_eq!(scene.camera.position, Vec3::new(5.0, 5.0, 5.0));
        assert!((scene.camera.projection.fov_y - 75.0_f32.to_radians()).abs() < 1e-6);

        assert_eq!(scene.lights().count(), 2);
        assert_eq!(scene.gpu_lights().len(), 1);
        assert_eq!(scene.ambient(), Vec3::splat(0.5));

        let cube = scene.meshes().next().unwrap();
        assert_eq!(cube.geometry, GeometryDesc::cube(2.0));
        assert!(matches!(cube.material, MaterialDesc::Standard { color, .. } if color == HOTPINK));
    }
}
