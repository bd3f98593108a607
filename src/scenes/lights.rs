//! Lights scene: the four light types against a small still life

use glam::Vec3;

use crate::controls::{ControlGroup, ControlSet};
use crate::gallery::{Example, SceneTemplate, TemplateProps, DEFAULT_SURFACE_HEIGHT};
use crate::render::{RenderCtx, ViewportPool};
use crate::scene::{
    AmbientLight, Camera, DirectionalLight, GeometryDesc, Light, MaterialDesc, MeshNode,
    OrbitController, PointLight, SceneDesc, SpotLight,
};

const PROPS: TemplateProps = TemplateProps {
    title: "Lights",
    description: "Ambient, directional, point and spot lights shining on a \
        sphere, a cube and a ground slab. Each light can be switched off \
        entirely, moved with its position sliders and recolored. Helpers \
        mark where the directional, point and spot lights sit and where \
        they aim.",
    guide: &[
        "Toggle each light's visible switch to isolate its contribution.",
        "Drag the position sliders and watch highlights and shading follow the light.",
        "Narrow the spot light's angle to shrink its cone on the ground.",
    ],
    code: Some(
        r#"if controls.toggle("Spot Light.visible") {
    scene.add_light(Light::Spot(SpotLight {
        position: spot_position,
        color: controls.color("Spot Light.color"),
        intensity: controls.number("Spot Light.intensity"),
        angle: controls.number("Spot Light.angle"),
        cast_shadow: controls.toggle("Spot Light.castShadow"),
        gizmo: true,
        ..Default::default()
    }));
}"#,
    ),
};

pub struct LightsExample {
    template: SceneTemplate,
    controls: ControlSet,
    camera: Camera,
    orbit: OrbitController,
}

impl Default for LightsExample {
    fn default() -> Self {
        Self::new()
    }
}

impl LightsExample {
    pub fn new() -> Self {
        let camera = Camera::perspective(Vec3::new(10.0, 6.0, 2.0), 75.0, 1.0, 100.0);
        let orbit = OrbitController::from_camera(&camera);
        Self {
            template: SceneTemplate::new(),
            controls: Self::controls(),
            camera,
            orbit,
        }
    }

    pub fn controls() -> ControlSet {
        ControlSet::new(vec![
            ControlGroup::new("Ambient Light")
                .toggle("visible", true)
                .slider("intensity", 0.5, 0.0, 1.0, 0.01)
                .color("color", Vec3::ONE)
                .toggle("castShadow", true),
            ControlGroup::new("Directional Light")
                .toggle("visible", true)
                .slider("intensity", 0.5, 0.0, 5.0, 0.01)
                .color("color", Vec3::new(1.0, 0.0, 0.0))
                .slider("x", 0.0, -10.0, 10.0, 0.5)
                .slider("y", 5.0, -10.0, 10.0, 0.5)
                .slider("z", 0.0, -10.0, 10.0, 0.5)
                .toggle("castShadow", true),
            ControlGroup::new("Point Light")
                .toggle("visible", true)
                .slider("intensity", 0.8, 0.0, 5.0, 0.01)
                .color("color", Vec3::ONE)
                .slider("x", 0.0, -10.0, 10.0, 0.5)
                .slider("y", 3.0, -10.0, 10.0, 0.5)
                .slider("z", 2.0, -10.0, 10.0, 0.5)
                .toggle("castShadow", true),
            ControlGroup::new("Spot Light")
                .toggle("visible", true)
                .slider("intensity", 1.0, 0.0, 5.0, 0.01)
                .slider("angle", 0.4, 0.0, 1.0, 0.01)
                .color("color", Vec3::new(0.0, 1.0, 0.0))
                .slider("x", 5.0, -10.0, 10.0, 0.5)
                .slider("y", 5.0, -10.0, 10.0, 0.5)
                .slider("z", 5.0, -10.0, 10.0, 0.5)
                .toggle("castShadow", true),
        ])
    }

    /// A light with its visible switch off is left out of the tree entirely.
    /// The ambient castShadow toggle is shown for symmetry with the other
    /// groups but ambient light never casts shadows, so it reads nothing.
    pub fn scene(controls: &ControlSet) -> SceneDesc {
        let mut scene = SceneDesc::new(Camera::perspective(
            Vec3::new(10.0, 6.0, 2.0),
            75.0,
            1.0,
            100.0,
        ));

        if controls.toggle("Ambient Light.visible") {
            scene.add_light(Light::Ambient(AmbientLight {
                color: controls.color("Ambient Light.color"),
                intensity: controls.number("Ambient Light.intensity"),
            }));
        }
        if controls.toggle("Directional Light.visible") {
            scene.add_light(Light::Directional(DirectionalLight {
                position: Vec3::new(
                    controls.number("Directional Light.x"),
                    controls.number("Directional Light.y"),
                    controls.number("Directional Light.z"),
                ),
                color: controls.color("Directional Light.color"),
                intensity: controls.number("Directional Light.intensity"),
                cast_shadow: controls.toggle("Directional Light.castShadow"),
                gizmo: true,
            }));
        }
        if controls.toggle("Point Light.visible") {
            scene.add_light(Light::Point(PointLight {
                position: Vec3::new(
                    controls.number("Point Light.x"),
                    controls.number("Point Light.y"),
                    controls.number("Point Light.z"),
                ),
                color: controls.color("Point Light.color"),
                intensity: controls.number("Point Light.intensity"),
                cast_shadow: controls.toggle("Point Light.castShadow"),
                gizmo: true,
                ..Default::default()
            }));
        }
        if controls.toggle("Spot Light.visible") {
            scene.add_light(Light::Spot(SpotLight {
                position: Vec3::new(
                    controls.number("Spot Light.x"),
                    controls.number("Spot Light.y"),
                    controls.number("Spot Light.z"),
                ),
                color: controls.color("Spot Light.color"),
                intensity: controls.number("Spot Light.intensity"),
                angle: controls.number("Spot Light.angle"),
                cast_shadow: controls.toggle("Spot Light.castShadow"),
                gizmo: true,
                ..Default::default()
            }));
        }

        scene.add_mesh(
            MeshNode::new(
                GeometryDesc::sphere(1.2, 32, 32),
                MaterialDesc::standard(Vec3::new(1.0, 0.0, 0.0), 0.5, 0.1),
            )
            .at(Vec3::new(0.0, 1.0, 2.0))
            .shadows(true, false),
        );
        scene.add_mesh(
            MeshNode::new(
                GeometryDesc::cube(1.8),
                MaterialDesc::standard(Vec3::new(0.0, 0.0, 1.0), 0.5, 0.1),
            )
            .at(Vec3::new(0.0, 1.0, -2.0))
            .shadows(true, false),
        );
        scene.add_mesh(
            MeshNode::new(
                GeometryDesc::box_dims(10.0, 1.0, 10.0),
                MaterialDesc::standard(Vec3::ONE, 0.8, 0.0),
            )
            .at(Vec3::new(0.0, -2.0, 0.0))
            .shadows(false, true),
        );
        scene
    }
}

impl Example for LightsExample {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut RenderCtx<'_>, pool: &mut ViewportPool) {
        egui::SidePanel::right("lights_controls")
            .default_width(280.0)
            .show_inside(ui, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.controls.ui(ui);
                });
            });

        let Self {
            template,
            controls,
            camera,
            orbit,
        } = self;
        egui::CentralPanel::default().show_inside(ui, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                template.show(ui, &PROPS, |ui| {
                    pool.show(
                        ui,
                        ctx,
                        "lights",
                        DEFAULT_SURFACE_HEIGHT,
                        camera,
                        orbit,
                        Self::scene(controls),
                    );
                });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lights_on_by_default() {
        let controls = LightsExample::controls();
        let scene = LightsExample::scene(&controls);
        assert_eq!(scene.lights().count(), 4);
        // ambient stays out of the GPU light array
        assert_eq!(scene.gpu_lights().len(), 3);
        assert_eq!(scene.lights().filter(|l| l.wants_gizmo()).count(), 3);
        assert_eq!(scene.meshes().count(), 3);
    }

    #[test]
    fn invisible_light_leaves_the_tree() {
        let mut controls = LightsExample::controls();
        controls.set_toggle("Point Light.visible", false);
        controls.set_toggle("Ambient Light.visible", false);

        let scene = LightsExample::scene(&controls);
        assert_eq!(scene.lights().count(), 2);
        assert_eq!(scene.ambient(), Vec3::ZERO);
        assert!(!scene
            .lights()
            .any(|l| matches!(l, Light::Point(_) | Light::Ambient(_))));
    }

    #[test]
    fn sliders_position_the_spot_light() {
        let mut controls = LightsExample::controls();
        controls.set_number("Spot Light.x", -3.0);
        controls.set_number("Spot Light.angle", 0.7);

        let scene = LightsExample::scene(&controls);
        let spot = scene
            .lights()
            .find_map(|l| match l {
                Light::Spot(s) => Some(s),
                _ => None,
            })
            .unwrap();
        assert_eq!(spot.position, Vec3::new(-3.0, 5.0, 5.0));
        assert_eq!(spot.angle, 0.7);
    }

    #[test]
    fn ground_receives_and_subjects_cast() {
        let controls = LightsExample::controls();
        let scene = LightsExample::scene(&controls);
        let ground = scene
            .meshes()
            .find(|m| m.transform.position.y < 0.0)
            .unwrap();
        assert!(ground.receive_shadow && !ground.cast_shadow);
        assert_eq!(scene.meshes().filter(|m| m.cast_shadow).count(), 2);
    }
}
