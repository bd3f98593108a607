//! Materials scene: every material kind on its own sphere

use glam::Vec3;

use crate::controls::{ControlGroup, ControlSet};
use crate::gallery::{Example, SceneTemplate, TemplateProps};
use crate::render::{RenderCtx, ViewportPool};
use crate::scene::{
    AmbientLight, Camera, DirectionalLight, GeometryDesc, Light, MatcapStyle, MaterialDesc,
    MeshNode, OrbitController, PointLight, SceneDesc,
};

const PROPS: TemplateProps = TemplateProps {
    title: "Materials",
    description: "One sphere per material kind, each in its own viewport with \
        its own orbit camera. The sections run from the unlit basic material \
        through the classic lambert and phong models to the PBR standard and \
        physical materials, then the stylized toon, normal, depth and matcap \
        kinds. Every section's controls start collapsed; open one to tune \
        that material live.",
    guide: &[
        "Scroll through the sections and compare how each model responds to the same lights.",
        "Open a section's controls and drag the sliders; the sphere updates immediately.",
        "Enable wireframe on any material to see the sphere's tessellation.",
    ],
    code: None,
};

const DEFAULT_COLOR: Vec3 = Vec3::new(0.251, 0.502, 1.0);

struct Section {
    id: &'static str,
    group: &'static str,
    description: &'static str,
}

const SECTIONS: [Section; 9] = [
    Section {
        id: "mat_basic",
        group: "Basic Material",
        description: "Flat color with no lighting at all. What you set is what you see.",
    },
    Section {
        id: "mat_lambert",
        group: "Lambert Material",
        description: "Diffuse-only shading with no specular highlight, plus an \
            emissive term that glows independently of the lights.",
    },
    Section {
        id: "mat_phong",
        group: "Phong Material",
        description: "Diffuse shading plus a specular highlight whose size is \
            controlled by the shininess exponent.",
    },
    Section {
        id: "mat_standard",
        group: "Standard Material",
        description: "Physically based metallic-roughness shading, the usual \
            default for realistic surfaces.",
    },
    Section {
        id: "mat_physical",
        group: "Physical Material",
        description: "The standard model extended with a clearcoat layer and \
            transmission for glass-like surfaces.",
    },
    Section {
        id: "mat_toon",
        group: "Toon Material",
        description: "Cartoon shading that quantizes the diffuse term into a \
            configurable number of bands.",
    },
    Section {
        id: "mat_normal",
        group: "Normal Material",
        description: "Surface normals mapped to color, handy for debugging \
            geometry.",
    },
    Section {
        id: "mat_depth",
        group: "Depth Material",
        description: "Distance from the camera mapped to grayscale between the \
            near and far planes.",
    },
    Section {
        id: "mat_matcap",
        group: "Matcap Material",
        description: "Shading baked into a sphere capture and looked up by the \
            view-space normal. No scene lights are involved.",
    },
];

pub struct MaterialsExample {
    template: SceneTemplate,
    controls: ControlSet,
    rigs: Vec<(Camera, OrbitController)>,
}

impl Default for MaterialsExample {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialsExample {
    pub fn new() -> Self {
        let rigs = SECTIONS
            .iter()
            .map(|_| {
                let camera = Camera::perspective(Vec3::new(0.0, 0.0, 6.0), 45.0, 0.1, 100.0);
                let orbit = OrbitController::from_camera(&camera);
                (camera, orbit)
            })
            .collect();
        Self {
            template: SceneTemplate::new(),
            controls: Self::controls(),
            rigs,
        }
    }

    pub fn controls() -> ControlSet {
        ControlSet::new(vec![
            ControlGroup::new("Basic Material")
                .collapsed()
                .color("color", DEFAULT_COLOR)
                .slider("opacity", 1.0, 0.0, 1.0, 0.01)
                .toggle("wireframe", false),
            ControlGroup::new("Lambert Material")
                .collapsed()
                .color("color", DEFAULT_COLOR)
                .toggle("wireframe", false)
                .folder("reflection")
                .color("emissive", DEFAULT_COLOR)
                .slider("emissiveIntensity", 1.0, 0.0, 2.0, 0.01),
            ControlGroup::new("Phong Material")
                .collapsed()
                .color("color", DEFAULT_COLOR)
                .color("specular", Vec3::ONE)
                .slider("shininess", 30.0, 0.0, 100.0, 1.0)
                .toggle("wireframe", false)
                .folder("reflection")
                .color("emissive", DEFAULT_COLOR)
                .slider("emissiveIntensity", 1.0, 0.0, 2.0, 0.01),
            ControlGroup::new("Standard Material")
                .collapsed()
                .color("color", DEFAULT_COLOR)
                .toggle("wireframe", false)
                .folder("physicalProps")
                .slider("roughness", 0.5, 0.0, 1.0, 0.01)
                .slider("metalness", 0.5, 0.0, 1.0, 0.01)
                .end_folder()
                .folder("reflection")
                .color("emissive", DEFAULT_COLOR)
                .slider("emissiveIntensity", 1.0, 0.0, 2.0, 0.01),
            ControlGroup::new("Physical Material")
                .collapsed()
                .color("color", DEFAULT_COLOR)
                .toggle("wireframe", false)
                .folder("physicalProps")
                .slider("roughness", 0.2, 0.0, 1.0, 0.01)
                .slider("metalness", 0.0, 0.0, 1.0, 0.01)
                .slider("clearcoat", 0.8, 0.0, 1.0, 0.01)
                .slider("clearcoatRoughness", 0.2, 0.0, 1.0, 0.01)
                .slider("transmission", 0.95, 0.0, 1.0, 0.01)
                .slider("ior", 1.5, 1.0, 2.333, 0.01)
                .slider("thickness", 0.01, 0.0, 1.0, 0.01)
                .end_folder()
                .folder("surfaceEffects")
                .toggle("transparent", true)
                .slider("opacity", 1.0, 0.0, 1.0, 0.01),
            ControlGroup::new("Toon Material")
                .collapsed()
                .color("color", DEFAULT_COLOR)
                .slider("gradientSize", 4.0, 1.0, 10.0, 1.0)
                .toggle("wireframe", false),
            ControlGroup::new("Normal Material")
                .collapsed()
                .toggle("wireframe", false),
            ControlGroup::new("Depth Material")
                .collapsed()
                .toggle("wireframe", false),
            ControlGroup::new("Matcap Material").collapsed().select(
                "matcapStyle",
                &["gold", "silver", "red", "blue"],
                0,
            ),
        ])
    }

    pub fn material_for_section(controls: &ControlSet, index: usize) -> MaterialDesc {
        match index {
            0 => MaterialDesc::Basic {
                color: controls.color("Basic Material.color"),
                opacity: controls.number("Basic Material.opacity"),
                wireframe: controls.toggle("Basic Material.wireframe"),
            },
            1 => MaterialDesc::Lambert {
                color: controls.color("Lambert Material.color"),
                emissive: controls.color("Lambert Material.reflection.emissive"),
                emissive_intensity: controls
                    .number("Lambert Material.reflection.emissiveIntensity"),
                opacity: 1.0,
                wireframe: controls.toggle("Lambert Material.wireframe"),
            },
            2 => MaterialDesc::Phong {
                color: controls.color("Phong Material.color"),
                specular: controls.color("Phong Material.specular"),
                shininess: controls.number("Phong Material.shininess"),
                emissive: controls.color("Phong Material.reflection.emissive"),
                emissive_intensity: controls.number("Phong Material.reflection.emissiveIntensity"),
                opacity: 1.0,
                wireframe: controls.toggle("Phong Material.wireframe"),
            },
            3 => MaterialDesc::Standard {
                color: controls.color("Standard Material.color"),
                roughness: controls.number("Standard Material.physicalProps.roughness"),
                metalness: controls.number("Standard Material.physicalProps.metalness"),
                emissive: controls.color("Standard Material.reflection.emissive"),
                emissive_intensity: controls
                    .number("Standard Material.reflection.emissiveIntensity"),
                opacity: 1.0,
                wireframe: controls.toggle("Standard Material.wireframe"),
            },
            4 => MaterialDesc::Physical {
                color: controls.color("Physical Material.color"),
                roughness: controls.number("Physical Material.physicalProps.roughness"),
                metalness: controls.number("Physical Material.physicalProps.metalness"),
                clearcoat: controls.number("Physical Material.physicalProps.clearcoat"),
                clearcoat_roughness: controls
                    .number("Physical Material.physicalProps.clearcoatRoughness"),
                transmission: controls.number("Physical Material.physicalProps.transmission"),
                ior: controls.number("Physical Material.physicalProps.ior"),
                thickness: controls.number("Physical Material.physicalProps.thickness"),
                // opacity only participates when the transparent switch is on
                opacity: if controls.toggle("Physical Material.surfaceEffects.transparent") {
                    controls.number("Physical Material.surfaceEffects.opacity")
                } else {
                    1.0
                },
                wireframe: controls.toggle("Physical Material.wireframe"),
            },
            5 => MaterialDesc::Toon {
                color: controls.color("Toon Material.color"),
                gradient_size: controls.number("Toon Material.gradientSize"),
                opacity: 1.0,
                wireframe: controls.toggle("Toon Material.wireframe"),
            },
            6 => MaterialDesc::Normal {
                opacity: 1.0,
                wireframe: controls.toggle("Normal Material.wireframe"),
            },
            7 => MaterialDesc::Depth {
                wireframe: controls.toggle("Depth Material.wireframe"),
            },
            8 => MaterialDesc::Matcap {
                style: MatcapStyle::ALL[controls.choice("Matcap Material.matcapStyle")],
                color: Vec3::ONE,
                opacity: 1.0,
                wireframe: false,
            },
            _ => unreachable!("no such material section"),
        }
    }

    /// Every section shares the same stage, only the sphere's material differs
    pub fn scene_for_section(controls: &ControlSet, index: usize) -> SceneDesc {
        let mut scene = SceneDesc::new(Camera::perspective(
            Vec3::new(0.0, 0.0, 6.0),
            45.0,
            0.1,
            100.0,
        ));

        scene.add_light(Light::Ambient(AmbientLight {
            color: Vec3::ONE,
            intensity: 0.5,
        }));
        scene.add_light(Light::Directional(DirectionalLight {
            position: Vec3::new(5.0, 5.0, 5.0),
            color: Vec3::ONE,
            intensity: 1.0,
            cast_shadow: false,
            gizmo: false,
        }));
        scene.add_light(Light::Point(PointLight {
            position: Vec3::new(-5.0, 0.0, 5.0),
            color: Vec3::ONE,
            intensity: 1.0,
            ..Default::default()
        }));

        scene.add_mesh(
            MeshNode::new(
                GeometryDesc::sphere(1.0, 32, 32),
                Self::material_for_section(controls, index),
            )
            .shadows(true, false),
        );
        scene.add_grid(10.0, 10);
        scene
    }
}

impl Example for MaterialsExample {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut RenderCtx<'_>, pool: &mut ViewportPool) {
        let Self {
            template,
            controls,
            rigs,
        } = self;
        egui::ScrollArea::vertical().show(ui, |ui| {
            template.show(ui, &PROPS, |ui| {
                for (index, section) in SECTIONS.iter().enumerate() {
                    ui.heading(section.group);
                    ui.label(section.description);
                    controls.ui_group(ui, section.group);

                    let (camera, orbit) = &mut rigs[index];
                    let scene = Self::scene_for_section(controls, index);
                    pool.show(ui, ctx, section.id, 300.0, camera, orbit, scene);
                    ui.add_space(12.0);
                    ui.separator();
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::material::{MATERIAL_KIND_BASIC, MATERIAL_KIND_MATCAP};

    #[test]
    fn sections_cover_every_kind_once() {
        let controls = MaterialsExample::controls();
        let mut codes: Vec<i32> = (0..SECTIONS.len())
            .map(|i| MaterialsExample::material_for_section(&controls, i).kind_code() as i32)
            .collect();
        assert_eq!(codes[0] as f32, MATERIAL_KIND_BASIC);
        assert_eq!(*codes.last().unwrap() as f32, MATERIAL_KIND_MATCAP);
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), SECTIONS.len());
    }

    #[test]
    fn every_section_stages_one_sphere() {
        let controls = MaterialsExample::controls();
        for index in 0..SECTIONS.len() {
            let scene = MaterialsExample::scene_for_section(&controls, index);
            assert_eq!(scene.meshes().count(), 1);
            assert_eq!(scene.lights().count(), 3);
            let sphere = scene.meshes().next().unwrap();
            assert!(matches!(sphere.geometry, GeometryDesc::Sphere { .. }));
        }
    }

    #[test]
    fn physical_opacity_gated_by_transparent() {
        let mut controls = MaterialsExample::controls();
        controls.set_number("Physical Material.surfaceEffects.opacity", 0.3);
        controls.set_toggle("Physical Material.surfaceEffects.transparent", false);

        let opaque = MaterialsExample::material_for_section(&controls, 4);
        assert!(matches!(opaque, MaterialDesc::Physical { opacity, .. } if opacity == 1.0));

        controls.set_toggle("Physical Material.surfaceEffects.transparent", true);
        let faded = MaterialsExample::material_for_section(&controls, 4);
        assert!(matches!(faded, MaterialDesc::Physical { opacity, .. } if opacity == 0.3));
    }

    #[test]
    fn matcap_style_follows_the_select() {
        let mut controls = MaterialsExample::controls();
        controls.set_choice("Matcap Material.matcapStyle", 2);
        let material = MaterialsExample::material_for_section(&controls, 8);
        assert_eq!(material.matcap_style(), Some(MatcapStyle::Red));
    }
}
