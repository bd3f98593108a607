//! Geometry scene: the parametric primitives on a 3x3 grid

use glam::Vec3;

use crate::controls::{ControlGroup, ControlSet};
use crate::gallery::{Example, SceneTemplate, TemplateProps, DEFAULT_SURFACE_HEIGHT};
use crate::render::{RenderCtx, ViewportPool};
use crate::scene::{
    AmbientLight, Camera, DirectionalLight, GeometryDesc, Light, MaterialDesc, MeshNode,
    OrbitController, PolyhedronKind, SceneDesc,
};

const PROPS: TemplateProps = TemplateProps {
    title: "Geometry Scene",
    description: "A tour of the parametric mesh primitives. Every shape is \
        built from vertices, edges and faces; its sliders feed the \
        tessellator directly, so segment counts and dimensions update the \
        mesh live. All shapes share one standard material driven by the \
        global settings.",
    guide: &[
        "Drag to orbit and inspect the shapes from all sides.",
        "Enable wireframe in the global settings to see each shape's triangle structure.",
        "Raise the segment sliders and watch curved surfaces become smoother.",
    ],
    code: Some(
        r#"scene.add_mesh(
    MeshNode::new(
        GeometryDesc::Torus {
            radius: controls.number("Torus Geometry.radius"),
            tube: controls.number("Torus Geometry.tube"),
            radial_segments: controls.number("Torus Geometry.radialSegments") as u32,
            tubular_segments: controls.number("Torus Geometry.tubularSegments") as u32,
        },
        material.clone(),
    )
    .at(Vec3::new(0.0, 0.0, 0.0)),
);"#,
    ),
};

pub struct GeometryExample {
    template: SceneTemplate,
    controls: ControlSet,
    camera: Camera,
    orbit: OrbitController,
}

impl Default for GeometryExample {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryExample {
    pub fn new() -> Self {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 15.0), 75.0, 1.0, 100.0);
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
            ControlGroup::new("Global Settings")
                .toggle("wireframe", false)
                .color("color", Vec3::new(0.251, 0.502, 1.0))
                .folder("material")
                .slider("metalness", 0.1, 0.0, 1.0, 0.01)
                .slider("roughness", 0.5, 0.0, 1.0, 0.01),
            ControlGroup::new("Box Geometry")
                .slider("width", 1.5, 0.1, 3.0, 0.1)
                .slider("height", 1.5, 0.1, 3.0, 0.1)
                .slider("depth", 1.5, 0.1, 3.0, 0.1)
                .slider("widthSegments", 1.0, 1.0, 10.0, 1.0)
                .slider("heightSegments", 1.0, 1.0, 10.0, 1.0)
                .slider("depthSegments", 1.0, 1.0, 10.0, 1.0),
            ControlGroup::new("Sphere Geometry")
                .slider("radius", 1.0, 0.1, 2.0, 0.1)
                .slider("widthSegments", 16.0, 3.0, 64.0, 1.0)
                .slider("heightSegments", 12.0, 2.0, 32.0, 1.0),
            ControlGroup::new("Cylinder Geometry")
                .slider("radiusTop", 1.0, 0.0, 2.0, 0.1)
                .slider("radiusBottom", 1.0, 0.0, 2.0, 0.1)
                .slider("height", 2.0, 0.1, 4.0, 0.1)
                .slider("radialSegments", 16.0, 3.0, 64.0, 1.0),
            ControlGroup::new("Cone Geometry")
                .slider("radius", 1.0, 0.1, 2.0, 0.1)
                .slider("height", 2.0, 0.1, 4.0, 0.1)
                .slider("radialSegments", 16.0, 3.0, 64.0, 1.0),
            ControlGroup::new("Torus Geometry")
                .slider("radius", 1.0, 0.1, 2.0, 0.1)
                .slider("tube", 0.4, 0.1, 1.0, 0.05)
                .slider("radialSegments", 16.0, 3.0, 64.0, 1.0)
                .slider("tubularSegments", 32.0, 3.0, 100.0, 1.0),
            ControlGroup::new("Torus Knot Geometry")
                .slider("radius", 1.0, 0.1, 2.0, 0.1)
                .slider("tube", 0.4, 0.1, 1.0, 0.05)
                .slider("tubularSegments", 64.0, 3.0, 100.0, 1.0)
                .slider("radialSegments", 8.0, 3.0, 32.0, 1.0)
                .slider("p", 2.0, 1.0, 5.0, 1.0)
                .slider("q", 3.0, 1.0, 5.0, 1.0),
            ControlGroup::new("Regular Polyhedrons")
                .select(
                    "type",
                    &["dodecahedron", "icosahedron", "octahedron", "tetrahedron"],
                    0,
                )
                .slider("radius", 1.0, 0.1, 2.0, 0.1)
                .slider("detail", 0.0, 0.0, 3.0, 1.0),
            ControlGroup::new("Plane Geometry")
                .slider("width", 2.0, 0.1, 5.0, 0.1)
                .slider("height", 2.0, 0.1, 5.0, 0.1)
                .slider("widthSegments", 1.0, 1.0, 20.0, 1.0)
                .slider("heightSegments", 1.0, 1.0, 20.0, 1.0),
            ControlGroup::new("Ring Geometry")
                .slider("innerRadius", 0.5, 0.0, 1.5, 0.05)
                .slider("outerRadius", 1.0, 0.1, 2.0, 0.1)
                .slider("thetaSegments", 32.0, 3.0, 64.0, 1.0),
        ])
    }

    /// Shapes in grid order: three columns at x in {-6, 0, 6}, three rows
    /// at y in {4, 0, -4}
    pub fn scene(controls: &ControlSet) -> SceneDesc {
        let mut scene = SceneDesc::new(Camera::perspective(
            Vec3::new(0.0, 0.0, 15.0),
            75.0,
            1.0,
            100.0,
        ));

        scene.add_light(Light::Ambient(AmbientLight {
            color: Vec3::ONE,
            intensity: 0.5,
        }));
        scene.add_light(Light::Directional(DirectionalLight {
            position: Vec3::new(10.0, 10.0, 5.0),
            color: Vec3::ONE,
            intensity: 1.0,
            cast_shadow: true,
            gizmo: false,
        }));

        let material = MaterialDesc::Standard {
            color: controls.color("Global Settings.color"),
            roughness: controls.number("Global Settings.material.roughness"),
            metalness: controls.number("Global Settings.material.metalness"),
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            opacity: 1.0,
            wireframe: controls.toggle("Global Settings.wireframe"),
        };

        let polyhedron_kind = PolyhedronKind::ALL[controls.choice("Regular Polyhedrons.type")];

        let shapes: [(Vec3, GeometryDesc); 9] = [
            (
                Vec3::new(-6.0, 4.0, 0.0),
                GeometryDesc::Box {
                    width: controls.number("Box Geometry.width"),
                    height: controls.number("Box Geometry.height"),
                    depth: controls.number("Box Geometry.depth"),
                    width_segments: controls.number("Box Geometry.widthSegments") as u32,
                    height_segments: controls.number("Box Geometry.heightSegments") as u32,
                    depth_segments: controls.number("Box Geometry.depthSegments") as u32,
                },
            ),
            (
                Vec3::new(0.0, 4.0, 0.0),
                GeometryDesc::Sphere {
                    radius: controls.number("Sphere Geometry.radius"),
                    width_segments: controls.number("Sphere Geometry.widthSegments") as u32,
                    height_segments: controls.number("Sphere Geometry.heightSegments") as u32,
                },
            ),
            (
                Vec3::new(6.0, 4.0, 0.0),
                GeometryDesc::Cylinder {
                    radius_top: controls.number("Cylinder Geometry.radiusTop"),
                    radius_bottom: controls.number("Cylinder Geometry.radiusBottom"),
                    height: controls.number("Cylinder Geometry.height"),
                    radial_segments: controls.number("Cylinder Geometry.radialSegments") as u32,
                },
            ),
            (
                Vec3::new(-6.0, 0.0, 0.0),
                GeometryDesc::Cone {
                    radius: controls.number("Cone Geometry.radius"),
                    height: controls.number("Cone Geometry.height"),
                    radial_segments: controls.number("Cone Geometry.radialSegments") as u32,
                },
            ),
            (
                Vec3::new(0.0, 0.0, 0.0),
                GeometryDesc::Torus {
                    radius: controls.number("Torus Geometry.radius"),
                    tube: controls.number("Torus Geometry.tube"),
                    radial_segments: controls.number("Torus Geometry.radialSegments") as u32,
                    tubular_segments: controls.number("Torus Geometry.tubularSegments") as u32,
                },
            ),
            (
                Vec3::new(6.0, 0.0, 0.0),
                GeometryDesc::TorusKnot {
                    radius: controls.number("Torus Knot Geometry.radius"),
                    tube: controls.number("Torus Knot Geometry.tube"),
                    tubular_segments: controls.number("Torus Knot Geometry.tubularSegments")
                        as u32,
                    radial_segments: controls.number("Torus Knot Geometry.radialSegments") as u32,
                    p: controls.number("Torus Knot Geometry.p") as u32,
                    q: controls.number("Torus Knot Geometry.q") as u32,
                },
            ),
            (
                Vec3::new(-6.0, -4.0, 0.0),
                GeometryDesc::Polyhedron {
                    kind: polyhedron_kind,
                    radius: controls.number("Regular Polyhedrons.radius"),
                    detail: controls.number("Regular Polyhedrons.detail") as u32,
                },
            ),
            (
                Vec3::new(0.0, -4.0, 0.0),
                GeometryDesc::Plane {
                    width: controls.number("Plane Geometry.width"),
                    height: controls.number("Plane Geometry.height"),
                    width_segments: controls.number("Plane Geometry.widthSegments") as u32,
                    height_segments: controls.number("Plane Geometry.heightSegments") as u32,
                },
            ),
            (
                Vec3::new(6.0, -4.0, 0.0),
                GeometryDesc::Ring {
                    inner_radius: controls.number("Ring Geometry.innerRadius"),
                    outer_radius: controls.number("Ring Geometry.outerRadius"),
                    theta_segments: controls.number("Ring Geometry.thetaSegments") as u32,
                },
            ),
        ];

        for (position, geometry) in shapes {
            scene.add_mesh(MeshNode::new(geometry, material.clone()).at(position));
        }
        scene
    }
}

impl Example for GeometryExample {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut RenderCtx<'_>, pool: &mut ViewportPool) {
        egui::SidePanel::right("geometry_controls")
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
                        "geometry",
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
    fn nine_shapes_on_the_grid() {
        let controls = GeometryExample::controls();
        let scene = GeometryExample::scene(&controls);
        assert_eq!(scene.meshes().count(), 9);

        let positions: Vec<Vec3> = scene.meshes().map(|m| m.transform.position).collect();
        for x in [-6.0, 0.0, 6.0] {
            for y in [4.0, 0.0, -4.0] {
                assert!(positions.contains(&Vec3::new(x, y, 0.0)), "({x}, {y})");
            }
        }
    }

    #[test]
    fn global_settings_drive_every_material() {
        let mut controls = GeometryExample::controls();
        controls.set_toggle("Global Settings.wireframe", true);
        controls.set_number("Global Settings.material.metalness", 0.9);

        let scene = GeometryExample::scene(&controls);
        for mesh in scene.meshes() {
            assert!(mesh.material.wireframe());
            match &mesh.material {
                MaterialDesc::Standard { metalness, .. } => assert_eq!(*metalness, 0.9),
                other => panic!("unexpected material: {other:?}"),
            }
        }
    }

    #[test]
    fn polyhedron_select_swaps_the_kind() {
        let mut controls = GeometryExample::controls();
        controls.set_choice("Regular Polyhedrons.type", 3);

        let scene = GeometryExample::scene(&controls);
        let kinds: Vec<_> = scene
            .meshes()
            .filter_map(|m| match m.geometry {
                GeometryDesc::Polyhedron { kind, .. } => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![PolyhedronKind::Tetrahedron]);
    }

    #[test]
    fn segment_sliders_snap_to_integers() {
        let mut controls = GeometryExample::controls();
        controls.set_number("Sphere Geometry.widthSegments", 16.7);
        assert_eq!(controls.number("Sphere Geometry.widthSegments"), 17.0);
    }
}
