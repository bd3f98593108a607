//! Scene descriptions and tessellation, exercised through the example
//! builders without a GPU

use glam::Vec3;

use graphics_gallery::render::Mesh;
use graphics_gallery::scene::{GeometryDesc, Light, MaterialDesc, SceneNode};
use graphics_gallery::scenes::{BasicExample, GeometryExample, LightsExample, MaterialsExample};

// ------------------------------------------------------------ tessellation

#[test]
fn every_geometry_in_the_gallery_tessellates() {
    let controls = GeometryExample::controls();
    let scene = GeometryExample::scene(&controls);

    for node in scene.meshes() {
        let mesh = Mesh::from_desc(&node.geometry);
        assert!(mesh.vertex_count() > 0, "{}", mesh.name);
        assert!(mesh.index_count() % 3 == 0, "{}", mesh.name);
        for vertex in &mesh.vertices {
            assert!(
                (vertex.normal.length() - 1.0).abs() < 1e-3,
                "{} has an unnormalized normal",
                mesh.name
            );
        }
    }
}

#[test]
fn segment_controls_change_the_tessellation() {
    let mut controls = GeometryExample::controls();
    let coarse = GeometryExample::scene(&controls);
    controls.set_number("Sphere Geometry.widthSegments", 64.0);
    let fine = GeometryExample::scene(&controls);

    let vertex_count = |scene: &graphics_gallery::scene::SceneDesc| {
        scene
            .meshes()
            .find_map(|m| match m.geometry {
                GeometryDesc::Sphere { .. } => Some(Mesh::from_desc(&m.geometry).vertex_count()),
                _ => None,
            })
            .unwrap()
    };
    assert!(vertex_count(&fine) > vertex_count(&coarse));
}

#[test]
fn flat_shapes_render_double_sided() {
    assert!(GeometryDesc::Plane {
        width: 2.0,
        height: 2.0,
        width_segments: 1,
        height_segments: 1,
    }
    .double_sided());
    assert!(GeometryDesc::Ring {
        inner_radius: 0.5,
        outer_radius: 1.0,
        theta_segments: 32,
    }
    .double_sided());
    assert!(!GeometryDesc::cube(1.0).double_sided());
}

// ------------------------------------------------------------- scene trees

#[test]
fn basic_scene_carries_its_helpers() {
    let scene = BasicExample::scene();
    let grids = scene
        .nodes
        .iter()
        .filter(|n| matches!(n, SceneNode::Grid { .. }))
        .count();
    let axes = scene
        .nodes
        .iter()
        .filter(|n| matches!(n, SceneNode::Axes { .. }))
        .count();
    assert_eq!(grids, 1);
    assert_eq!(axes, 1);
}

#[test]
fn hidden_lights_disappear_from_the_description() {
    let mut controls = LightsExample::controls();
    for group in [
        "Ambient Light",
        "Directional Light",
        "Point Light",
        "Spot Light",
    ] {
        controls.set_toggle(&format!("{group}.visible"), false);
    }

    let scene = LightsExample::scene(&controls);
    assert_eq!(scene.lights().count(), 0);
    assert_eq!(scene.gpu_lights().len(), 0);
    assert_eq!(scene.ambient(), Vec3::ZERO);
    // The subjects stay; only the lighting changes
    assert_eq!(scene.meshes().count(), 3);
}

#[test]
fn light_gizmos_follow_the_visible_lights() {
    let controls = LightsExample::controls();
    let scene = LightsExample::scene(&controls);

    // Every non-ambient light in this scene requests its helper
    for light in scene.lights() {
        match light {
            Light::Ambient(_) => assert!(!light.wants_gizmo()),
            _ => assert!(light.wants_gizmo()),
        }
    }
}

#[test]
fn light_positions_flow_from_the_sliders() {
    let mut controls = LightsExample::controls();
    controls.set_number("Directional Light.x", 7.0);
    controls.set_number("Directional Light.y", -2.0);

    let scene = LightsExample::scene(&controls);
    let directional = scene
        .lights()
        .find_map(|l| match l {
            Light::Directional(d) => Some(d),
            _ => None,
        })
        .unwrap();
    assert_eq!(directional.position, Vec3::new(7.0, -2.0, 0.0));
    // Directional lights always aim at the origin
    let expected = (-directional.position).normalize();
    assert!((directional.direction() - expected).length() < 1e-6);
}

// -------------------------------------------------------------- materials

#[test]
fn material_sections_map_to_distinct_kinds() {
    let controls = MaterialsExample::controls();
    let mut codes: Vec<i32> = (0..9)
        .map(|i| MaterialsExample::material_for_section(&controls, i).kind_code() as i32)
        .collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 9);
}

#[test]
fn transmission_and_opacity_drive_transparency() {
    let mut controls = MaterialsExample::controls();
    // Default physical material transmits, so it blends
    assert!(MaterialsExample::material_for_section(&controls, 4).transparent());

    controls.set_number("Physical Material.physicalProps.transmission", 0.0);
    controls.set_toggle("Physical Material.surfaceEffects.transparent", false);
    assert!(!MaterialsExample::material_for_section(&controls, 4).transparent());

    controls.set_number("Basic Material.opacity", 0.5);
    assert!(MaterialsExample::material_for_section(&controls, 0).transparent());
}

#[test]
fn geometry_scene_shares_one_material() {
    let mut controls = GeometryExample::controls();
    controls.set_number("Global Settings.material.roughness", 0.25);

    let scene = GeometryExample::scene(&controls);
    let mut materials = scene.meshes().map(|m| &m.material);
    let first = materials.next().unwrap();
    assert!(materials.all(|m| m == first));
    assert!(matches!(
        first,
        MaterialDesc::Standard { roughness, .. } if *roughness == 0.25
    ));
}
