//! Gallery shell behavior: registry, sidebar and selection semantics

use graphics_gallery::controls::ControlSet;
use graphics_gallery::gallery::{build_example, sidebar_items, ExampleKey, Shell};
use graphics_gallery::scenes::{GeometryExample, LightsExample, MaterialsExample};

// ---------------------------------------------------------------- registry

#[test]
fn every_registered_example_constructs() {
    for key in ExampleKey::ALL {
        // Construction must not touch the GPU; it only builds schemas and
        // camera rigs
        let _example = build_example(key);
    }
}

#[test]
fn sidebar_tracks_the_shell_selection() {
    let mut shell = Shell::new();
    shell.select(ExampleKey::Materials);

    let items = sidebar_items(shell.selected());
    assert_eq!(items.len(), ExampleKey::ALL.len());
    let selected: Vec<_> = items.iter().filter(|i| i.selected).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].key, ExampleKey::Materials);
    assert_eq!(selected[0].label, "Materials");
}

// --------------------------------------------------------------- selection

#[test]
fn switching_examples_signals_a_remount() {
    let mut shell = Shell::new();
    assert_eq!(shell.selected(), ExampleKey::Basic);

    // A changed selection asks for a fresh example instance
    assert!(shell.select(ExampleKey::Geometry));
    // Reselecting the current example must not reset its state
    assert!(!shell.select(ExampleKey::Geometry));
}

#[test]
fn narrow_windows_use_the_overlay_menu() {
    assert!(Shell::is_narrow(400.0));
    assert!(!Shell::is_narrow(1280.0));

    let mut shell = Shell::new();
    shell.toggle_menu();
    assert!(shell.menu_open());
    shell.select(ExampleKey::Lights);
    assert!(!shell.menu_open());
}

// ---------------------------------------------------------------- controls

#[test]
fn remounting_is_equivalent_to_reset() {
    let mut edited = GeometryExample::controls();
    edited.set_number("Sphere Geometry.radius", 2.0);
    edited.set_toggle("Global Settings.wireframe", true);
    edited.reset();

    let fresh = GeometryExample::controls();
    assert_eq!(
        edited.number("Sphere Geometry.radius"),
        fresh.number("Sphere Geometry.radius")
    );
    assert_eq!(
        edited.toggle("Global Settings.wireframe"),
        fresh.toggle("Global Settings.wireframe")
    );
}

#[test]
fn control_edits_stay_inside_the_schema() {
    let mut controls = LightsExample::controls();
    controls.set_number("Spot Light.intensity", 100.0);
    assert_eq!(controls.number("Spot Light.intensity"), 5.0);

    controls.set_number("Directional Light.x", -99.0);
    assert_eq!(controls.number("Directional Light.x"), -10.0);

    // Position sliders snap to their half-unit step
    controls.set_number("Point Light.y", 1.24);
    assert_eq!(controls.number("Point Light.y"), 1.0);
}

#[test]
fn select_controls_reject_unknown_options() {
    let mut controls = MaterialsExample::controls();
    controls.set_choice("Matcap Material.matcapStyle", 1);
    controls.set_choice("Matcap Material.matcapStyle", 42);
    assert_eq!(controls.choice("Matcap Material.matcapStyle"), 1);
}

#[test]
#[should_panic(expected = "unknown control")]
fn reading_a_missing_control_fails_fast() {
    let controls: ControlSet = GeometryExample::controls();
    controls.number("Box Geometry.bogus");
}
