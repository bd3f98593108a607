//! Live parameter controls
//!
//! Each example declares its controls once as a set of groups; the values
//! live in a flat map keyed by `group.folder.name` paths. Setters enforce
//! the declared ranges (clamping and step snapping), so a control can never
//! hold a value outside its schema. Remounting an example rebuilds the set,
//! which is what resets everything to defaults.

mod panel;

use std::collections::HashMap;

use glam::Vec3;

/// Schema of a single control
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Slider {
        default: f32,
        min: f32,
        max: f32,
        step: f32,
    },
    Toggle {
        default: bool,
    },
    Color {
        default: Vec3,
    },
    Select {
        default: usize,
        options: Vec<String>,
    },
}

impl ControlKind {
    fn default_value(&self) -> ControlValue {
        match self {
            ControlKind::Slider { default, .. } => ControlValue::Number(*default),
            ControlKind::Toggle { default } => ControlValue::Toggle(*default),
            ControlKind::Color { default } => ControlValue::Color(*default),
            ControlKind::Select { default, .. } => ControlValue::Choice(*default),
        }
    }
}

/// Current value of a control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Number(f32),
    Toggle(bool),
    Color(Vec3),
    Choice(usize),
}

#[derive(Debug, Clone)]
pub struct ControlSpec {
    pub name: String,
    pub folder: Option<String>,
    pub kind: ControlKind,
}

/// A titled group of controls, rendered as one collapsible section
#[derive(Debug, Clone)]
pub struct ControlGroup {
    pub title: String,
    pub collapsed: bool,
    pub specs: Vec<ControlSpec>,
    current_folder: Option<String>,
}

impl ControlGroup {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            collapsed: false,
            specs: Vec::new(),
            current_folder: None,
        }
    }

    /// Start the group collapsed in the panel
    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }

    /// Subsequent controls go into a named sub-folder
    pub fn folder(mut self, name: &str) -> Self {
        self.current_folder = Some(name.to_string());
        self
    }

    /// Back to the group's top level
    pub fn end_folder(mut self) -> Self {
        self.current_folder = None;
        self
    }

    fn push(mut self, name: &str, kind: ControlKind) -> Self {
        self.specs.push(ControlSpec {
            name: name.to_string(),
            folder: self.current_folder.clone(),
            kind,
        });
        self
    }

    pub fn slider(self, name: &str, default: f32, min: f32, max: f32, step: f32) -> Self {
        self.push(
            name,
            ControlKind::Slider {
                default,
                min,
                max,
                step,
            },
        )
    }

    pub fn toggle(self, name: &str, default: bool) -> Self {
        self.push(name, ControlKind::Toggle { default })
    }

    pub fn color(self, name: &str, default: Vec3) -> Self {
        self.push(name, ControlKind::Color { default })
    }

    pub fn select(self, name: &str, options: &[&str], default: usize) -> Self {
        self.push(
            name,
            ControlKind::Select {
                default,
                options: options.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    fn path(&self, spec: &ControlSpec) -> String {
        match &spec.folder {
            Some(folder) => format!("{}.{}.{}", self.title, folder, spec.name),
            None => format!("{}.{}", self.title, spec.name),
        }
    }
}

/// All control groups of one example plus their current values
#[derive(Debug, Clone)]
pub struct ControlSet {
    groups: Vec<ControlGroup>,
    schema: HashMap<String, ControlKind>,
    values: HashMap<String, ControlValue>,
}

impl ControlSet {
    pub fn new(groups: Vec<ControlGroup>) -> Self {
        let mut schema = HashMap::new();
        let mut values = HashMap::new();
        for group in &groups {
            for spec in &group.specs {
                let path = group.path(spec);
                debug_assert!(
                    !schema.contains_key(&path),
                    "duplicate control path: {path}"
                );
                values.insert(path.clone(), spec.kind.default_value());
                schema.insert(path, spec.kind.clone());
            }
        }
        Self {
            groups,
            schema,
            values,
        }
    }

    /// Restore every control to its declared default
    pub fn reset(&mut self) {
        for (path, kind) in &self.schema {
            self.values.insert(path.clone(), kind.default_value());
        }
    }

    fn kind(&self, path: &str) -> &ControlKind {
        self.schema
            .get(path)
            .unwrap_or_else(|| panic!("unknown control: {path}"))
    }

    fn value(&self, path: &str) -> ControlValue {
        *self
            .values
            .get(path)
            .unwrap_or_else(|| panic!("unknown control: {path}"))
    }

    pub fn number(&self, path: &str) -> f32 {
        match self.value(path) {
            ControlValue::Number(v) => v,
            other => panic!("control {path} is not a slider: {other:?}"),
        }
    }

    pub fn toggle(&self, path: &str) -> bool {
        match self.value(path) {
            ControlValue::Toggle(v) => v,
            other => panic!("control {path} is not a toggle: {other:?}"),
        }
    }

    pub fn color(&self, path: &str) -> Vec3 {
        match self.value(path) {
            ControlValue::Color(v) => v,
            other => panic!("control {path} is not a color: {other:?}"),
        }
    }

    pub fn choice(&self, path: &str) -> usize {
        match self.value(path) {
            ControlValue::Choice(v) => v,
            other => panic!("control {path} is not a select: {other:?}"),
        }
    }

    /// Set a slider, clamping to its range and snapping to its step
    pub fn set_number(&mut self, path: &str, value: f32) {
        let snapped = match *self.kind(path) {
            ControlKind::Slider {
                min, max, step, ..
            } => {
                let clamped = value.clamp(min, max);
                if step > 0.0 {
                    (((clamped - min) / step).round() * step + min).clamp(min, max)
                } else {
                    clamped
                }
            }
            _ => panic!("control {path} is not a slider"),
        };
        self.values
            .insert(path.to_string(), ControlValue::Number(snapped));
    }

    pub fn set_toggle(&mut self, path: &str, value: bool) {
        match self.kind(path) {
            ControlKind::Toggle { .. } => {}
            _ => panic!("control {path} is not a toggle"),
        }
        self.values
            .insert(path.to_string(), ControlValue::Toggle(value));
    }

    pub fn set_color(&mut self, path: &str, value: Vec3) {
        match self.kind(path) {
            ControlKind::Color { .. } => {}
            _ => panic!("control {path} is not a color"),
        }
        let clamped = value.clamp(Vec3::ZERO, Vec3::ONE);
        self.values
            .insert(path.to_string(), ControlValue::Color(clamped));
    }

    /// Set a select by option index; out-of-range indices are ignored
    pub fn set_choice(&mut self, path: &str, index: usize) {
        let valid = match self.kind(path) {
            ControlKind::Select { options, .. } => index < options.len(),
            _ => panic!("control {path} is not a select"),
        };
        if valid {
            self.values
                .insert(path.to_string(), ControlValue::Choice(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ControlSet {
        ControlSet::new(vec![
            ControlGroup::new("Light")
                .toggle("visible", true)
                .slider("intensity", 0.5, 0.0, 2.0, 0.1)
                .color("color", Vec3::new(1.0, 0.0, 0.0)),
            ControlGroup::new("Material")
                .select("style", &["gold", "silver", "red", "blue"], 0)
                .folder("emissive")
                .color("color", Vec3::ZERO)
                .slider("intensity", 1.0, 0.0, 2.0, 0.1),
        ])
    }

    #[test]
    fn defaults_populate_values() {
        let set = sample_set();
        assert!(set.toggle("Light.visible"));
        assert_eq!(set.number("Light.intensity"), 0.5);
        assert_eq!(set.color("Material.emissive.color"), Vec3::ZERO);
        assert_eq!(set.choice("Material.style"), 0);
    }

    #[test]
    fn set_number_clamps_and_snaps() {
        let mut set = sample_set();
        set.set_number("Light.intensity", 5.0);
        assert_eq!(set.number("Light.intensity"), 2.0);
        set.set_number("Light.intensity", 0.44);
        assert!((set.number("Light.intensity") - 0.4).abs() < 1e-6);
        set.set_number("Light.intensity", -1.0);
        assert_eq!(set.number("Light.intensity"), 0.0);
    }

    #[test]
    fn out_of_range_choice_is_ignored() {
        let mut set = sample_set();
        set.set_choice("Material.style", 2);
        assert_eq!(set.choice("Material.style"), 2);
        set.set_choice("Material.style", 99);
        assert_eq!(set.choice("Material.style"), 2);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut set = sample_set();
        set.set_toggle("Light.visible", false);
        set.set_number("Light.intensity", 2.0);
        set.set_color("Light.color", Vec3::ONE);
        set.reset();
        assert!(set.toggle("Light.visible"));
        assert_eq!(set.number("Light.intensity"), 0.5);
        assert_eq!(set.color("Light.color"), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "unknown control")]
    fn unknown_path_panics() {
        sample_set().number("Light.missing");
    }

    #[test]
    #[should_panic(expected = "is not a slider")]
    fn kind_mismatch_panics() {
        sample_set().number("Light.visible");
    }
}
