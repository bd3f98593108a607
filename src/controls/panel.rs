//! egui rendering of a control set

use super::{ControlGroup, ControlKind, ControlSet, ControlSpec, ControlValue};

impl ControlSet {
    /// Draw every group as a collapsible section and write edits back into
    /// the value map. Widgets carry the schema's ranges, so edited values
    /// stay inside them.
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let groups = &self.groups;
        let values = &mut self.values;
        for group in groups {
            group_ui(ui, group, values);
        }
    }

    /// Draw a single group by title, for pages that interleave control
    /// sections with other content
    pub fn ui_group(&mut self, ui: &mut egui::Ui, title: &str) {
        let values = &mut self.values;
        if let Some(group) = self.groups.iter().find(|g| g.title == title) {
            group_ui(ui, group, values);
        }
    }
}

fn group_ui(
    ui: &mut egui::Ui,
    group: &ControlGroup,
    values: &mut std::collections::HashMap<String, ControlValue>,
) {
    egui::CollapsingHeader::new(&group.title)
        .default_open(!group.collapsed)
        .show(ui, |ui| {
            let mut i = 0;
            while i < group.specs.len() {
                let spec = &group.specs[i];
                match &spec.folder {
                    None => {
                        let path = group.path(spec);
                        if let Some(value) = values.get_mut(&path) {
                            control_widget(ui, &path, spec, value);
                        }
                        i += 1;
                    }
                    Some(folder) => {
                        // Consecutive specs of the same folder become one
                        // nested section
                        let start = i;
                        while i < group.specs.len()
                            && group.specs[i].folder.as_deref() == Some(folder)
                        {
                            i += 1;
                        }
                        egui::CollapsingHeader::new(folder)
                            .id_source(format!("{}.{}", group.title, folder))
                            .default_open(true)
                            .show(ui, |ui| {
                                for spec in &group.specs[start..i] {
                                    let path = group.path(spec);
                                    if let Some(value) = values.get_mut(&path) {
                                        control_widget(ui, &path, spec, value);
                                    }
                                }
                            });
                    }
                }
            }
        });
}

fn control_widget(ui: &mut egui::Ui, path: &str, spec: &ControlSpec, value: &mut ControlValue) {
    match (&spec.kind, value) {
        (ControlKind::Slider { min, max, step, .. }, ControlValue::Number(v)) => {
            ui.horizontal(|ui| {
                ui.label(&spec.name);
                ui.add(
                    egui::Slider::new(v, *min..=*max)
                        .step_by(*step as f64)
                        .clamp_to_range(true),
                );
            });
        }
        (ControlKind::Toggle { .. }, ControlValue::Toggle(v)) => {
            ui.checkbox(v, &spec.name);
        }
        (ControlKind::Color { .. }, ControlValue::Color(v)) => {
            ui.horizontal(|ui| {
                ui.label(&spec.name);
                let mut rgb = [v.x, v.y, v.z];
                if ui.color_edit_button_rgb(&mut rgb).changed() {
                    *v = glam::Vec3::from(rgb);
                }
            });
        }
        (ControlKind::Select { options, .. }, ControlValue::Choice(index)) => {
            ui.horizontal(|ui| {
                ui.label(&spec.name);
                egui::ComboBox::from_id_source(path)
                    .selected_text(options.get(*index).map(String::as_str).unwrap_or(""))
                    .show_ui(ui, |ui| {
                        for (i, option) in options.iter().enumerate() {
                            ui.selectable_value(index, i, option);
                        }
                    });
            });
        }
        _ => {}
    }
}
