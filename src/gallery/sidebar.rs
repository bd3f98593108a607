//! Sidebar: the example switcher
//!
//! The item list is a pure projection of the registry plus the current
//! selection, so it can be tested without a UI context.

use super::registry::ExampleKey;
use super::shell::Shell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub key: ExampleKey,
    pub label: &'static str,
    pub selected: bool,
}

/// Items in registry order with the current selection marked
pub fn sidebar_items(selected: ExampleKey) -> Vec<SidebarItem> {
    ExampleKey::ALL
        .iter()
        .map(|&key| SidebarItem {
            key,
            label: key.label(),
            selected: key == selected,
        })
        .collect()
}

/// Draw the sidebar contents; returns the clicked example, if any
pub fn sidebar_ui(ui: &mut egui::Ui, shell: &Shell) -> Option<ExampleKey> {
    let mut clicked = None;

    ui.heading("3D Examples");
    ui.separator();

    for item in sidebar_items(shell.selected()) {
        if ui.selectable_label(item.selected, item.label).clicked() {
            clicked = Some(item.key);
        }
    }

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_follow_registry_order() {
        let items = sidebar_items(ExampleKey::Geometry);
        let keys: Vec<_> = items.iter().map(|i| i.key).collect();
        assert_eq!(keys, ExampleKey::ALL.to_vec());
    }

    #[test]
    fn exactly_one_item_is_selected() {
        for key in ExampleKey::ALL {
            let items = sidebar_items(key);
            assert_eq!(items.iter().filter(|i| i.selected).count(), 1);
            assert!(items.iter().find(|i| i.selected).is_some_and(|i| i.key == key));
        }
    }
}
