//! Shell state: current example and sidebar visibility
//!
//! On narrow windows the sidebar becomes an overlay toggled by a menu
//! button; selecting an example always closes it. Selecting the example
//! that is already active closes the menu without remounting.

use super::registry::ExampleKey;

/// Window width below which the sidebar overlays the content
pub const NARROW_BREAKPOINT: f32 = 700.0;

#[derive(Debug, Clone)]
pub struct Shell {
    selected: ExampleKey,
    menu_open: bool,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self {
            selected: ExampleKey::Basic,
            menu_open: false,
        }
    }

    pub fn selected(&self) -> ExampleKey {
        self.selected
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Select an example. Returns true when the selection actually changed,
    /// which is the signal to remount the example with fresh defaults.
    pub fn select(&mut self, key: ExampleKey) -> bool {
        self.menu_open = false;
        if key == self.selected {
            return false;
        }
        self.selected = key;
        true
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Force the menu closed; idempotent
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Whether the sidebar should overlay instead of docking
    pub fn is_narrow(window_width: f32) -> bool {
        window_width < NARROW_BREAKPOINT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_new_example_changes_and_closes_menu() {
        let mut shell = Shell::new();
        shell.toggle_menu();
        assert!(shell.menu_open());

        assert!(shell.select(ExampleKey::Lights));
        assert_eq!(shell.selected(), ExampleKey::Lights);
        assert!(!shell.menu_open());
    }

    #[test]
    fn toggling_twice_restores_without_touching_selection() {
        let mut shell = Shell::new();
        shell.toggle_menu();
        shell.toggle_menu();
        assert!(!shell.menu_open());
        assert_eq!(shell.selected(), ExampleKey::Basic);

        shell.close_menu();
        shell.close_menu();
        assert!(!shell.menu_open());
    }

    #[test]
    fn reselecting_current_example_closes_menu_without_change() {
        let mut shell = Shell::new();
        shell.select(ExampleKey::Materials);
        shell.toggle_menu();

        assert!(!shell.select(ExampleKey::Materials));
        assert!(!shell.menu_open());
        assert_eq!(shell.selected(), ExampleKey::Materials);
    }
}
