//! Example registry
//!
//! Every example the gallery can show is listed here under a typed key, so
//! an unknown selection is unrepresentable. The sidebar and the shell both
//! derive their contents from this table.

use crate::render::{RenderCtx, ViewportPool};

/// Identity of an example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExampleKey {
    Basic,
    Geometry,
    Lights,
    Materials,
}

impl ExampleKey {
    pub const ALL: [ExampleKey; 4] = [
        ExampleKey::Basic,
        ExampleKey::Geometry,
        ExampleKey::Lights,
        ExampleKey::Materials,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExampleKey::Basic => "Basic Scene",
            ExampleKey::Geometry => "Geometry",
            ExampleKey::Lights => "Lights",
            ExampleKey::Materials => "Materials",
        }
    }
}

/// A running example: builds its UI and queues its render surfaces
pub trait Example {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut RenderCtx<'_>, pool: &mut ViewportPool);
}

/// Instantiate the example behind a key with fresh control defaults
pub fn build_example(key: ExampleKey) -> Box<dyn Example> {
    match key {
        ExampleKey::Basic => Box::new(crate::scenes::BasicExample::new()),
        ExampleKey::Geometry => Box::new(crate::scenes::GeometryExample::new()),
        ExampleKey::Lights => Box::new(crate::scenes::LightsExample::new()),
        ExampleKey::Materials => Box::new(crate::scenes::MaterialsExample::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = ExampleKey::ALL.iter().map(|k| k.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), ExampleKey::ALL.len());
    }
}
