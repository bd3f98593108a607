//! Scene page template
//!
//! Every example page shares the same frame: title, description, an
//! operation guide, an optional code listing behind a toggle, and the
//! render surface(s) supplied by the example.

/// Render surface height used by the single-viewport pages
pub const DEFAULT_SURFACE_HEIGHT: f32 = 420.0;

/// Static content of one example page
#[derive(Debug, Clone, Copy)]
pub struct TemplateProps {
    pub title: &'static str,
    pub description: &'static str,
    /// Short interaction hints shown as a bullet list
    pub guide: &'static [&'static str],
    /// Source listing shown behind the code toggle, when present
    pub code: Option<&'static str>,
}

/// Per-page UI state for the template frame
#[derive(Debug, Default)]
pub struct SceneTemplate {
    show_code: bool,
}

impl SceneTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code_visible(&self) -> bool {
        self.show_code
    }

    fn toggle_code(&mut self) {
        self.show_code = !self.show_code;
    }

    /// Draw the page frame, calling `content` where the example's own
    /// controls and render surfaces go.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        props: &TemplateProps,
        content: impl FnOnce(&mut egui::Ui),
    ) {
        ui.heading(props.title);
        ui.label(props.description);

        if !props.guide.is_empty() {
            ui.add_space(4.0);
            for line in props.guide {
                ui.label(format!("• {line}"));
            }
        }

        // The toggle only exists when the page carries a listing
        if let Some(code) = props.code {
            ui.add_space(4.0);
            let label = if self.show_code { "Hide code" } else { "Show code" };
            if ui.button(label).clicked() {
                self.toggle_code();
            }
            if self.show_code {
                egui::ScrollArea::vertical()
                    .max_height(240.0)
                    .show(ui, |ui| {
                        ui.code(code);
                    });
            }
        }

        ui.separator();
        content(ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROPS: TemplateProps = TemplateProps {
        title: "Test Page",
        description: "A page for exercising the template frame.",
        guide: &["First hint."],
        code: Some("let answer = 42;"),
    };

    fn collect_text(shape: &egui::epaint::Shape, out: &mut String) {
        match shape {
            egui::epaint::Shape::Text(text) => {
                out.push_str(text.galley.text());
                out.push('\n');
            }
            egui::epaint::Shape::Vec(shapes) => {
                for inner in shapes {
                    collect_text(inner, out);
                }
            }
            _ => {}
        }
    }

    /// Render one frame of the template headlessly and return every text
    /// run that reached the paint list
    fn page_text(template: &mut SceneTemplate, props: &TemplateProps) -> String {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                template.show(ui, props, |_| {});
            });
        });
        let mut text = String::new();
        for clipped in &output.shapes {
            collect_text(&clipped.shape, &mut text);
        }
        text
    }

    #[test]
    fn code_starts_hidden() {
        let template = SceneTemplate::new();
        assert!(!template.code_visible());
    }

    #[test]
    fn toggle_rendered_only_when_a_listing_exists() {
        let mut template = SceneTemplate::new();
        let with_code = page_text(&mut template, &PROPS);
        assert!(with_code.contains("Show code"));
        assert!(!with_code.contains("let answer = 42;"));

        let mut template = SceneTemplate::new();
        let without_code = page_text(&mut template, &TemplateProps { code: None, ..PROPS });
        assert!(!without_code.contains("Show code"));
        assert!(!without_code.contains("Hide code"));
        assert!(without_code.contains("Test Page"));
    }

    #[test]
    fn toggling_flips_only_the_listing() {
        let mut template = SceneTemplate::new();
        template.toggle_code();
        assert!(template.code_visible());

        let open = page_text(&mut template, &PROPS);
        assert!(open.contains("Hide code"));
        assert!(open.contains("let answer = 42;"));
        assert!(open.contains("Test Page"));
        assert!(open.contains("First hint."));

        template.toggle_code();
        assert!(!template.code_visible());
        let closed = page_text(&mut template, &PROPS);
        assert!(closed.contains("Show code"));
        assert!(!closed.contains("let answer = 42;"));
    }
}
