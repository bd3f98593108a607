//! Gallery shell: example registry, sidebar and the shared page template

pub mod registry;
pub mod shell;
pub mod sidebar;
pub mod template;

pub use registry::{build_example, Example, ExampleKey};
pub use shell::{Shell, NARROW_BREAKPOINT};
pub use sidebar::{sidebar_items, sidebar_ui, SidebarItem};
pub use template::{SceneTemplate, TemplateProps, DEFAULT_SURFACE_HEIGHT};
