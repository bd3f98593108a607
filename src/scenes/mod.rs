//! The gallery's example pages
//!
//! Each example owns its control set, per-surface cameras and page state,
//! and exposes a pure scene builder that maps current control values to a
//! scene description. The builders have no GPU or UI dependencies, which is
//! what the scene-content tests rely on.

mod basic;
mod geometry;
mod lights;
mod materials;

pub use basic::BasicExample;
pub use geometry::GeometryExample;
pub use lights::LightsExample;
pub use materials::MaterialsExample;
