//! Interactive gallery of 3D graphics examples
//!
//! The gallery shows a set of educational scenes covering cameras,
//! geometries, lights and materials. Each example declares its parameters as
//! a control schema and rebuilds a declarative scene description from the
//! current values every frame; a wgpu renderer draws the scenes into
//! offscreen targets that are embedded in the egui-based UI.

pub mod app;
pub mod controls;
pub mod egui_integration;
pub mod gallery;
pub mod render;
pub mod scene;
pub mod scenes;
