//! Matcap texture generation and loading
//!
//! Matcap captures are generated procedurally on background threads the
//! first time a style is requested. Until the image is ready the renderer
//! binds a small neutral fallback, so a matcap material never blocks a
//! frame.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;
use image::RgbaImage;
use parking_lot::Mutex;

use crate::scene::MatcapStyle;

const MATCAP_SIZE: u32 = 256;

#[derive(Debug)]
enum MatcapState {
    Generating,
    Ready(RgbaImage),
    Uploaded,
}

/// Shared cache of generated matcap images
#[derive(Clone)]
pub struct MatcapLoader {
    cache: Arc<Mutex<HashMap<MatcapStyle, MatcapState>>>,
}

impl Default for MatcapLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcapLoader {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Kick off generation for a style if it has not been requested yet.
    /// Fire-and-forget: the result is picked up later via [`take_ready`].
    ///
    /// [`take_ready`]: MatcapLoader::take_ready
    pub fn request(&self, style: MatcapStyle) {
        let mut cache = self.cache.lock();
        if cache.contains_key(&style) {
            return;
        }
        cache.insert(style, MatcapState::Generating);
        drop(cache);

        log::debug!("generating matcap capture: {}", style.label());
        let cache = Arc::clone(&self.cache);
        std::thread::spawn(move || {
            let image = generate_matcap(style, MATCAP_SIZE);
            cache.lock().insert(style, MatcapState::Ready(image));
        });
    }

    /// Drain finished images for GPU upload
    pub fn take_ready(&self) -> Vec<(MatcapStyle, RgbaImage)> {
        let mut cache = self.cache.lock();
        let ready: Vec<MatcapStyle> = cache
            .iter()
            .filter(|(_, state)| matches!(state, MatcapState::Ready(_)))
            .map(|(style, _)| *style)
            .collect();

        ready
            .into_iter()
            .filter_map(|style| {
                match cache.insert(style, MatcapState::Uploaded) {
                    Some(MatcapState::Ready(image)) => Some((style, image)),
                    _ => None,
                }
            })
            .collect()
    }
}

/// Neutral gray capture used while a style is still generating
pub fn fallback_matcap() -> RgbaImage {
    shade_matcap(16, Vec3::splat(0.55), 0.3, 8.0)
}

/// Render a lit sphere into a square capture for the given style
pub fn generate_matcap(style: MatcapStyle, size: u32) -> RgbaImage {
    let (metalness, shininess) = match style {
        MatcapStyle::Gold => (0.9, 48.0),
        MatcapStyle::Silver => (0.95, 64.0),
        MatcapStyle::Red => (0.2, 24.0),
        MatcapStyle::Blue => (0.2, 24.0),
    };
    shade_matcap(size, style.base_color(), metalness, shininess)
}

fn shade_matcap(size: u32, base_color: Vec3, metalness: f32, shininess: f32) -> RgbaImage {
    let key_light = Vec3::new(-0.4, 0.6, 0.7).normalize();
    let fill_light = Vec3::new(0.6, -0.3, 0.5).normalize();
    let view = Vec3::Z;

    RgbaImage::from_fn(size, size, |x, y| {
        // Pixel to view-space normal on the unit disc
        let nx = (x as f32 + 0.5) / size as f32 * 2.0 - 1.0;
        let ny = 1.0 - (y as f32 + 0.5) / size as f32 * 2.0;
        let r2 = nx * nx + ny * ny;
        if r2 > 1.0 {
            return image::Rgba([0, 0, 0, 0]);
        }
        let normal = Vec3::new(nx, ny, (1.0 - r2).sqrt());

        let mut color = Vec3::ZERO;
        for (light, strength) in [(key_light, 1.0), (fill_light, 0.35)] {
            let diffuse = normal.dot(light).max(0.0);
            let half = (light + view).normalize();
            let specular = normal.dot(half).max(0.0).powf(shininess);
            let specular_tint = base_color.lerp(Vec3::ONE, 1.0 - metalness);
            color += (base_color * diffuse + specular_tint * specular) * strength;
        }
        color += base_color * 0.12; // ambient floor

        let to_byte = |c: f32| (c.clamp(0.0, 1.0).sqrt() * 255.0) as u8;
        image::Rgba([to_byte(color.x), to_byte(color.y), to_byte(color.z), 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_moves_through_states() {
        let loader = MatcapLoader::new();
        loader.request(MatcapStyle::Gold);
        loader.request(MatcapStyle::Gold);

        // Wait for the background thread to finish
        let mut ready = Vec::new();
        for _ in 0..200 {
            ready = loader.take_ready();
            if !ready.is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].0, MatcapStyle::Gold);

        // Already uploaded, nothing further to drain
        assert!(loader.take_ready().is_empty());
    }

    #[test]
    fn capture_is_opaque_inside_disc_only() {
        let image = generate_matcap(MatcapStyle::Red, 64);
        assert_eq!(image.get_pixel(32, 32).0[3], 255);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }
}
