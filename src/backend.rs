//! Texture loading seam between the asset store and a renderer.
//!
//! The store never touches files or GPUs directly; it asks a
//! [`RenderBackend`] for a [`Texture`]. The default [`SoftwareBackend`]
//! decodes image files on the CPU, which is all a headless sandbox needs.
//! A windowed build would implement the trait over its graphics API and
//! upload [`Texture::pixels`] itself.

use std::path::Path;

use image::RgbaImage;

/// Decoded texture: dimensions plus retained RGBA pixels.
#[derive(Debug, Clone)]
pub struct Texture {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Decoded pixel data, row major.
    pub pixels: RgbaImage,
}

impl Texture {
    /// Wrap a decoded image, taking the dimensions from it.
    pub fn from_image(pixels: RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            width: width as i32,
            height: height as i32,
            pixels,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/// Loads textures for the asset store.
pub trait RenderBackend {
    /// Load and decode the texture at `path`.
    fn load_texture(&mut self, path: &Path) -> Result<Texture, String>;
}

/// CPU-side backend decoding files with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoftwareBackend;

impl RenderBackend for SoftwareBackend {
    fn load_texture(&mut self, path: &Path) -> Result<Texture, String> {
        let img = image::open(path)
            .map_err(|e| format!("can't decode {}: {}", path.display(), e))?;
        Ok(Texture::from_image(img.to_rgba8()))
    }
}
