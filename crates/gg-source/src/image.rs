use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use gg_core::frame::FrameBuffer;
use image::RgbaImage;

/// Source d'image statique, décodée une fois.
///
/// # Example
/// ```no_run
/// use gg_source::image::ImageSource;
/// use std::path::Path;
/// let source = ImageSource::new(Path::new("photo.png")).unwrap();
/// let (w, h) = source.native_size();
/// ```
pub struct ImageSource {
    frame: Arc<FrameBuffer>,
}

impl ImageSource {
    /// Load an image from disk and create a source.
    ///
    /// # Errors
    /// Returns an error if the image cannot be loaded or has zero area.
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            frame: Arc::new(load_image(path)?),
        })
    }

    /// Decode an in-memory encoded image (PNG, JPEG, BMP, GIF).
    ///
    /// # Errors
    /// Returns an error if the bytes cannot be decoded or the image has zero area.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            frame: Arc::new(decode_image(bytes)?),
        })
    }

    /// Shared handle on the decoded frame.
    #[must_use]
    pub fn frame(&self) -> Arc<FrameBuffer> {
        Arc::clone(&self.frame)
    }

    /// Dimensions natives de la source (avant resize).
    #[must_use]
    pub fn native_size(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }
}

/// Décode un fichier image en RGBA.
///
/// Animated GIFs contribute their first frame only.
///
/// # Errors
/// Returns an error if the image cannot be loaded or has zero area.
///
/// # Example
/// ```no_run
/// use gg_source::image::load_image;
/// let frame = load_image(std::path::Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let frame = into_frame(img.to_rgba8())
        .with_context(|| format!("Image vide : {}", path.display()))?;
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Décode des octets image (format deviné depuis l'en-tête).
///
/// # Errors
/// Returns an error if the bytes cannot be decoded or the image has zero area.
pub fn decode_image(bytes: &[u8]) -> Result<FrameBuffer> {
    let img = image::load_from_memory(bytes).context("Décodage image impossible")?;
    into_frame(img.to_rgba8())
}

fn into_frame(rgba: RgbaImage) -> Result<FrameBuffer> {
    let (width, height) = rgba.dimensions();
    Ok(FrameBuffer::from_rgba(width, height, rgba.into_raw())?)
}
