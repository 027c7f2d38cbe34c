use anyhow::{Context, Result};
use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use gg_core::frame::FrameBuffer;

/// Resizer réutilisable wrappant fast_image_resize (box filter).
///
/// # Example
/// ```
/// use gg_source::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box)),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns an error if the resize operation fails.
    ///
    /// # Example
    /// ```
    /// use gg_source::resize::Resizer;
    /// use gg_core::frame::FrameBuffer;
    /// let mut r = Resizer::new();
    /// let src = FrameBuffer::new(100, 100);
    /// let mut dst = FrameBuffer::new(50, 50);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<()> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        let src_image = ImageRef::new(src.width, src.height, &src.data, PixelType::U8x4)
            .context("Invalid source dimensions")?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .context("Invalid destination dimensions")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Dimensions after fitting `(width, height)` inside a `max_side` square,
/// aspect ratio preserved. `None` when no reduction is needed.
///
/// # Example
/// ```
/// use gg_source::resize::fitted_size;
/// assert_eq!(fitted_size(8000, 4000, 4096), Some((4096, 2048)));
/// assert_eq!(fitted_size(800, 400, 4096), None);
/// assert_eq!(fitted_size(8000, 4000, 0), None);
/// ```
#[must_use]
pub fn fitted_size(width: u32, height: u32, max_side: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if max_side == 0 || longest <= max_side {
        return None;
    }
    let scale = |side: u32| -> u32 {
        let scaled = u64::from(side) * u64::from(max_side) / u64::from(longest);
        (scaled as u32).max(1)
    };
    Some((scale(width), scale(height)))
}

/// Réduit une image trop grande avant échantillonnage. No-op sous la borne.
///
/// # Errors
/// Returns an error if the resize operation fails.
///
/// # Example
/// ```
/// use gg_source::resize::fit_within;
/// use gg_core::frame::FrameBuffer;
/// let big = FrameBuffer::new(400, 100);
/// let small = fit_within(big, 200).unwrap();
/// assert_eq!((small.width, small.height), (200, 50));
/// ```
pub fn fit_within(frame: FrameBuffer, max_side: u32) -> Result<FrameBuffer> {
    let Some((width, height)) = fitted_size(frame.width, frame.height, max_side) else {
        return Ok(frame);
    };
    log::info!(
        "Réduction source {}×{} → {width}×{height}",
        frame.width,
        frame.height
    );
    let mut dst = FrameBuffer::new(width, height);
    Resizer::new().resize_into(&frame, &mut dst)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use gg_core::color::Rgb;
    use gg_core::traits::RasterImage;

    use super::*;

    #[test]
    fn fit_keeps_aspect_ratio() {
        assert_eq!(fitted_size(1000, 3000, 300), Some((100, 300)));
        assert_eq!(fitted_size(5000, 1, 100), Some((100, 1)));
    }

    #[test]
    fn fit_below_bound_is_untouched() {
        let frame = FrameBuffer::filled(30, 20, Rgb::new(1, 2, 3));
        let out = fit_within(frame.clone(), 30).unwrap();
        assert_eq!(out, frame);
    }

    #[test]
    fn solid_color_survives_downscale() {
        let color = Rgb::new(200, 100, 50);
        let frame = FrameBuffer::filled(64, 32, color);
        let out = fit_within(frame, 16).unwrap();
        assert_eq!((out.width, out.height), (16, 8));
        for y in 0..out.height {
            for x in 0..out.width {
                let px = out.rgb(x, y);
                // Fixed-point convolution may be off by one.
                assert!(px.r.abs_diff(color.r) <= 1, "{px:?}");
                assert!(px.g.abs_diff(color.g) <= 1, "{px:?}");
                assert!(px.b.abs_diff(color.b) <= 1, "{px:?}");
            }
        }
    }
}
