use gg_core::charset::DensityLut;
use gg_core::config::RenderOptions;
use gg_core::error::CoreError;
use gg_core::frame::{Dimensions, GlyphCell, RenderedArt};
use gg_core::traits::RasterImage;

use crate::sampler::sample_into;

/// Rendu complet image → grille de glyphes : échantillonnage puis mapping
/// de densité. Aucun état conservé entre deux appels.
///
/// With `preserve_color`, every cell keeps the sampled RGB of its block (not
/// an "ideal" glyph color); otherwise `color` is `None` everywhere.
///
/// # Errors
/// [`CoreError::InvalidImage`] for a zero-area image,
/// [`CoreError::InvalidDimension`] for `columns == 0`.
///
/// # Example
/// ```
/// use gg_ascii::compositor::render;
/// use gg_core::color::Rgb;
/// use gg_core::config::RenderOptions;
/// use gg_core::frame::FrameBuffer;
///
/// let image = FrameBuffer::filled(10, 10, Rgb::BLACK);
/// let opts = RenderOptions { columns: 5, ..RenderOptions::default() };
/// let art = render(&image, &opts).unwrap();
/// assert_eq!((art.columns, art.rows), (5, 5));
/// assert!(art.cells.iter().all(|c| c.ch == '@'));
/// ```
pub fn render<I: RasterImage + ?Sized>(
    image: &I,
    options: &RenderOptions,
) -> Result<RenderedArt, CoreError> {
    let dims = Dimensions::for_image(image.width(), image.height(), options.columns)?;
    render_at(image, dims, options)
}

/// Comme [`render`], sur une grille de taille imposée.
///
/// `options.columns` is ignored; `dims` wins. The app computes `dims` from
/// the native image size before pre-scaling.
///
/// # Errors
/// [`CoreError::InvalidImage`] for a zero-area image,
/// [`CoreError::InvalidDimension`] if `dims` has a zero side.
pub fn render_at<I: RasterImage + ?Sized>(
    image: &I,
    dims: Dimensions,
    options: &RenderOptions,
) -> Result<RenderedArt, CoreError> {
    let sampled = sample_into(image, dims, options.filter)?;
    let lut = DensityLut::new(options.alphabet);
    let preserve = options.preserve_color;

    log::debug!(
        "Rendu {}×{} alphabet={} couleur={preserve}",
        sampled.columns,
        sampled.rows,
        options.alphabet.name
    );

    Ok(sampled.map(|&rgb| GlyphCell {
        ch: lut.map(rgb),
        color: preserve.then_some(rgb),
    }))
}

#[cfg(test)]
mod tests {
    use gg_core::charset::{self, GlyphAlphabet, MINIMAL};
    use gg_core::color::Rgb;
    use gg_core::config::{RenderConfig, SampleFilter};
    use gg_core::frame::FrameBuffer;

    use super::*;

    static TWO: GlyphAlphabet = GlyphAlphabet::new("Two", "@ ");

    fn gradient(width: u32, height: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = (x * 255 / (width - 1)) as u8;
                fb.set_pixel(x, y, Rgb::new(v, v, v));
            }
        }
        fb
    }

    #[test]
    fn mid_gray_scenario() {
        let image = FrameBuffer::filled(10, 10, Rgb::new(128, 128, 128));
        let opts = RenderOptions {
            alphabet: &TWO,
            columns: 10,
            preserve_color: false,
            filter: SampleFilter::Area,
        };
        let art = render(&image, &opts).unwrap();
        assert_eq!(art.cells.len(), 100);
        assert!(art.cells.iter().all(|c| c.ch == '@' && c.color.is_none()));
    }

    #[test]
    fn zero_columns_is_invalid_dimension() {
        let image = FrameBuffer::filled(10, 10, Rgb::WHITE);
        let opts = RenderOptions {
            columns: 0,
            ..RenderOptions::default()
        };
        assert_eq!(
            render(&image, &opts).unwrap_err(),
            CoreError::InvalidDimension { columns: 0 }
        );
    }

    #[test]
    fn unknown_alphabet_never_reaches_render() {
        let config = RenderConfig {
            alphabet: "Nonexistent".into(),
            ..RenderConfig::default()
        };
        assert!(matches!(
            config.to_options(),
            Err(CoreError::UnknownAlphabet { .. })
        ));
    }

    #[test]
    fn preserve_color_keeps_sampled_rgb() {
        let mut image = FrameBuffer::filled(2, 2, Rgb::new(10, 200, 30));
        image.set_pixel(1, 0, Rgb::new(250, 5, 5));
        image.set_pixel(1, 1, Rgb::new(250, 5, 5));
        let opts = RenderOptions {
            columns: 2,
            preserve_color: true,
            ..RenderOptions::default()
        };
        let art = render(&image, &opts).unwrap();
        assert_eq!((art.columns, art.rows), (2, 2));
        assert_eq!(art.get(0, 0).color, Some(Rgb::new(10, 200, 30)));
        assert_eq!(art.get(1, 1).color, Some(Rgb::new(250, 5, 5)));
    }

    #[test]
    fn gradient_glyphs_never_get_denser_left_to_right() {
        let image = gradient(256, 64);
        let opts = RenderOptions {
            alphabet: charset::alphabet("Complex").unwrap(),
            columns: 64,
            ..RenderOptions::default()
        };
        let art = render(&image, &opts).unwrap();
        let glyphs: Vec<char> = opts.alphabet.glyphs.chars().collect();
        for row in art.rows() {
            let indices: Vec<usize> = row
                .iter()
                .map(|c| glyphs.iter().position(|&g| g == c.ch).unwrap())
                .collect();
            assert!(indices.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(indices[0], 0);
        }
    }

    #[test]
    fn render_at_keeps_requested_shape() {
        let image = FrameBuffer::filled(40, 20, Rgb::BLACK);
        let dims = Dimensions {
            columns: 100,
            rows: 51,
        };
        let art = render_at(&image, dims, &RenderOptions::default()).unwrap();
        assert_eq!(art.dimensions(), dims);
        assert!(art.cells.iter().all(|c| c.ch == '@'));
    }

    #[test]
    fn repeated_renders_are_identical() {
        let image = gradient(120, 45);
        for preserve_color in [false, true] {
            let opts = RenderOptions {
                alphabet: &MINIMAL,
                columns: 33,
                preserve_color,
                filter: SampleFilter::Area,
            };
            assert_eq!(
                render(&image, &opts).unwrap(),
                render(&image, &opts).unwrap()
            );
        }
    }
}
