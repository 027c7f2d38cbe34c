use crate::color::Rgb;
use crate::frame::GlyphCell;

/// Image déjà décodée, en lecture seule.
///
/// Implémenté par : `FrameBuffer`. Le pipeline ne décode jamais d'octets
/// lui-même.
///
/// # Example
/// ```
/// use gg_core::color::Rgb;
/// use gg_core::traits::RasterImage;
///
/// struct Checker;
/// impl RasterImage for Checker {
///     fn width(&self) -> u32 { 2 }
///     fn height(&self) -> u32 { 2 }
///     fn rgb(&self, x: u32, y: u32) -> Rgb {
///         if (x + y) % 2 == 0 { Rgb::BLACK } else { Rgb::WHITE }
///     }
/// }
/// assert_eq!(Checker.rgb(1, 0), Rgb::WHITE);
/// ```
pub trait RasterImage: Sync {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Couleur du pixel (x, y). CONTRAT : `x < width()`, `y < height()`.
    ///
    /// The sampler never reads outside. `FrameBuffer` answers black for an
    /// out-of-range read rather than panicking.
    fn rgb(&self, x: u32, y: u32) -> Rgb;
}

/// Met en forme les cellules d'un art rendu en texte.
///
/// Plain, HTML et ANSI partagent le même pipeline et ne divergent qu'ici.
///
/// # Example
/// ```
/// use gg_core::frame::GlyphCell;
/// use gg_core::traits::GlyphFormatter;
///
/// struct Upper;
/// impl GlyphFormatter for Upper {
///     fn write_cell(&self, out: &mut String, cell: &GlyphCell) {
///         out.extend(cell.ch.to_uppercase());
///     }
///     fn name(&self) -> &'static str { "upper" }
/// }
/// let mut s = String::new();
/// Upper.write_cell(&mut s, &GlyphCell { ch: 'a', color: None });
/// assert_eq!(s, "A");
/// ```
pub trait GlyphFormatter: Send + Sync {
    /// Append one cell (glyph plus optional color markup) to `out`.
    fn write_cell(&self, out: &mut String, cell: &GlyphCell);

    /// Called once after the last cell of every row, before the line break.
    fn end_row(&self, _out: &mut String, _row: &[GlyphCell]) {}

    /// Nom lisible pour les logs.
    fn name(&self) -> &'static str;
}
