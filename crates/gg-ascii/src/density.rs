use gg_core::charset::{GlyphAlphabet, glyph_index};
use gg_core::color::Rgb;

/// Map one cell color to a glyph of `alphabet`.
///
/// `brightness = (r + g + b) / 3`, `index = floor(brightness / 255 * (len - 1))`:
/// black lands on index 0, white on the last glyph. Total over all colors.
///
/// # Example
/// ```
/// use gg_ascii::density::map_to_glyph;
/// use gg_core::charset::STANDARD;
/// use gg_core::color::Rgb;
/// assert_eq!(map_to_glyph(Rgb::BLACK, &STANDARD), '@');
/// assert_eq!(map_to_glyph(Rgb::WHITE, &STANDARD), ' ');
/// ```
#[must_use]
pub fn map_to_glyph(cell: Rgb, alphabet: &GlyphAlphabet) -> char {
    let index = glyph_index(cell, alphabet.len());
    alphabet.glyph(index).unwrap_or(' ')
}
