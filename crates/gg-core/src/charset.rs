use crate::color::Rgb;
use crate::error::CoreError;

/// Nombre de sommes de canaux distinctes : `r + g + b ∈ [0, 765]`.
const CHANNEL_SUMS: usize = 766;

/// Alphabet de glyphes ordonné du plus dense (index 0, noir) au plus clair.
///
/// # Example
/// ```
/// use gg_core::charset::GlyphAlphabet;
/// let a = GlyphAlphabet::new("Custom", "#. ");
/// assert_eq!(a.len(), 3);
/// assert_eq!(a.glyph(0), Some('#'));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphAlphabet {
    /// Registry name.
    pub name: &'static str,
    /// Glyphs, densest first.
    pub glyphs: &'static str,
}

impl GlyphAlphabet {
    #[must_use]
    pub const fn new(name: &'static str, glyphs: &'static str) -> Self {
        Self { name, glyphs }
    }

    /// Number of glyphs (chars, not bytes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    #[must_use]
    pub fn glyph(&self, index: usize) -> Option<char> {
        self.glyphs.chars().nth(index)
    }
}

/// 10 caractères — compact, bon contraste.
pub const STANDARD: GlyphAlphabet = GlyphAlphabet::new("Standard", "@%#*+=-:. ");

/// 70 caractères — Paul Bourke, dense→clair.
pub const COMPLEX: GlyphAlphabet = GlyphAlphabet::new(
    "Complex",
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ",
);

/// Blocs Unicode — pseudo-pixels.
pub const SIMPLE: GlyphAlphabet = GlyphAlphabet::new("Simple", "█▓▒░ ");

/// Minimal — binaire, plus l'espace.
pub const MINIMAL: GlyphAlphabet = GlyphAlphabet::new("Minimal", "10 ");

/// Registry order, also the order shown by `--list-alphabets`.
pub const ALPHABETS: &[GlyphAlphabet] = &[STANDARD, COMPLEX, SIMPLE, MINIMAL];

/// Cherche un alphabet par nom (insensible à la casse).
///
/// # Errors
/// [`CoreError::UnknownAlphabet`] si le nom n'est pas enregistré.
///
/// # Example
/// ```
/// use gg_core::charset::alphabet;
/// assert_eq!(alphabet("complex").unwrap().name, "Complex");
/// assert!(alphabet("Nonexistent").is_err());
/// ```
pub fn alphabet(name: &str) -> Result<&'static GlyphAlphabet, CoreError> {
    let wanted = name.trim();
    ALPHABETS
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CoreError::UnknownAlphabet {
            name: name.to_string(),
        })
}

/// Registered alphabet names, registry order.
pub fn names() -> impl Iterator<Item = &'static str> {
    ALPHABETS.iter().map(|a| a.name)
}

/// Index du glyphe pour une couleur : `floor((r+g+b)/3 / 255 * (len-1))`.
///
/// Evaluated in `f64` with the same operation order, so bucket edges land
/// where the browser tool put them (sum 425 on `Standard` is `+`, not `=`).
/// `len <= 1` always yields 0.
///
/// # Example
/// ```
/// use gg_core::charset::glyph_index;
/// use gg_core::color::Rgb;
/// assert_eq!(glyph_index(Rgb::new(128, 128, 128), 2), 0);
/// assert_eq!(glyph_index(Rgb::WHITE, 10), 9);
/// ```
#[inline(always)]
#[must_use]
pub fn glyph_index(color: Rgb, len: usize) -> usize {
    index_for_sum(usize::from(color.channel_sum()), len)
}

#[inline(always)]
fn index_for_sum(sum: usize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let brightness = sum as f64 / 3.0;
    let index = ((brightness / 255.0) * (len - 1) as f64).floor() as usize;
    index.min(len - 1)
}

/// Lookup table mapping channel sum [0..765] → glyph.
///
/// Pre-computed once per render for O(1) per-cell cost.
///
/// # Example
/// ```
/// use gg_core::charset::{DensityLut, STANDARD};
/// use gg_core::color::Rgb;
/// let lut = DensityLut::new(&STANDARD);
/// assert_eq!(lut.map(Rgb::BLACK), '@');
/// assert_eq!(lut.map(Rgb::WHITE), ' ');
/// ```
pub struct DensityLut {
    lut: [char; CHANNEL_SUMS],
}

impl DensityLut {
    /// Build a LUT from an alphabet ordered densest→lightest.
    ///
    /// An empty alphabet (only constructible by hand, never from the
    /// registry) maps everything to a space.
    #[must_use]
    pub fn new(alphabet: &GlyphAlphabet) -> Self {
        let chars: Vec<char> = alphabet.glyphs.chars().collect();
        let mut lut = [' '; CHANNEL_SUMS];
        if chars.is_empty() {
            return Self { lut };
        }
        for (sum, slot) in lut.iter_mut().enumerate() {
            *slot = chars[index_for_sum(sum, chars.len())];
        }
        Self { lut }
    }

    /// Map a cell color to its glyph.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, color: Rgb) -> char {
        self.lut[usize::from(color.channel_sum())]
    }
}
