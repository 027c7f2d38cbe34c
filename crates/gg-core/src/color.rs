use std::fmt;

use crate::error::CoreError;

/// Couleur RGB 8 bits par canal.
///
/// # Example
/// ```
/// use gg_core::color::Rgb;
/// let c = Rgb::new(255, 0, 0);
/// assert_eq!(c.channel_sum(), 255);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `r + g + b`, in `[0, 765]`.
    #[inline(always)]
    #[must_use]
    pub fn channel_sum(self) -> u16 {
        u16::from(self.r) + u16::from(self.g) + u16::from(self.b)
    }

    /// Luminosité non pondérée `(r + g + b) / 3` dans `[0.0, 255.0]`.
    ///
    /// Equal weights, not BT.601/BT.709.
    ///
    /// # Example
    /// ```
    /// use gg_core::color::Rgb;
    /// assert_eq!(Rgb::new(30, 60, 90).brightness(), 60.0);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn brightness(self) -> f32 {
        f32::from(self.channel_sum()) / 3.0
    }

    /// Format as lowercase `#rrggbb`.
    ///
    /// # Example
    /// ```
    /// use gg_core::color::Rgb;
    /// assert_eq!(Rgb::new(255, 128, 0).to_hex(), "#ff8000");
    /// ```
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional, case-insensitive).
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidColor`] for anything else.
    ///
    /// # Example
    /// ```
    /// use gg_core::color::Rgb;
    /// assert_eq!(Rgb::parse_hex("#000000").unwrap(), Rgb::BLACK);
    /// assert_eq!(Rgb::parse_hex("fff").unwrap(), Rgb::WHITE);
    /// assert!(Rgb::parse_hex("#12345").is_err());
    /// ```
    pub fn parse_hex(value: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidColor {
            value: value.to_string(),
        };
        let digits = value.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc → #aabbcc
                let short = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::new(
                    short(&digits[0..1])?,
                    short(&digits[1..2])?,
                    short(&digits[2..3])?,
                ))
            }
            _ => Err(invalid()),
        }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    /// CSS functional notation, `rgb(r, g, b)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_is_unweighted_mean() {
        assert_eq!(Rgb::BLACK.brightness(), 0.0);
        assert_eq!(Rgb::WHITE.brightness(), 255.0);
        // Pure green would be ~182 under BT.709; the plain mean gives 85.
        assert_eq!(Rgb::new(0, 255, 0).brightness(), 85.0);
    }

    #[test]
    fn hex_roundtrip_and_shorthand() {
        let c = Rgb::new(18, 52, 86);
        assert_eq!(Rgb::parse_hex(&c.to_hex()).unwrap(), c);
        assert_eq!(Rgb::parse_hex("#AbC").unwrap(), Rgb::new(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn hex_rejects_garbage() {
        for bad in ["", "#", "#gggggg", "#12", "#1234567", "#é12"] {
            assert!(
                matches!(Rgb::parse_hex(bad), Err(CoreError::InvalidColor { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn display_uses_css_rgb() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1, 2, 3)");
    }
}
