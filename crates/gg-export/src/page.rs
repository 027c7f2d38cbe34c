use gg_core::color::Rgb;
use gg_core::config::PageConfig;
use gg_core::error::CoreError;
use gg_core::frame::RenderedArt;

use crate::format::{HtmlFormatter, serialize};

/// Habillage de la page HTML : police, couleur du texte, fond.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageStyle {
    /// Font size in px.
    pub font_size: u32,
    /// Text color when the art carries no per-glyph color.
    pub foreground: Rgb,
    pub background: Rgb,
}

impl PageStyle {
    /// # Errors
    /// [`CoreError::InvalidColor`] if a configured color is not hex.
    pub fn from_config(config: &PageConfig) -> Result<Self, CoreError> {
        let (foreground, background) = config.colors()?;
        Ok(Self {
            font_size: config.font_size,
            foreground,
            background,
        })
    }
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            font_size: 10,
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
        }
    }
}

/// Page HTML autonome : l'art en spans dans un `<pre>` monospace,
/// `line-height: 1`.
///
/// Colored art inherits no foreground so each span keeps its own color.
///
/// # Example
/// ```
/// use gg_core::frame::{Dimensions, GlyphCell, Grid};
/// use gg_export::page::{PageStyle, html_page};
///
/// let art = Grid::new(Dimensions { columns: 2, rows: 1 }, GlyphCell { ch: '@', color: None });
/// let page = html_page(&art, &PageStyle::default());
/// assert!(page.contains("font-size: 10px"));
/// assert!(page.contains("@@\n</pre>"));
/// ```
#[must_use]
pub fn html_page(art: &RenderedArt, style: &PageStyle) -> String {
    let colored = art.cells.iter().any(|c| c.color.is_some());
    let color = if colored {
        "inherit".to_string()
    } else {
        style.foreground.to_hex()
    };

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>ascii-art</title>\n</head>\n");
    page.push_str(&format!(
        "<body style=\"margin: 0; background: {}\">\n",
        style.background.to_hex()
    ));
    page.push_str(&format!(
        "<pre style=\"font-family: monospace; font-size: {}px; line-height: 1; color: {color}\">\n",
        style.font_size
    ));
    for line in serialize(art, &HtmlFormatter) {
        page.push_str(&line);
        page.push('\n');
    }
    page.push_str("</pre>\n</body>\n</html>\n");
    page
}
