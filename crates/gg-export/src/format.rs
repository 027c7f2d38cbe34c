use std::fmt::Write as _;

use gg_core::config::OutputFormat;
use gg_core::frame::{GlyphCell, RenderedArt};
use gg_core::traits::GlyphFormatter;

/// Glyphes seuls, sans balisage. Les couleurs sont ignorées.
pub struct PlainFormatter;

impl GlyphFormatter for PlainFormatter {
    fn write_cell(&self, out: &mut String, cell: &GlyphCell) {
        out.push(cell.ch);
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}

/// `<span style="color: rgb(r, g, b)">g</span>` par cellule colorée.
///
/// Glyphs are always HTML-escaped so `<`, `>`, `&` and quotes from the
/// complex alphabet survive in markup.
///
/// # Example
/// ```
/// use gg_core::color::Rgb;
/// use gg_core::frame::GlyphCell;
/// use gg_core::traits::GlyphFormatter;
/// use gg_export::format::HtmlFormatter;
///
/// let mut out = String::new();
/// HtmlFormatter.write_cell(&mut out, &GlyphCell { ch: '<', color: Some(Rgb::new(1, 2, 3)) });
/// assert_eq!(out, r#"<span style="color: rgb(1, 2, 3)">&lt;</span>"#);
/// ```
pub struct HtmlFormatter;

impl GlyphFormatter for HtmlFormatter {
    fn write_cell(&self, out: &mut String, cell: &GlyphCell) {
        match cell.color {
            Some(rgb) => {
                let _ = write!(out, "<span style=\"color: {rgb}\">");
                push_escaped(out, cell.ch);
                out.push_str("</span>");
            }
            None => push_escaped(out, cell.ch),
        }
    }

    fn name(&self) -> &'static str {
        "html"
    }
}

/// Truecolor ANSI (`ESC[38;2;r;g;bm`), reset en fin de ligne colorée.
pub struct AnsiFormatter;

impl GlyphFormatter for AnsiFormatter {
    fn write_cell(&self, out: &mut String, cell: &GlyphCell) {
        if let Some(rgb) = cell.color {
            let _ = write!(out, "\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b);
        }
        out.push(cell.ch);
    }

    fn end_row(&self, out: &mut String, row: &[GlyphCell]) {
        if row.iter().any(|c| c.color.is_some()) {
            out.push_str(ANSI_RESET);
        }
    }

    fn name(&self) -> &'static str {
        "ansi"
    }
}

pub(crate) const ANSI_RESET: &str = "\x1b[0m";

/// Formatter used for an output format. `Page` rows are HTML spans.
#[must_use]
pub fn formatter_for(format: OutputFormat) -> &'static dyn GlyphFormatter {
    match format {
        OutputFormat::Plain => &PlainFormatter,
        OutputFormat::Html | OutputFormat::Page => &HtmlFormatter,
        OutputFormat::Ansi => &AnsiFormatter,
    }
}

pub(crate) fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}

/// Une chaîne par ligne de la grille, dans l'ordre.
///
/// # Example
/// ```
/// use gg_core::frame::{Dimensions, GlyphCell, Grid};
/// use gg_export::format::{PlainFormatter, serialize};
///
/// let dims = Dimensions { columns: 2, rows: 2 };
/// let art = Grid::new(dims, GlyphCell { ch: '#', color: None });
/// assert_eq!(serialize(&art, &PlainFormatter), vec!["##", "##"]);
/// ```
#[must_use]
pub fn serialize(art: &RenderedArt, formatter: &dyn GlyphFormatter) -> Vec<String> {
    art.rows()
        .map(|row| {
            let mut line = String::with_capacity(row.len());
            for cell in row {
                formatter.write_cell(&mut line, cell);
            }
            formatter.end_row(&mut line, row);
            line
        })
        .collect()
}

/// Texte complet : lignes séparées par `\n`, plus un `\n` final si
/// `trailing_newline` (comportement historique, actif par défaut).
#[must_use]
pub fn to_text(art: &RenderedArt, formatter: &dyn GlyphFormatter, trailing_newline: bool) -> String {
    let lines = serialize(art, formatter);
    let mut text = lines.join("\n");
    if trailing_newline {
        text.push('\n');
    }
    log::debug!(
        "Sérialisé {} lignes ({}), {} octets",
        lines.len(),
        formatter.name(),
        text.len()
    );
    text
}

#[cfg(test)]
mod tests {
    use gg_core::color::Rgb;
    use gg_core::frame::{Dimensions, Grid};

    use super::*;

    fn art(colored: bool) -> RenderedArt {
        let dims = Dimensions {
            columns: 3,
            rows: 2,
        };
        let glyphs = ['@', '<', ' ', '&', '1', '0'];
        let cells = glyphs
            .iter()
            .enumerate()
            .map(|(i, &ch)| GlyphCell {
                ch,
                color: colored.then(|| Rgb::new(i as u8 * 40, 255 - i as u8, 7)),
            })
            .collect();
        Grid::from_cells(dims, cells).unwrap()
    }

    #[test]
    fn plain_lines_have_one_glyph_per_column() {
        let lines = serialize(&art(true), &PlainFormatter);
        assert_eq!(lines, vec!["@< ", "&10"]);
        assert!(lines.iter().all(|l| l.chars().count() == 3));
    }

    #[test]
    fn trailing_newline_is_switchable() {
        let a = art(false);
        assert_eq!(to_text(&a, &PlainFormatter, true), "@< \n&10\n");
        assert_eq!(to_text(&a, &PlainFormatter, false), "@< \n&10");
    }

    #[test]
    fn html_wraps_every_colored_glyph() {
        let lines = serialize(&art(true), &HtmlFormatter);
        assert_eq!(
            lines[0],
            concat!(
                r#"<span style="color: rgb(0, 255, 7)">@</span>"#,
                r#"<span style="color: rgb(40, 254, 7)">&lt;</span>"#,
                r#"<span style="color: rgb(80, 253, 7)"> </span>"#,
            )
        );
        assert_eq!(lines[1].matches("<span").count(), 3);
    }

    #[test]
    fn html_without_color_only_escapes() {
        let lines = serialize(&art(false), &HtmlFormatter);
        assert_eq!(lines, vec!["@&lt; ", "&amp;10"]);
    }

    #[test]
    fn ansi_resets_only_colored_rows() {
        let colored = serialize(&art(true), &AnsiFormatter);
        assert_eq!(
            colored[1],
            "\x1b[38;2;120;252;7m&\x1b[38;2;160;251;7m1\x1b[38;2;200;250;7m0\x1b[0m"
        );
        let plain = serialize(&art(false), &AnsiFormatter);
        assert_eq!(plain, vec!["@< ", "&10"]);
    }

    #[test]
    fn page_uses_html_rows() {
        assert_eq!(formatter_for(OutputFormat::Page).name(), "html");
        assert_eq!(formatter_for(OutputFormat::Plain).name(), "plain");
        assert_eq!(formatter_for(OutputFormat::Ansi).name(), "ansi");
    }
}
