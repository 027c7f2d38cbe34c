use gg_core::color::Rgb;
use gg_core::config::OutputFormat;
use gg_core::frame::GlyphCell;

use crate::error::ExportError;

const SPAN_OPEN: &str = "<span style=\"color: rgb(";
const SPAN_CLOSE: &str = "</span>";

const ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

/// Retire le balisage d'une sortie formatée, pour l'export texte brut.
///
/// # Example
/// ```
/// use gg_core::config::OutputFormat;
/// use gg_export::markup::strip_markup;
/// let html = r#"<span style="color: rgb(1, 2, 3)">&lt;</span>@"#;
/// assert_eq!(strip_markup(html, OutputFormat::Html), "<@");
/// assert_eq!(strip_markup("\x1b[38;2;1;2;3m<\x1b[0m", OutputFormat::Ansi), "<");
/// ```
#[must_use]
pub fn strip_markup(text: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => text.to_string(),
        OutputFormat::Html | OutputFormat::Page => strip_html(text),
        OutputFormat::Ansi => strip_ansi(text),
    }
}

/// Retire les balises HTML et décode les entités que le formatter émet.
///
/// Glyphs are escaped in HTML output, so any raw `<` opens a tag.
#[must_use]
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        match ch {
            '<' => {
                rest = match rest.find('>') {
                    Some(end) => &rest[end + 1..],
                    None => "",
                };
            }
            '&' => {
                if let Some((entity, decoded)) = ENTITIES.iter().find(|(e, _)| rest.starts_with(e)) {
                    out.push(*decoded);
                    rest = &rest[entity.len()..];
                } else {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
            _ => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    out
}

/// Retire les séquences CSI (`ESC [ params final`), dont les couleurs SGR.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if ch == '\x1b' && rest[1..].starts_with('[') {
            // Parameters, then one final byte in 0x40..=0x7e.
            let body = &rest[2..];
            rest = match body.find(|c: char| ('@'..='~').contains(&c)) {
                Some(end) => &body[end + 1..],
                None => "",
            };
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

/// Relit une ligne produite par le formatter HTML et restitue les cellules,
/// couleurs d'origine comprises.
///
/// # Errors
/// [`ExportError::MalformedMarkup`] if the line deviates from the emitted
/// layout (unknown tag, bad `rgb(...)` triplet, unclosed span).
///
/// # Example
/// ```
/// use gg_core::color::Rgb;
/// use gg_export::markup::parse_html_cells;
/// let cells = parse_html_cells(r#"<span style="color: rgb(9, 8, 7)">#</span>."#).unwrap();
/// assert_eq!(cells[0].color, Some(Rgb::new(9, 8, 7)));
/// assert_eq!(cells[1].ch, '.');
/// assert!(cells[1].color.is_none());
/// ```
pub fn parse_html_cells(line: &str) -> Result<Vec<GlyphCell>, ExportError> {
    let mut cells = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let offset = line.len() - rest.len();
        let malformed = || ExportError::MalformedMarkup { offset };
        if let Some(after) = rest.strip_prefix(SPAN_OPEN) {
            let (triplet, after) = after.split_once(")\">").ok_or_else(malformed)?;
            let color = parse_triplet(triplet).ok_or_else(malformed)?;
            let (ch, after) = take_glyph(after).ok_or_else(malformed)?;
            rest = after.strip_prefix(SPAN_CLOSE).ok_or_else(malformed)?;
            cells.push(GlyphCell {
                ch,
                color: Some(color),
            });
        } else {
            let (ch, after) = take_glyph(rest).ok_or_else(malformed)?;
            rest = after;
            cells.push(GlyphCell { ch, color: None });
        }
    }
    Ok(cells)
}

fn parse_triplet(s: &str) -> Option<Rgb> {
    let mut parts = s.split(',').map(|p| p.trim().parse::<u8>());
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

/// One glyph, escaped or literal. A bare `<` means a tag we did not emit.
fn take_glyph(s: &str) -> Option<(char, &str)> {
    if let Some((entity, decoded)) = ENTITIES.iter().find(|(e, _)| s.starts_with(e)) {
        return Some((*decoded, &s[entity.len()..]));
    }
    let ch = s.chars().next()?;
    if ch == '<' {
        return None;
    }
    Some((ch, &s[ch.len_utf8()..]))
}
