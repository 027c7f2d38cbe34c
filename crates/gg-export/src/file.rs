use std::path::Path;

use anyhow::{Context, Result};
use gg_core::config::{OutputFormat, PageConfig};
use gg_core::frame::RenderedArt;

use crate::format::{PlainFormatter, formatter_for, to_text};
use crate::page::{PageStyle, html_page};

/// Nom de fichier par défaut de l'export texte.
pub const DEFAULT_EXPORT_NAME: &str = "ascii-art.txt";

/// Texte final pour un format : lignes formatées, ou page HTML complète.
///
/// # Errors
/// Returns an error if the page colors in `page` are invalid.
pub fn render_output(
    art: &RenderedArt,
    format: OutputFormat,
    trailing_newline: bool,
    page: &PageConfig,
) -> Result<String> {
    match format {
        OutputFormat::Page => {
            let style = PageStyle::from_config(page).context("Section [page] invalide")?;
            Ok(html_page(art, &style))
        }
        other => Ok(to_text(art, formatter_for(other), trailing_newline)),
    }
}

/// Export fichier : la page HTML pour `Page`, sinon le texte brut sans
/// balisage couleur, quel que soit le format d'affichage.
///
/// # Errors
/// Returns an error if the file cannot be written or the page style is invalid.
///
/// # Example
/// ```no_run
/// use gg_core::config::{OutputFormat, PageConfig};
/// use gg_core::frame::{Dimensions, GlyphCell, Grid};
/// use gg_export::file::export;
/// use std::path::Path;
///
/// let art = Grid::new(Dimensions { columns: 4, rows: 2 }, GlyphCell::default());
/// export(&art, Path::new("ascii-art.txt"), OutputFormat::Html, true, &PageConfig::default()).unwrap();
/// ```
pub fn export(
    art: &RenderedArt,
    path: &Path,
    format: OutputFormat,
    trailing_newline: bool,
    page: &PageConfig,
) -> Result<()> {
    let text = match format {
        OutputFormat::Page => render_output(art, format, trailing_newline, page)?,
        _ => to_text(art, &PlainFormatter, trailing_newline),
    };
    write_text(path, &text)
}

/// Écrit un blob texte UTF-8, en créant le dossier parent si besoin.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer {}", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("Exporté : {} ({} octets)", path.display(), text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use gg_core::color::Rgb;
    use gg_core::frame::{Dimensions, GlyphCell, Grid};

    use super::*;

    fn colored_art() -> RenderedArt {
        Grid::new(
            Dimensions {
                columns: 2,
                rows: 2,
            },
            GlyphCell {
                ch: '<',
                color: Some(Rgb::new(5, 6, 7)),
            },
        )
    }

    #[test]
    fn export_strips_color_markup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join(DEFAULT_EXPORT_NAME);
        for format in [OutputFormat::Plain, OutputFormat::Html, OutputFormat::Ansi] {
            export(&colored_art(), &path, format, true, &PageConfig::default()).unwrap();
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "<<\n<<\n");
        }
    }

    #[test]
    fn export_page_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.html");
        export(
            &colored_art(),
            &path,
            OutputFormat::Page,
            true,
            &PageConfig::default(),
        )
        .unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("&lt;</span>"));
    }

    #[test]
    fn render_output_respects_format() {
        let page = PageConfig::default();
        let art = colored_art();
        let ansi = render_output(&art, OutputFormat::Ansi, false, &page).unwrap();
        assert_eq!(ansi.lines().count(), 2);
        assert!(ansi.starts_with("\x1b[38;2;5;6;7m<"));
        assert!(!ansi.ends_with('\n'));

        let bad_page = PageConfig {
            foreground: "zzz".into(),
            ..PageConfig::default()
        };
        assert!(render_output(&art, OutputFormat::Page, true, &bad_page).is_err());
        assert!(render_output(&art, OutputFormat::Plain, true, &bad_page).is_ok());
    }
}
