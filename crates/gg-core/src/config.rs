use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{self, GlyphAlphabet};
use crate::color::Rgb;
use crate::error::CoreError;

/// Bornes UI de la largeur, en caractères. Le cœur accepte toute valeur ≥ 1.
pub const MIN_COLUMNS: u32 = 20;
pub const MAX_COLUMNS: u32 = 200;

/// Bornes de la taille de police de la page HTML, en px.
pub const MIN_FONT_SIZE: u32 = 6;
pub const MAX_FONT_SIZE: u32 = 24;

/// Méthode d'échantillonnage d'un bloc source vers une cellule.
///
/// # Example
/// ```
/// use gg_core::config::SampleFilter;
/// assert!(matches!(SampleFilter::default(), SampleFilter::Area));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum SampleFilter {
    /// Moyenne du bloc source (box filter).
    #[default]
    Area,
    /// Pixel en haut à gauche du bloc.
    Nearest,
}

/// Output text representation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum OutputFormat {
    /// Glyphes seuls.
    #[default]
    Plain,
    /// `<span style="color: rgb(..)">` par glyphe.
    Html,
    /// Séquences truecolor `ESC[38;2;r;g;bm`.
    Ansi,
    /// Page HTML autonome (`<pre>` + spans).
    Page,
}

/// Options d'un rendu. Construites pour chaque appel, jamais partagées.
///
/// # Example
/// ```
/// use gg_core::config::RenderOptions;
/// let opts = RenderOptions::default();
/// assert_eq!(opts.alphabet.name, "Standard");
/// assert_eq!(opts.columns, 100);
/// assert!(!opts.preserve_color);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Glyph alphabet, densest first.
    pub alphabet: &'static GlyphAlphabet,
    /// Largeur de sortie en caractères.
    pub columns: u32,
    /// Annoter chaque glyphe avec la couleur de sa cellule.
    pub preserve_color: bool,
    /// Sampling filter.
    pub filter: SampleFilter,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            alphabet: &charset::ALPHABETS[0],
            columns: 100,
            preserve_color: false,
            filter: SampleFilter::Area,
        }
    }
}

/// Section `[render]`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Nom d'alphabet du registre.
    pub alphabet: String,
    /// Largeur en caractères [20, 200].
    pub columns: u32,
    /// Préserver la couleur source par glyphe.
    pub preserve_color: bool,
    pub filter: SampleFilter,
    pub format: OutputFormat,
    /// Line break after the last row.
    pub trailing_newline: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            alphabet: charset::STANDARD.name.to_string(),
            columns: 100,
            preserve_color: false,
            filter: SampleFilter::Area,
            format: OutputFormat::Plain,
            trailing_newline: true,
        }
    }
}

impl RenderConfig {
    /// Resolve the alphabet and build per-call options.
    ///
    /// # Errors
    /// [`CoreError::UnknownAlphabet`] if `alphabet` is not registered.
    ///
    /// # Example
    /// ```
    /// use gg_core::config::RenderConfig;
    /// let mut config = RenderConfig::default();
    /// config.alphabet = "Nonexistent".into();
    /// assert!(config.to_options().is_err());
    /// ```
    pub fn to_options(&self) -> Result<RenderOptions, CoreError> {
        Ok(RenderOptions {
            alphabet: charset::alphabet(&self.alphabet)?,
            columns: self.columns,
            preserve_color: self.preserve_color,
            filter: self.filter,
        })
    }
}

/// Section `[page]` : habillage de la page HTML autonome.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageConfig {
    /// Taille de police en px [6, 24].
    pub font_size: u32,
    /// Couleur du texte quand la couleur n'est pas préservée.
    pub foreground: String,
    pub background: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            font_size: 10,
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

impl PageConfig {
    /// Parsed `(foreground, background)`.
    ///
    /// # Errors
    /// [`CoreError::InvalidColor`] if either value is not a hex color.
    pub fn colors(&self) -> Result<(Rgb, Rgb), CoreError> {
        Ok((
            Rgb::parse_hex(&self.foreground)?,
            Rgb::parse_hex(&self.background)?,
        ))
    }
}

/// Section `[source]`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Côté maximal avant réduction à la lecture. 0 = désactivé.
    pub max_side: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { max_side: 4096 }
    }
}

/// Configuration complète, rechargeable à chaud.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use gg_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.render.columns, 100);
/// assert_eq!(config.page.font_size, 10);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub page: PageConfig,
    pub source: SourceConfig,
}

impl AppConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization and after CLI overrides.
    pub fn clamp_all(&mut self) {
        let columns = self.render.columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
        if columns != self.render.columns {
            log::warn!(
                "columns = {} hors de [{MIN_COLUMNS}, {MAX_COLUMNS}], ramené à {columns}",
                self.render.columns
            );
            self.render.columns = columns;
        }
        self.page.font_size = self.page.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    page: Option<PageSection>,
    source: Option<SourceSection>,
}

#[derive(Deserialize)]
struct RenderSection {
    alphabet: Option<String>,
    columns: Option<u32>,
    preserve_color: Option<bool>,
    filter: Option<SampleFilter>,
    format: Option<OutputFormat>,
    trailing_newline: Option<bool>,
}

#[derive(Deserialize)]
struct PageSection {
    font_size: Option<u32>,
    foreground: Option<String>,
    background: Option<String>,
}

#[derive(Deserialize)]
struct SourceSection {
    max_side: Option<u32>,
}

/// Parse a TOML document and merge it over the defaults.
///
/// # Errors
/// Returns an error if the TOML is malformed.
///
/// # Example
/// ```
/// use gg_core::config::parse_config;
/// let config = parse_config("[render]\ncolumns = 80\n").unwrap();
/// assert_eq!(config.render.columns, 80);
/// assert_eq!(config.render.alphabet, "Standard");
/// ```
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = AppConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.alphabet {
            config.render.alphabet = v;
        }
        if let Some(v) = r.columns {
            config.render.columns = v;
        }
        if let Some(v) = r.preserve_color {
            config.render.preserve_color = v;
        }
        if let Some(v) = r.filter {
            config.render.filter = v;
        }
        if let Some(v) = r.format {
            config.render.format = v;
        }
        if let Some(v) = r.trailing_newline {
            config.render.trailing_newline = v;
        }
    }

    if let Some(p) = file.page {
        if let Some(v) = p.font_size {
            config.page.font_size = v;
        }
        if let Some(v) = p.foreground {
            config.page.foreground = v;
        }
        if let Some(v) = p.background {
            config.page.background = v;
        }
    }

    if let Some(s) = file.source
        && let Some(v) = s.max_side
    {
        config.source.max_side = v;
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gg_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn shipped_default_file_matches_defaults() {
        let shipped = include_str!("../../../config/default.toml");
        assert_eq!(parse_config(shipped).unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = parse_config(
            r##"
            [render]
            alphabet = "Complex"
            preserve_color = true
            format = "Html"
            filter = "Nearest"

            [page]
            foreground = "#00ff00"
            "##,
        )
        .unwrap();
        assert_eq!(config.render.alphabet, "Complex");
        assert!(config.render.preserve_color);
        assert_eq!(config.render.format, OutputFormat::Html);
        assert_eq!(config.render.filter, SampleFilter::Nearest);
        assert_eq!(config.render.columns, 100);
        assert!(config.render.trailing_newline);
        assert_eq!(config.page.foreground, "#00ff00");
        assert_eq!(config.page.font_size, 10);
        assert_eq!(config.source.max_side, 4096);
    }

    #[test]
    fn values_are_clamped() {
        let config = parse_config("[render]\ncolumns = 5000\n[page]\nfont_size = 1\n").unwrap();
        assert_eq!(config.render.columns, MAX_COLUMNS);
        assert_eq!(config.page.font_size, MIN_FONT_SIZE);
        let config = parse_config("[render]\ncolumns = 3\n").unwrap();
        assert_eq!(config.render.columns, MIN_COLUMNS);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config("[render\ncolumns = ").is_err());
        assert!(parse_config("[render]\nformat = \"Gif\"\n").is_err());
    }

    #[test]
    fn unknown_alphabet_surfaces_at_resolution() {
        let config = parse_config("[render]\nalphabet = \"Nonexistent\"\n").unwrap();
        assert!(matches!(
            config.render.to_options(),
            Err(CoreError::UnknownAlphabet { .. })
        ));
    }

    #[test]
    fn page_colors_parse() {
        let page = PageConfig::default();
        assert_eq!(page.colors().unwrap(), (Rgb::BLACK, Rgb::WHITE));
        let bad = PageConfig {
            foreground: "black".into(),
            ..PageConfig::default()
        };
        assert!(bad.colors().is_err());
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nalphabet = \"Minimal\"\ncolumns = 40").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.render.alphabet, "Minimal");
        assert_eq!(config.render.columns, 40);
        assert!(load_config(Path::new("/nonexistent/glyphgrid.toml")).is_err());
    }
}
