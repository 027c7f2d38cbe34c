use std::path::{Path, PathBuf};

use clap::Parser;
use gg_core::config::{AppConfig, OutputFormat, SampleFilter};

/// glyphgrid — image vers ASCII art, couleur par glyphe en option.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source : PNG, JPEG, BMP, GIF (première frame).
    pub image: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Alphabet de glyphes : Standard, Complex, Simple, Minimal.
    #[arg(long)]
    pub alphabet: Option<String>,

    /// Largeur en caractères (20 à 200).
    #[arg(long)]
    pub columns: Option<u32>,

    /// Préserver la couleur de chaque cellule.
    #[arg(long, default_value_t = false)]
    pub color: bool,

    /// Format de sortie : plain, html, ansi, page.
    #[arg(long)]
    pub format: Option<String>,

    /// Échantillonnage : area, nearest.
    #[arg(long)]
    pub filter: Option<String>,

    /// Fichier d'export. Texte brut sans balisage, sauf pour --format page.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pas de saut de ligne après la dernière ligne.
    #[arg(long, default_value_t = false)]
    pub no_trailing_newline: bool,

    /// Re-rendre à chaque modification de l'image ou de la config.
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Lister les alphabets disponibles et quitter.
    #[arg(long, default_value_t = false)]
    pub list_alphabets: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// The image to render.
    ///
    /// # Errors
    /// Returns an error if no image was given.
    pub fn validate_source(&self) -> anyhow::Result<&Path> {
        match self.image.as_deref() {
            Some(path) => Ok(path),
            None => anyhow::bail!("Aucune image spécifiée. Usage : glyphgrid <IMAGE> [OPTIONS]"),
        }
    }

    /// Apply command-line overrides on top of a loaded config, then clamp.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ref alphabet) = self.alphabet {
            config.render.alphabet.clone_from(alphabet);
        }
        if let Some(columns) = self.columns {
            config.render.columns = columns;
        }
        if self.color {
            config.render.preserve_color = true;
        }
        if let Some(ref format) = self.format {
            config.render.format = match format.to_ascii_lowercase().as_str() {
                "plain" | "text" => OutputFormat::Plain,
                "html" => OutputFormat::Html,
                "ansi" => OutputFormat::Ansi,
                "page" => OutputFormat::Page,
                _ => {
                    log::warn!("Format inconnu '{format}', utilisation du défaut.");
                    config.render.format
                }
            };
        }
        if let Some(ref filter) = self.filter {
            config.render.filter = match filter.to_ascii_lowercase().as_str() {
                "area" | "box" => SampleFilter::Area,
                "nearest" => SampleFilter::Nearest,
                _ => {
                    log::warn!("Filtre inconnu '{filter}', utilisation du défaut.");
                    config.render.filter
                }
            };
        }
        if self.no_trailing_newline {
            config.render.trailing_newline = false;
        }
        config.clamp_all();
    }
}
