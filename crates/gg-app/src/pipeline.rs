use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use gg_core::config::AppConfig;
use gg_core::frame::{Dimensions, RenderedArt};
use gg_export::file::{export, render_output};

use crate::cli::Cli;
use crate::hotreload;

/// Charge l'image et produit la grille de glyphes pour `config`.
///
/// # Errors
/// Returns an error for an unknown alphabet, an unreadable or zero-area
/// image, or a failed pre-scaling.
pub fn render_image(image: &Path, config: &AppConfig) -> Result<RenderedArt> {
    let options = config.render.to_options()?;
    let frame = gg_source::image::load_image(image)?;
    // Rows from the native size, before any pre-scaling.
    let dims = Dimensions::for_image(frame.width, frame.height, options.columns)?;
    let frame = gg_source::resize::fit_within(frame, config.source.max_side)?;
    let art = gg_ascii::render_at(&frame, dims, &options)?;
    log::info!(
        "Rendu {}×{} ({}, couleur={})",
        art.columns,
        art.rows,
        options.alphabet.name,
        options.preserve_color
    );
    Ok(art)
}

/// Écrit l'art : export fichier si `output`, sinon stdout au format choisi.
///
/// # Errors
/// Returns an error if writing fails or the page style is invalid.
pub fn emit(art: &RenderedArt, config: &AppConfig, output: Option<&Path>) -> Result<()> {
    let render = &config.render;
    match output {
        Some(path) => export(art, path, render.format, render.trailing_newline, &config.page),
        None => {
            let text = render_output(art, render.format, render.trailing_newline, &config.page)?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Écriture stdout impossible")
        }
    }
}

/// Un rendu complet, de l'image au texte émis.
///
/// # Errors
/// See [`render_image`] and [`emit`].
pub fn run_once(image: &Path, config: &AppConfig, output: Option<&Path>) -> Result<()> {
    let art = render_image(image, config)?;
    emit(&art, config, output)
}

/// Mode surveillance : re-rend à chaque modification de l'image ou de la
/// config. Les rendus ne se chevauchent jamais ; un échec est loggé et la
/// surveillance continue.
///
/// # Errors
/// Returns an error if the watcher cannot be started.
pub fn watch(cli: &Cli, image: &Path, config: AppConfig) -> Result<()> {
    let config = Arc::new(ArcSwap::from_pointee(config));
    let (tx, rx) = flume::unbounded();
    let _watcher = hotreload::spawn_watcher(image, cli, &config, tx)?;

    let output = cli.output.as_deref();
    if let Err(e) = run_once(image, &config.load(), output) {
        log::error!("Rendu impossible : {e:#}");
    }
    log::info!("Surveillance de {} (Ctrl+C pour quitter)", image.display());

    while let Ok(change) = rx.recv() {
        // Coalesce bursts: one save often fires several events.
        let pending = rx.drain().count();
        log::debug!("Changement {change:?} (+{pending} en attente)");
        if let Err(e) = run_once(image, &config.load(), output) {
            log::error!("Rendu impossible : {e:#}");
        }
    }
    Ok(())
}

/// Resolve config: file if present, defaults otherwise, then CLI overrides.
///
/// # Errors
/// Returns an error if the config file exists but cannot be parsed.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if cli.config.exists() {
        gg_core::config::load_config(&cli.config)?
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        AppConfig::default()
    };
    cli.apply_overrides(&mut config);
    Ok(config)
}
