use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use gg_core::config::AppConfig;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::cli::Cli;

/// Ce qui a changé sur disque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// L'image source a été réécrite.
    Image,
    /// La config a été rechargée (et stockée dans l'ArcSwap).
    Config,
}

/// Lance un watcher sur l'image et le fichier config.
///
/// Config edits are reloaded, CLI overrides re-applied, and stored into
/// `config`; a failed reload keeps the previous config. Each relevant event
/// is forwarded on `tx`. Parent directories are watched so editors that
/// replace files by rename are still seen.
///
/// Retourne le Watcher (doit rester vivant tant que la surveillance tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or a path cannot be watched.
pub fn spawn_watcher(
    image_path: &Path,
    cli: &Cli,
    config: &Arc<ArcSwap<AppConfig>>,
    tx: flume::Sender<Change>,
) -> Result<impl Watcher + use<>> {
    let config = Arc::clone(config);
    let config_path = cli.config.clone();
    let image_name = image_path.file_name().map(OsString::from);
    let config_name = config_path.file_name().map(OsString::from);
    let overrides = cli.clone();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let Ok(event) = res else {
            return;
        };
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }
        let touches = |name: &Option<OsString>| {
            event
                .paths
                .iter()
                .any(|p| name.is_some() && p.file_name() == name.as_deref())
        };

        if touches(&config_name) {
            match gg_core::config::load_config(&config_path) {
                Ok(mut new_config) => {
                    overrides.apply_overrides(&mut new_config);
                    config.store(Arc::new(new_config));
                    log::info!("Config rechargée depuis {}", config_path.display());
                    let _ = tx.send(Change::Config);
                }
                Err(e) => {
                    log::warn!("Erreur de rechargement config : {e:#}");
                }
            }
        }
        if touches(&image_name) {
            let _ = tx.send(Change::Image);
        }
    })?;

    watcher.watch(watch_dir(image_path), RecursiveMode::NonRecursive)?;
    if cli.config.exists() {
        let dir = watch_dir(&cli.config);
        if dir != watch_dir(image_path) {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
        }
    }
    Ok(watcher)
}

/// Parent directory, `.` for bare file names.
fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use clap::Parser;

    use super::*;

    const PATIENCE: Duration = Duration::from_secs(5);

    /// Atomic replace, so the watcher never reads a half-written file.
    fn replace(path: &Path, content: &[u8]) {
        let staging = path.with_extension("staging");
        std::fs::write(&staging, content).unwrap();
        std::fs::rename(&staging, path).unwrap();
    }

    /// Wait until `done` holds after some received change, or time out.
    fn wait_until(rx: &flume::Receiver<Change>, mut done: impl FnMut(Change) -> bool) -> bool {
        let deadline = Instant::now() + PATIENCE;
        while let Some(left) = deadline.checked_duration_since(Instant::now()) {
            match rx.recv_timeout(left) {
                Ok(change) if done(change) => return true,
                Ok(_) => {}
                Err(_) => return false,
            }
        }
        false
    }

    #[test]
    fn config_and_image_edits_are_forwarded() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("glyphgrid.toml");
        let image_path = dir.path().join("photo.png");
        std::fs::write(&config_path, "[render]\ncolumns = 40\n").unwrap();
        std::fs::write(&image_path, b"v1").unwrap();

        let cli = Cli::try_parse_from([
            "glyphgrid",
            image_path.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
            "--alphabet",
            "Simple",
        ])
        .unwrap();
        let mut initial = gg_core::config::load_config(&config_path).unwrap();
        cli.apply_overrides(&mut initial);
        let config = Arc::new(ArcSwap::from_pointee(initial));
        let (tx, rx) = flume::unbounded();
        let _watcher = spawn_watcher(&image_path, &cli, &config, tx).unwrap();

        // Valid edit: stored, CLI overrides re-applied on top.
        replace(&config_path, b"[render]\ncolumns = 60\n");
        let stored = wait_until(&rx, |c| {
            c == Change::Config && config.load().render.columns == 60
        });
        assert!(stored);
        assert_eq!(config.load().render.alphabet, "Simple");

        // Broken edit: previous config kept, nothing announced.
        std::thread::sleep(Duration::from_millis(200));
        rx.drain().for_each(drop);
        replace(&config_path, b"[render\ncolumns = ");
        assert!(!wait_until(&rx, |c| c == Change::Config));
        assert_eq!(config.load().render.columns, 60);

        // Image edit.
        replace(&image_path, b"v2");
        assert!(wait_until(&rx, |c| c == Change::Image));
    }

    #[test]
    fn bare_names_watch_current_dir() {
        assert_eq!(watch_dir(Path::new("photo.png")), Path::new("."));
        assert_eq!(watch_dir(Path::new("img/photo.png")), Path::new("img"));
    }
}
