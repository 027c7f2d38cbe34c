use anyhow::Result;
use clap::Parser;
use gg_core::charset::ALPHABETS;

pub mod cli;
pub mod hotreload;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    if cli.list_alphabets {
        for alphabet in ALPHABETS {
            println!("{:<10} {:>3}  \"{}\"", alphabet.name, alphabet.len(), alphabet.glyphs);
        }
        return Ok(());
    }

    // 3. Valider la source
    let image = cli.validate_source()?;

    // 4. Charger la config + overrides CLI
    let config = pipeline::resolve_config(&cli)?;

    // 5. Rendu unique ou surveillance
    if cli.watch {
        pipeline::watch(&cli, image, config)
    } else {
        pipeline::run_once(image, &config, cli.output.as_deref())
    }
}
