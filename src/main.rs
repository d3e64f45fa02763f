mod audio;
mod cli;
mod config;
mod encode;
mod error;
mod tape;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use cli::Cli;
use encode::tap::{read_tap, TapEncoder};
use tape::path::resolve_output_path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    run(&cli)?;
    Ok(())
}

fn run(cli: &Cli) -> Result<PathBuf> {
    // Explicit --config path, or auto-detect wav2tap.toml / user config
    let cfg = match cli.config.clone().or_else(config::find_config) {
        Some(path) => match config::load_config(&path) {
            Some(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            None => {
                log::warn!("Failed to load config from {}", path.display());
                config::Config::default()
            }
        },
        None => config::Config::default(),
    };

    let cpu_freq = cli.resolve_cpu_freq(&cfg.tape);
    if !(cpu_freq.is_finite() && cpu_freq > 0.0) {
        anyhow::bail!("CPU frequency must be a positive number, got {}", cpu_freq);
    }

    // Must fail before anything is decoded or written
    let output = resolve_output_path(&cli.input, cli.output.as_deref())?;

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    log::info!("Input: {}", cli.input.display());
    log::info!("Output: {}", output.display());
    log::info!("CPU frequency: {} Hz", cpu_freq);

    let matrix = audio::decode::decode_audio(&cli.input)?;
    let (pulses, stats) = tape::pulses_from_samples(&matrix, cpu_freq);
    log::info!(
        "Pulses: {} ({} overflowed, {} negative, written as 0)",
        stats.pulses,
        stats.overflows,
        stats.negatives
    );

    let mut encoder = TapEncoder::create(&output)?;
    encoder.write_pulses(&pulses)?;
    encoder.finish()?;

    if cli.verify {
        let (header, payload) = read_tap(&output)?;
        if payload != pulses {
            anyhow::bail!("Verification failed: payload differs from computed pulses");
        }
        log::info!(
            "Verified {}: version {}, {} pulses",
            output.display(),
            header.version,
            header.payload_len
        );
    }

    log::info!("Done! Output: {}", output.display());
    Ok(output)
}
