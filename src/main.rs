// Entry point: load (or synthesize) an HRTF set, run the localization
// pipeline once, report the estimate and render the figure.

use std::error::Error;
use std::fs::create_dir_all;
use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use earshot::audio::writer::write_binaural_wav;
use earshot::cli::Args;
use earshot::config::AppConfig;
use earshot::hrtf::{ircam, sphere};
use earshot::pipeline::{localize, pick_random_index};
use earshot::plot::render_estimate;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut cfg = AppConfig::load_or_default(&args.config);
    if let Some(seed) = args.seed {
        cfg.stimulus.seed = seed;
    }

    let set = match &args.hrtf_dir {
        Some(dir) => ircam::load_subject(Path::new(dir), args.subject)?,
        None => sphere::generate(&cfg.sphere),
    };

    let true_index = match args.index {
        Some(index) if index >= set.num_indices() => {
            return Err(format!(
                "--index {} out of range (set has {} locations)",
                index,
                set.num_indices()
            )
            .into());
        }
        Some(index) => index,
        None => pick_random_index(&set, cfg.stimulus.seed),
    };

    let outcome = localize(&set, &cfg, true_index);

    if let Some(wav_path) = &args.wav {
        write_binaural_wav(Path::new(wav_path), set.fs as u32, &outcome.binaural)?;
        info!(path = %wav_path, "wrote binaural stimulus");
    }

    if !args.no_plot {
        let plot_path = Path::new(&args.plot);
        if let Some(parent) = plot_path.parent() {
            create_dir_all(parent)?;
        }
        render_estimate(plot_path, &set, &outcome)?;
        info!(path = %args.plot, "wrote figure");
    }

    Ok(())
}
