use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// IRCAM LISTEN directory of IRC_*_C_*.wav files
    /// (a synthetic spherical-head grid is used when omitted)
    #[arg(long)]
    pub hrtf_dir: Option<String>,

    /// IRCAM subject id
    #[arg(long, default_value_t = 1002)]
    pub subject: u32,

    /// True source location index (random when omitted)
    #[arg(long)]
    pub index: Option<usize>,

    /// Master RNG seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to config TOML
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Output figure path
    #[arg(long, default_value = "target/plots/localization.png")]
    pub plot: String,

    /// Skip the figure
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Write the binaural stimulus to a wav file
    #[arg(long)]
    pub wav: Option<String>,
}
