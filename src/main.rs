use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jacosum::cli::{self, Style};
use jacosum::config::Config;

/// jacosum: filtered JaCoCo coverage summaries across service modules.
#[derive(Parser)]
#[command(name = "jacosum", version, about)]
struct Cli {
    /// Directory the report pattern is resolved against [default: .]
    #[arg(long, env = "JACOSUM_ROOT")]
    root: Option<PathBuf>,

    /// Glob locating jacoco.xml reports, relative to --root
    /// [default: services/*/target/site/jacoco/jacoco.xml]
    #[arg(long, env = "JACOSUM_PATTERN")]
    pattern: Option<String>,

    /// Exclusion glob (repeatable). Replaces the built-in list when given.
    #[arg(long = "exclude", value_name = "GLOB")]
    exclusions: Vec<String>,

    /// Coverage percentage below which a per-file breakdown is printed
    /// [default: 80]
    #[arg(long, env = "JACOSUM_THRESHOLD")]
    threshold: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: Style,

    /// Log diagnostics to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Start from the built-in defaults and apply whatever was passed.
    fn to_config(&self) -> Config {
        let mut config = Config::default();
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(pattern) = &self.pattern {
            config.pattern = pattern.clone();
        }
        if !self.exclusions.is_empty() {
            config.exclusions = self.exclusions.clone();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.to_config();

    print!("{}", cli::cmd_summarize(&config, &cli.format)?);
    Ok(())
}
