//! assetfs-gen: embed a directory tree as Rust source.
//!
//! # Usage
//!
//! ```bash
//! # Write src/assets.rs embedding ./static
//! assetfs-gen static -o src/assets.rs
//!
//! # Same, gated behind a feature and with custom names
//! assetfs-gen static -o src/web.rs --module web --function files --cfg 'feature = "embed"'
//!
//! # Read defaults from a TOML file; flags override it
//! assetfs-gen static --config assetfs.toml
//! ```

use anyhow::{bail, Context};
use assetfs_gen::{generate, Config, OsFs};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use std::process;

/// Embed a directory tree as gzip-compressed Rust source.
#[derive(Parser, Debug)]
#[command(name = "assetfs-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to embed
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// File to write the generated module to
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Name of the generated module (default: assets)
    #[arg(long, value_name = "NAME")]
    module: Option<String>,

    /// Name of the generated constructor function (default: assets)
    #[arg(long, value_name = "NAME")]
    function: Option<String>,

    /// Predicate for a #[cfg(..)] attribute on the generated module
    #[arg(long, value_name = "PREDICATE")]
    cfg: Option<String>,

    /// TOML file with generator settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.input.is_dir() {
        bail!("Not a directory: {}", args.input.display());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::new(PathBuf::new()),
    };
    if let Some(output) = args.output {
        config = config.with_output(output);
    }
    if let Some(module) = args.module {
        config = config.with_module_name(module);
    }
    if let Some(function) = args.function {
        config = config.with_function_name(function);
    }
    if let Some(cfg) = args.cfg {
        config = config.with_cfg(cfg);
    }
    if config.output.as_os_str().is_empty() {
        bail!("No output file given; pass --output or set `output` in the config file");
    }

    info!("Embedding {}", args.input.display());
    let written = generate(&config, &OsFs::new(&args.input))
        .with_context(|| format!("Failed to generate {}", config.output.display()))?;
    info!("Wrote {}", written.display());
    Ok(())
}
