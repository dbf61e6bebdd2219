use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use softproof::cli::RenderArgs;
use softproof::models::ProofConfig;
use softproof::services::{self, ProofPipeline};

#[derive(Parser)]
#[command(name = "softproof")]
#[command(about = "Spectral soft proofs of ink on rough paper")]
struct Cli {
    /// Configuration file (default: $SOFTPROOF_CONFIG, then ./softproof.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only report warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Report per-component details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Options for the default render command
    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one proof to a PNG file (the default)
    Render(RenderArgs),
    /// Render every line of a batch script
    Batch {
        /// Script with one set of render options per line
        #[arg(default_value = services::batch::DEFAULT_SCRIPT)]
        script: PathBuf,
    },
    /// Extract sample descriptions, batch script and config
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded samples without extracting
        #[arg(long)]
        list: bool,
    },
    /// Print the colour of every material and light curve
    Swatch(RenderArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "softproof=warn,proof_render=warn"
    } else if cli.verbose {
        "softproof=debug,proof_render=debug"
    } else {
        "softproof=info,proof_render=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Render(args)) => run_render_command(cli.config, &[&cli.render, &args]),
        Some(Commands::Batch { script }) => run_batch_command(cli.config, &script),
        Some(Commands::Init { dir, force, list }) => run_init_command(dir, force, list),
        Some(Commands::Swatch(args)) => run_swatch_command(cli.config, &[&cli.render, &args]),
        None => run_render_command(cli.config, &[&cli.render]),
    }
}

/// Config file overlaid with the command-line options, later ones winning.
fn load_config(path: Option<PathBuf>, args: &[&RenderArgs]) -> anyhow::Result<ProofConfig> {
    let mut config = ProofConfig::load(path.as_deref())?;
    for overrides in args {
        overrides.apply(&mut config);
    }
    Ok(config)
}

/// Render a single proof
fn run_render_command(config_path: Option<PathBuf>, args: &[&RenderArgs]) -> anyhow::Result<()> {
    let config = load_config(config_path, args)?;
    let result = services::render_proof(&config).map_err(|e| {
        let stage = if e.is_setup() { "set up" } else { "render" };
        let output = config.output_path();
        anyhow::Error::new(e).context(format!("Could not {stage} proof {}", output.display()))
    })?;
    println!(
        "Rendered {} ({}x{}) in {:.2}s",
        result.output.display(),
        result.stats.width,
        result.stats.height,
        result.elapsed.as_secs_f64()
    );
    Ok(())
}

/// Render every line of a batch script
fn run_batch_command(config_path: Option<PathBuf>, script: &Path) -> anyhow::Result<()> {
    let config = ProofConfig::load(config_path.as_deref())?;
    let report = services::run_batch(script, config)?;

    for path in &report.rendered {
        println!("  + {}", path.display());
    }
    if !report.failed.is_empty() || !report.skipped.is_empty() {
        println!(
            "\n{} lines failed, {} lines skipped (see warnings above)",
            report.failed.len(),
            report.skipped.len()
        );
    }
    Ok(())
}

/// Extract embedded samples to the filesystem
fn run_init_command(dir: PathBuf, force: bool, list: bool) -> anyhow::Result<()> {
    use softproof::assets::SampleAssets;

    if list {
        println!("Embedded samples:\n");
        for f in SampleAssets::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let report = SampleAssets::new(dir).init(force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Print XYZ, L*a*b* and RGB for every curve
fn run_swatch_command(config_path: Option<PathBuf>, args: &[&RenderArgs]) -> anyhow::Result<()> {
    let config = load_config(config_path, args)?;
    let pipeline = ProofPipeline::load(&config)?;

    println!(
        "{:<16} {:>9} {:>9} {:>9}   {:>7} {:>7} {:>7}   {:>3} {:>3} {:>3}",
        "curve", "X", "Y", "Z", "L*", "a*", "b*", "R", "G", "B"
    );
    for entry in services::swatches(&pipeline) {
        println!(
            "{:<16} {:>9.4} {:>9.4} {:>9.4}   {:>7.2} {:>7.2} {:>7.2}   {:>3} {:>3} {:>3}",
            entry.name,
            entry.xyz.x,
            entry.xyz.y,
            entry.xyz.z,
            entry.lab.l,
            entry.lab.a,
            entry.lab.b,
            entry.rgb.r,
            entry.rgb.g,
            entry.rgb.b
        );
    }
    Ok(())
}
