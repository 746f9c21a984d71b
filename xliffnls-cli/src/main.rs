use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xliffnls_cli::{LayoutOverrides, TaskReport, load_layout, parse_locales, tasks};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project root; package.nls files are written here
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Localization directory holding xliff/ and i18n/, relative to the root
    #[arg(long, global = true)]
    localization_dir: Option<PathBuf>,

    /// Destination directory of localizedConstants.ts, relative to the root
    #[arg(long, global = true)]
    constants_dir: Option<PathBuf>,

    /// TOML file with `root`, `localization-dir` and `constants-dir` keys
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v for debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert every non-English XLIFF into an i18n JSON dictionary.
    Json {
        /// Only these locales (vendor code or public tag, comma separated or repeated)
        #[arg(short, long = "locale")]
        locales: Vec<String>,
    },

    /// Generate localizedConstants.ts from the English constants XLIFF.
    Constants,

    /// Generate package.nls.json from the English package XLIFF.
    PackageNls,

    /// Generate package.nls.<tag>.json for every other locale.
    PackageNlsLocalized {
        /// Only these locales (vendor code or public tag, comma separated or repeated)
        #[arg(short, long = "locale")]
        locales: Vec<String>,
    },

    /// Run every task, English package metadata before the localized ones.
    All {
        /// Only these locales (vendor code or public tag, comma separated or repeated)
        #[arg(short, long = "locale")]
        locales: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let default_level = if verbose > 0 { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<TaskReport> {
    let layout = load_layout(
        args.config.as_deref(),
        LayoutOverrides {
            root: args.root,
            localization_dir: args.localization_dir,
            constants_dir: args.constants_dir,
        },
    )?;

    match args.commands {
        Commands::Json { locales } => tasks::xliff_to_json(&layout, &parse_locales(&locales)?),
        Commands::Constants => Ok(tasks::xliff_to_constants(&layout)),
        Commands::PackageNls => Ok(tasks::generate_english_package_nls(&layout)),
        Commands::PackageNlsLocalized { locales } => {
            tasks::xliff_to_package_nls(&layout, &parse_locales(&locales)?)
        }
        Commands::All { locales } => tasks::run_all(&layout, &parse_locales(&locales)?),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(report) if report.is_success() => {
            println!("✅ Wrote {} file(s)", report.written.len());
            ExitCode::SUCCESS
        }
        Ok(report) => {
            println!(
                "❌ {} file(s) failed, {} written",
                report.failures.len(),
                report.written.len()
            );
            for failure in &report.failures {
                eprintln!("Error: {}: {:#}", failure.input.display(), failure.error);
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
