use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use upversion::cli::run_upversion;
use upversion::replacer::ReplaceMode;
use upversion::settings::{Overrides, Settings};
use upversion::ui;

#[derive(clap::Parser)]
#[command(
    name = "upversion",
    version,
    about = "Update version numbers and copyright years across a repository",
    long_about = "Update version numbers and copyright years across a repository.\n\n\
        Versions and years are read from OLD_VERSION, NEW_VERSION, OLD_YEAR and NEW_YEAR."
)]
struct Args {
    #[arg(short, long, help = "Configuration file path (default: search the repository root)")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Repository root (default: enclosing git working tree)")]
    root: Option<PathBuf>,

    #[arg(long, help = "Report what would change without writing files")]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let overrides = Overrides {
        config: args.config,
        root: args.root,
        dry_run: args.dry_run,
    };

    if let Err(e) = run(&overrides) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(overrides: &Overrides) -> Result<()> {
    let settings = Settings::from_env(overrides)?;
    let dry_run = settings.mode == ReplaceMode::DryRun;

    ui::display_run_header(
        &settings.old_version,
        &settings.new_version,
        &settings.old_year,
        &settings.new_year,
    );
    if dry_run {
        ui::display_status("Dry run: no files will be written");
    }

    let mut reporter = ui::ConsoleReporter::new(&settings.root);
    let report = run_upversion(&settings, &mut reporter)?;

    ui::display_summary(&report, dry_run);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
