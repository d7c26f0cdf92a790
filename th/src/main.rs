use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{debug, info};
use std::error::Error as _;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tmplhtml::cli::Cli;
use tmplhtml::config::Config;
use tmplhtml::{INVALID_DIRECTORY, PROMPT, RenameError, RenameReport, Renamer};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()
        .context("Logger already initialized")?;
    Ok(())
}

/// Ask for the root directory on stdin; EOF yields an empty path
fn prompt_for_root() -> Result<PathBuf> {
    let mut stdout = io::stdout();
    print!("{}", PROMPT);
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read directory path from stdin")?;

    Ok(PathBuf::from(line.trim()))
}

fn print_failures(report: &RenameReport) {
    for failure in &report.failures {
        match failure.source() {
            Some(source) => eprintln!("{} {}: {}", "✗".red(), failure, source),
            None => eprintln!("{} {}", "✗".red(), failure),
        }
    }
    eprintln!(
        "{} renamed, {} skipped, {} failed",
        report.renamed.len().to_string().green(),
        report.skipped.len().to_string().yellow(),
        report.failures.len().to_string().red()
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let options = cli.rename_options(&config);
    debug!("Effective options: {:?}", options);

    let root = match &cli.path {
        Some(path) => path.clone(),
        None => prompt_for_root()?,
    };

    let renamer = match Renamer::new(&root, options) {
        Ok(renamer) => renamer,
        Err(RenameError::NotADirectory { path }) => {
            info!("Rejected root {}", path.display());
            println!("{}", INVALID_DIRECTORY);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = renamer
        .run(&mut out)
        .context(format!("Aborted renaming under {}", renamer.root().display()))?;
    out.flush()?;

    if !report.is_success() {
        print_failures(&report);
        return Err(eyre::eyre!("{} file(s) could not be renamed", report.failures.len()));
    }

    Ok(())
}
