mod legacy;

use anyhow::Result;
use log::{error, info};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "objson_convert")]
struct CliArgs {
    /// Directory to scan for legacy `*.objson` files
    #[structopt(default_value = ".")]
    dir: String,
    /// Output directory, created if absent
    #[structopt(short = "o", long = "output", default_value = "converted")]
    output: String,
    /// Output debug info
    #[structopt(long = "verbose")]
    verbose: bool,
}

/// Happens during setup
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Invalid glob pattern")]
    PatternError(#[from] glob::PatternError),
    #[error("Invalid glob")]
    GlobError(#[from] glob::GlobError),
    #[error("{0} file(s) failed to convert")]
    ConversionFailures(usize),
}

const GLOB_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    Ok(convert_all(args)?)
}

fn convert_all(args: CliArgs) -> Result<()> {
    let output_dir = Path::new(&args.output);
    std::fs::create_dir_all(output_dir)?;

    let pattern = format!("{}/*.objson", args.dir);
    let paths = glob::glob_with(&pattern, GLOB_OPTIONS).map_err(CliError::from)?;

    // Files convert independently; one failure never corrupts another file's
    // output, but it must not be silently absorbed either.
    let mut failures = 0usize;
    for path in paths {
        let path: PathBuf = path.map_err(CliError::from)?;
        if path.is_dir() {
            continue;
        }

        info!("Converting `{}`", path.display());
        if let Err(err) = legacy::convert_file(&path, output_dir) {
            error!("Failed to convert `{}`: {}", path.display(), err);
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(CliError::ConversionFailures(failures).into());
    }
    Ok(())
}
