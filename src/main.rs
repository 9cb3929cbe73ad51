//! jsbundle - bundle head scripts into one fingerprinted file

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use jsbundle::{BundleOptions, Bundler, Error, PathPair, Result, absolute_path};

#[derive(Parser)]
#[command(name = "jsbundle")]
#[command(version, about = "Bundle the head scripts of HTML pages into one fingerprinted file", long_about = None)]
#[command(after_help = "EXAMPLES:
    jsbundle --srcroot site --destroot dist site/index.html
    jsbundle --srcroot site --destroot dist $(find site -name '*.html')")]
struct Cli {
    /// Root of the source file tree
    #[arg(long, value_name = "DIR")]
    srcroot: PathBuf,

    /// Root of the rewritten file tree
    #[arg(long, value_name = "DIR")]
    destroot: PathBuf,

    /// HTML files to rewrite (must lie under the source root)
    #[arg(value_name = "HTML", required = true)]
    html: Vec<PathBuf>,

    /// Fail on malformed markup instead of repairing it
    #[arg(long)]
    strict: bool,

    /// Run the pipeline without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let bundler = match configure(&cli) {
        Ok(bundler) => bundler,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = 0usize;
    for html in &cli.html {
        if !cli.quiet {
            println!("reading {}", display_path(html));
        }
        match bundler.process(html) {
            Ok(report) => {
                if !cli.quiet {
                    let verb = if cli.dry_run { "would write" } else { "writing" };
                    println!("{verb} JS:   {}", report.bundle.display());
                    println!("{verb} HTML: {}", report.html.display());
                    println!();
                }
            }
            Err(e) => {
                eprintln!("error: {}: {e}", html.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} file(s) failed", cli.html.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn configure(cli: &Cli) -> Result<Bundler> {
    let paths = PathPair::new(&cli.srcroot, &cli.destroot)?;
    if !paths.src_root().is_dir() {
        return Err(Error::Config(format!(
            "source root {} is not a directory",
            paths.src_root().display()
        )));
    }
    let options = BundleOptions {
        strict_parse: cli.strict,
        dry_run: cli.dry_run,
    };
    Ok(Bundler::new(paths).with_options(options))
}

/// Absolute form of an input path for display, falling back to it as given.
fn display_path(path: &Path) -> String {
    absolute_path(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
