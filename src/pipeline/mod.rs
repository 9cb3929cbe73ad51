//! The bundling pipeline: load, collect, resolve, bundle, rewrite, emit.
//!
//! # Example
//!
//! ```no_run
//! use jsbundle::{Bundler, PathPair};
//!
//! let paths = PathPair::new("site", "dist").unwrap();
//! let report = Bundler::new(paths).process("site/blog/index.html").unwrap();
//! println!("{} -> {}", report.input.display(), report.bundle.display());
//! ```

pub mod bundle;
pub mod collect;
pub mod emit;
pub mod resolve;
pub mod rewrite;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub use bundle::{Bundle, Fingerprint, SEPARATOR};
pub use collect::{collect_scripts, find_head};
pub use emit::{OutputPaths, PathPair, write_outputs};
pub use resolve::{Resolved, ScriptRef, resolve_sources, script_path};
pub use rewrite::rewrite_head;

use crate::dom::parse_document;
use crate::error::{Error, Result};
use crate::util::absolute_path;

/// Behaviour switches for a [`Bundler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleOptions {
    /// Fail on any HTML parse diagnostic instead of repairing silently.
    pub strict_parse: bool,
    /// Run every step but leave the filesystem untouched.
    pub dry_run: bool,
}

/// What happened to one HTML input.
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Absolute path of the HTML input.
    pub input: PathBuf,
    /// Where the bundle was (or would be) written.
    pub bundle: PathBuf,
    /// Where the rewritten HTML was (or would be) written.
    pub html: PathBuf,
    pub fingerprint: Fingerprint,
    /// Number of scripts folded into the bundle.
    pub bundled: usize,
    /// Number of `src`-less scripts left in place.
    pub skipped: usize,
}

/// Outcome of a batch: one entry per input, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<(PathBuf, Result<BundleReport>)>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &BundleReport> {
        self.results.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &Error)> {
        self.results
            .iter()
            .filter_map(|(p, r)| r.as_ref().err().map(|e| (p.as_path(), e)))
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Rewrites HTML files under a source root into a destination root.
#[derive(Debug, Clone)]
pub struct Bundler {
    paths: PathPair,
    options: BundleOptions,
}

impl Bundler {
    pub fn new(paths: PathPair) -> Self {
        Self {
            paths,
            options: BundleOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BundleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn paths(&self) -> &PathPair {
        &self.paths
    }

    pub fn options(&self) -> BundleOptions {
        self.options
    }

    /// Bundle one HTML file end to end.
    pub fn process(&self, html_path: impl AsRef<Path>) -> Result<BundleReport> {
        let input = absolute_path(html_path.as_ref())?;
        let html_dir = input
            .parent()
            .ok_or_else(|| Error::InvalidPath(input.clone()))?;
        // Fail on path mirroring before any script is read
        self.paths.dest_dir(&input)?;

        let raw = std::fs::read(&input)?;
        let mut parsed = parse_document(&raw);
        if !parsed.errors.is_empty() {
            if self.options.strict_parse {
                return Err(Error::Parse(parsed.errors.join("; ")));
            }
            debug!(
                "{}: repaired {} markup errors",
                input.display(),
                parsed.errors.len()
            );
        }

        let head = find_head(&parsed.dom)?;
        let scripts = collect_scripts(&parsed.dom, head);
        let resolved = resolve_sources(&parsed.dom, &scripts, html_dir)?;
        if !resolved.skipped.is_empty() {
            warn!(
                "{}: {} inline script(s) left in place",
                input.display(),
                resolved.skipped.len()
            );
        }

        let bundle = Bundle::from_sources(&resolved.scripts);
        let bundled: Vec<_> = resolved.scripts.iter().map(|s| s.node).collect();
        rewrite_head(&mut parsed.dom, head, &bundled, &bundle.fingerprint);
        let html = parsed.to_bytes()?;

        let outputs = self.paths.outputs(&input, &bundle.file_name())?;
        if self.options.dry_run {
            info!("dry run: not writing {}", outputs.dir.display());
        } else {
            write_outputs(&outputs, &bundle.bytes, &html)?;
        }
        info!(
            "{}: bundled {} script(s) into {}",
            input.display(),
            bundled.len(),
            bundle.file_name()
        );

        Ok(BundleReport {
            input,
            bundle: outputs.bundle,
            html: outputs.html,
            fingerprint: bundle.fingerprint,
            bundled: bundled.len(),
            skipped: resolved.skipped.len(),
        })
    }

    /// Bundle every input in order. A failing input is recorded and the
    /// batch moves on to the next one.
    pub fn process_all<I, P>(&self, inputs: I) -> BatchReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = BatchReport::default();
        for input in inputs {
            let path = input.as_ref().to_path_buf();
            let result = self.process(&path);
            if let Err(e) = &result {
                warn!("{}: {e}", path.display());
            }
            report.results.push((path, result));
        }
        report
    }
}
