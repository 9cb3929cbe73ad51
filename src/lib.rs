//! # jsbundle
//!
//! Build-time bundling of the external scripts an HTML page loads from its
//! `<head>`.
//!
//! For each page, the `<script src="...">` elements that are direct children
//! of `<head>` are read in document order, joined with [`SEPARATOR`], and
//! written to a file named after the SHA-1 [`Fingerprint`] of the joined
//! bytes. The page is rewritten to load that single file instead. Output
//! mirrors the input tree from a source root onto a destination root.
//!
//! ## Quick Start
//!
//! ```no_run
//! use jsbundle::{Bundler, PathPair};
//!
//! let bundler = Bundler::new(PathPair::new("site", "dist").unwrap());
//! let batch = bundler.process_all(["site/index.html", "site/about/index.html"]);
//! for (path, err) in batch.failures() {
//!     eprintln!("{}: {err}", path.display());
//! }
//! ```
//!
//! ## Working with documents
//!
//! The individual steps are available on their own:
//!
//! ```
//! use jsbundle::dom::{parse_str, serialize_document};
//! use jsbundle::{Fingerprint, collect_scripts, find_head, rewrite_head};
//!
//! let mut doc = parse_str("<html><head><script src=\"a.js\"></script></head></html>");
//! let head = find_head(&doc.dom).unwrap();
//! let scripts = collect_scripts(&doc.dom, head);
//! rewrite_head(&mut doc.dom, head, &scripts, &Fingerprint::of(b"foo"));
//!
//! let html = String::from_utf8(serialize_document(&doc.dom).unwrap()).unwrap();
//! assert!(html.contains("0beec7b5ea3f0fdbc95d0dd47f3c5bc275da8a33.js"));
//! ```

pub mod dom;
pub mod error;
pub mod pipeline;
pub(crate) mod util;

pub use error::{Error, Result};
pub use util::absolute_path;
pub use pipeline::{
    BatchReport, Bundle, BundleOptions, BundleReport, Bundler, Fingerprint, OutputPaths, PathPair,
    Resolved, SEPARATOR, ScriptRef, collect_scripts, find_head, resolve_sources, rewrite_head,
};
