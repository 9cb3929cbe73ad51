//! Resolving script `src` attributes to files and loading their contents.

use std::path::{Path, PathBuf};

use log::debug;

use crate::dom::{ArenaDom, ArenaNodeId};
use crate::error::{Error, Result};
use crate::util::normalize_path;

/// A script element whose source file has been loaded.
#[derive(Debug, Clone)]
pub struct ScriptRef {
    /// The `<script>` element in the document.
    pub node: ArenaNodeId,
    /// The `src` attribute as written in the document.
    pub src: String,
    /// Where the source was read from.
    pub path: PathBuf,
    /// Raw file contents.
    pub content: Vec<u8>,
}

/// Outcome of resolving the collected scripts of one document.
#[derive(Debug, Default)]
pub struct Resolved {
    /// Scripts to bundle, in document order.
    pub scripts: Vec<ScriptRef>,
    /// Scripts without a `src` attribute, left in place.
    pub skipped: Vec<ArenaNodeId>,
}

/// Load the source of every collected script relative to `html_dir`.
///
/// Scripts without `src` are skipped and reported in [`Resolved::skipped`]. The first unreadable
/// file aborts resolution for the whole document.
pub fn resolve_sources(
    dom: &ArenaDom,
    scripts: &[ArenaNodeId],
    html_dir: &Path,
) -> Result<Resolved> {
    let mut resolved = Resolved::default();

    for &node in scripts {
        let Some(src) = dom.get_attr(node, "src") else {
            debug!("skipping <script> without src");
            resolved.skipped.push(node);
            continue;
        };

        let path = script_path(html_dir, src)?;
        let content = std::fs::read(&path).map_err(|source| Error::ReadScript {
            path: path.clone(),
            source,
        })?;
        debug!("loaded {} ({} bytes)", path.display(), content.len());

        resolved.scripts.push(ScriptRef {
            node,
            src: src.to_string(),
            path,
            content,
        });
    }

    Ok(resolved)
}

/// Map a `src` value to a file path under `html_dir`.
///
/// Query strings and fragments are dropped. A leading `/` does not escape
/// `html_dir`: the value is always joined onto it.
pub fn script_path(html_dir: &Path, src: &str) -> Result<PathBuf> {
    if is_remote(src) {
        return Err(Error::RemoteScript(src.to_string()));
    }

    let file = src.split(['?', '#']).next().unwrap_or_default();
    let file = file.trim_start_matches('/');
    if file.is_empty() {
        return Err(Error::InvalidPath(PathBuf::from(src)));
    }

    Ok(normalize_path(&html_dir.join(file)))
}

fn is_remote(src: &str) -> bool {
    let lower = src.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}
