//! Mirroring input paths onto the destination tree and writing outputs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::util::absolute_path;

/// Source and destination roots. Both are absolute and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    src_root: PathBuf,
    dest_root: PathBuf,
}

impl PathPair {
    /// Resolve both roots to absolute paths.
    pub fn new(src_root: impl AsRef<Path>, dest_root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            src_root: absolute_path(src_root.as_ref())?,
            dest_root: absolute_path(dest_root.as_ref())?,
        })
    }

    pub fn src_root(&self) -> &Path {
        &self.src_root
    }

    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Directory the outputs for `html_path` are written to: the file's
    /// directory relative to the source root, re-rooted at the destination.
    pub fn dest_dir(&self, html_path: &Path) -> Result<PathBuf> {
        let html_dir = html_path
            .parent()
            .ok_or_else(|| Error::InvalidPath(html_path.to_path_buf()))?;
        let relative = html_dir
            .strip_prefix(&self.src_root)
            .map_err(|_| Error::OutsideSourceRoot {
                path: html_path.to_path_buf(),
                root: self.src_root.clone(),
            })?;
        Ok(self.dest_root.join(relative))
    }

    /// Where the bundle and rewritten HTML for `html_path` end up.
    pub fn outputs(&self, html_path: &Path, bundle_name: &str) -> Result<OutputPaths> {
        let file_name = html_path
            .file_name()
            .ok_or_else(|| Error::InvalidPath(html_path.to_path_buf()))?;
        let dir = self.dest_dir(html_path)?;
        Ok(OutputPaths {
            bundle: dir.join(bundle_name),
            html: dir.join(file_name),
            dir,
        })
    }
}

/// Output locations for one HTML input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub bundle: PathBuf,
    pub html: PathBuf,
}

/// Create the output directory, then write the bundle followed by the HTML.
///
/// Both files are truncated and replaced.
pub fn write_outputs(outputs: &OutputPaths, bundle: &[u8], html: &[u8]) -> Result<()> {
    fs::create_dir_all(&outputs.dir).map_err(|source| Error::CreateDir {
        path: outputs.dir.clone(),
        source,
    })?;
    write_file(&outputs.bundle, bundle)?;
    write_file(&outputs.html, html)?;
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let to_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(to_error)?;
    writer.flush().map_err(to_error)?;
    debug!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrors_relative_directory() {
        let paths = PathPair::new("/a", "/b").unwrap();
        let out = paths.outputs(Path::new("/a/x/page.html"), "abc.js").unwrap();
        assert_eq!(out.dir, PathBuf::from("/b/x"));
        assert_eq!(out.html, PathBuf::from("/b/x/page.html"));
        assert_eq!(out.bundle, PathBuf::from("/b/x/abc.js"));
    }

    #[test]
    fn test_file_at_source_root() {
        let paths = PathPair::new("/a", "/b").unwrap();
        assert_eq!(
            paths.dest_dir(Path::new("/a/index.html")).unwrap(),
            PathBuf::from("/b")
        );
    }

    #[test]
    fn test_roots_are_normalized() {
        let paths = PathPair::new("/a/./src/..", "/b/out/").unwrap();
        assert_eq!(paths.src_root(), Path::new("/a"));
        assert_eq!(paths.dest_root(), Path::new("/b/out"));
    }

    #[test]
    fn test_outside_source_root() {
        let paths = PathPair::new("/a", "/b").unwrap();
        let err = paths.dest_dir(Path::new("/elsewhere/page.html")).unwrap_err();
        assert!(matches!(err, Error::OutsideSourceRoot { .. }));
        // A sibling directory sharing the prefix is not under the root
        assert!(paths.dest_dir(Path::new("/ab/page.html")).is_err());
    }

    #[test]
    fn test_write_outputs_creates_and_replaces() {
        let tmp = tempfile::tempdir().unwrap();
        let outputs = OutputPaths {
            dir: tmp.path().join("deep/er"),
            bundle: tmp.path().join("deep/er/h.js"),
            html: tmp.path().join("deep/er/p.html"),
        };

        write_outputs(&outputs, b"long bundle contents", b"<p>1</p>").unwrap();
        write_outputs(&outputs, b"short", b"<p>2</p>").unwrap();

        assert_eq!(fs::read(&outputs.bundle).unwrap(), b"short");
        assert_eq!(fs::read(&outputs.html).unwrap(), b"<p>2</p>");
    }
}
