//! Concatenating script sources and fingerprinting the result.

use std::fmt;

use super::resolve::ScriptRef;

/// Inserted between consecutive sources. Part of the fingerprinted bytes, so
/// changing it changes every bundle name.
pub const SEPARATOR: &[u8] = b"\n\n\n";

/// Lowercase hex SHA-1 digest of a bundle's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint exactly these bytes.
    pub fn of(bytes: &[u8]) -> Self {
        Self(sha1_smol::Sha1::from(bytes).digest().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the bundle: `<fingerprint>.js`.
    pub fn file_name(&self) -> String {
        format!("{}.js", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Concatenated script sources and their fingerprint.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub bytes: Vec<u8>,
    pub fingerprint: Fingerprint,
}

impl Bundle {
    /// Join raw source contents in order with [`SEPARATOR`].
    pub fn from_contents<'a, I>(contents: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut bytes = Vec::new();
        for (i, content) in contents.into_iter().enumerate() {
            if i > 0 {
                bytes.extend_from_slice(SEPARATOR);
            }
            bytes.extend_from_slice(content);
        }
        let fingerprint = Fingerprint::of(&bytes);
        Self { bytes, fingerprint }
    }

    /// Bundle resolved scripts in collection order.
    pub fn from_sources(sources: &[ScriptRef]) -> Self {
        Self::from_contents(sources.iter().map(|s| s.content.as_slice()))
    }

    /// File name the bundle is written under.
    pub fn file_name(&self) -> String {
        self.fingerprint.file_name()
    }
}
