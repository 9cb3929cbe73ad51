//! Document model: parse HTML into an arena tree and serialize it back.
//!
//! Parsing is delegated to html5ever through [`ArenaSink`], and serialization
//! to html5ever's HTML serializer through [`SerializableNode`]. Both are
//! browser-tolerant: malformed markup is repaired the way a browser would,
//! and the repairs are reported as diagnostics rather than failures.

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter};
pub use serialize::SerializableNode;
pub use tree_sink::{ArenaSink, NodeHandle};

use std::io::{self, Write};

use encoding_rs::Encoding;
use html5ever::driver::ParseOpts;
use html5ever::parse_document as parse_with_sink;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use log::trace;

use crate::util::{decode_text, encode_text, extract_meta_charset};

/// A parsed document together with the parser's diagnostics.
#[derive(Debug)]
pub struct ParsedDocument {
    pub dom: ArenaDom,
    pub errors: Vec<String>,
    /// Encoding the source bytes were decoded from.
    pub encoding: &'static Encoding,
}

impl ParsedDocument {
    /// Serialize the document back into the encoding it was read from, so a
    /// page's own charset declaration stays truthful.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let utf8 = serialize_document(&self.dom)?;
        if self.encoding.output_encoding() == encoding_rs::UTF_8 {
            return Ok(utf8);
        }
        let text =
            String::from_utf8(utf8).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(encode_text(&text, self.encoding).into_owned())
    }
}

/// Parse raw HTML bytes into an [`ArenaDom`].
///
/// Input that is not valid UTF-8 is decoded using the charset declared by a
/// `<meta>` tag, falling back to Windows-1252. The chosen encoding is kept on
/// the result for [`ParsedDocument::to_bytes`].
pub fn parse_document(bytes: &[u8]) -> ParsedDocument {
    let (text, encoding) = decode_text(bytes, extract_meta_charset(bytes));
    ParsedDocument {
        encoding,
        ..parse_str(&text)
    }
}

/// Parse an HTML string into an [`ArenaDom`].
pub fn parse_str(html: &str) -> ParsedDocument {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let sink = parse_with_sink(ArenaSink::new(), opts)
        .from_utf8()
        .one(html.as_bytes());
    let (dom, errors) = sink.into_parts();
    trace!("parsed {} nodes, {} diagnostics", dom.node_count(), errors.len());

    ParsedDocument {
        dom,
        errors,
        encoding: encoding_rs::UTF_8,
    }
}

/// Serialize the whole document as HTML into a writer.
pub fn write_document<W: Write>(dom: &ArenaDom, writer: W) -> io::Result<()> {
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(writer, &SerializableNode::new(dom, dom.document()), opts)
}

/// Serialize the whole document as UTF-8 HTML bytes.
pub fn serialize_document(dom: &ArenaDom) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_document(dom, &mut bytes)?;
    Ok(bytes)
}
