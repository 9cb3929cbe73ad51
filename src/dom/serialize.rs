//! html5ever `Serialize` implementation for ArenaDom.

use std::io;

use html5ever::QualName;
use html5ever::serialize::{Serialize, Serializer, TraversalScope};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// A node of an [`ArenaDom`] that html5ever's serializer can walk.
pub struct SerializableNode<'a> {
    dom: &'a ArenaDom,
    id: ArenaNodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(dom: &'a ArenaDom, id: ArenaNodeId) -> Self {
        Self { dom, id }
    }
}

enum SerializeOp {
    Open(ArenaNodeId),
    Close(QualName),
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        // Explicit stack so deeply nested documents can't overflow the call stack
        let mut ops: Vec<SerializeOp> = match traversal_scope {
            TraversalScope::IncludeNode => vec![SerializeOp::Open(self.id)],
            TraversalScope::ChildrenOnly(_) => {
                let mut children: Vec<_> = self.dom.children(self.id).map(SerializeOp::Open).collect();
                children.reverse();
                children
            }
        };

        while let Some(op) = ops.pop() {
            match op {
                SerializeOp::Open(id) => {
                    let Some(node) = self.dom.get(id) else {
                        continue;
                    };
                    match &node.data {
                        ArenaNodeData::Element { name, attrs } => {
                            serializer.start_elem(
                                name.clone(),
                                attrs.iter().map(|a| (&a.name, a.value.as_str())),
                            )?;
                            ops.push(SerializeOp::Close(name.clone()));
                        }
                        ArenaNodeData::Document => {}
                        ArenaNodeData::Text(text) => {
                            serializer.write_text(text)?;
                            continue;
                        }
                        ArenaNodeData::Comment(text) => {
                            serializer.write_comment(text)?;
                            continue;
                        }
                        ArenaNodeData::Doctype { name, .. } => {
                            serializer.write_doctype(name)?;
                            continue;
                        }
                    }
                    let mut children: Vec<_> = self.dom.children(id).map(SerializeOp::Open).collect();
                    children.reverse();
                    ops.extend(children);
                }
                SerializeOp::Close(name) => serializer.end_elem(name)?,
            }
        }

        Ok(())
    }
}
