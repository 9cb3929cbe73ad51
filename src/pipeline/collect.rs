//! Locating the document head and the script elements it owns.

use html5ever::local_name;

use crate::dom::{ArenaDom, ArenaNodeId};
use crate::error::{Error, Result};

/// Find the first `<head>` element in pre-order.
pub fn find_head(dom: &ArenaDom) -> Result<ArenaNodeId> {
    dom.find_by_tag("head").ok_or(Error::MissingHead)
}

/// Collect the `<script>` elements that are direct children of a `<head>`
/// element, in document order.
///
/// The walk starts at `root`. A matching script is not descended into; any
/// other node is, so a script nested inside another element of the head
/// (for example `<noscript>`) is never collected.
pub fn collect_scripts(dom: &ArenaDom, root: ArenaNodeId) -> Vec<ArenaNodeId> {
    let mut scripts = Vec::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if is_head_script(dom, id) {
            scripts.push(id);
            continue;
        }
        let mut children: Vec<_> = dom.children(id).collect();
        children.reverse();
        stack.extend(children);
    }

    scripts
}

fn is_head_script(dom: &ArenaDom, id: ArenaNodeId) -> bool {
    dom.is_script(id)
        && dom
            .parent(id)
            .and_then(|parent| dom.element_name(parent))
            .is_some_and(|name| *name == local_name!("head"))
}
