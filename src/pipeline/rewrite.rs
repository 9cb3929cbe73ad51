//! Replacing bundled script elements with a single fingerprinted reference.

use crate::dom::{ArenaDom, ArenaNodeId, Attribute};

use super::bundle::Fingerprint;

/// Remove `scripts` from the tree and append `<script src="<fingerprint>.js">`
/// as the last child of `head`. Returns the new element.
///
/// Newlines in a text node directly following a removed script are stripped,
/// so the removal does not leave a run of blank lines behind.
pub fn rewrite_head(
    dom: &mut ArenaDom,
    head: ArenaNodeId,
    scripts: &[ArenaNodeId],
    fingerprint: &Fingerprint,
) -> ArenaNodeId {
    for &script in scripts {
        if let Some(next) = dom.next_sibling(script)
            && let Some(text) = dom.text_content_mut(next)
        {
            text.retain(|c| c != '\n');
        }
        dom.detach(script);
    }

    let bundle = dom.create_html_element("script", vec![Attribute::new("src", fingerprint.file_name())]);
    dom.append(head, bundle);
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_str, serialize_document};
    use crate::pipeline::collect::{collect_scripts, find_head};

    fn rewrite(html: &str, fingerprint: &Fingerprint) -> String {
        let mut parsed = parse_str(html);
        let head = find_head(&parsed.dom).unwrap();
        let scripts = collect_scripts(&parsed.dom, head);
        rewrite_head(&mut parsed.dom, head, &scripts, fingerprint);
        String::from_utf8(serialize_document(&parsed.dom).unwrap()).unwrap()
    }

    #[test]
    fn test_replaces_scripts_and_strips_newlines() {
        let fp = Fingerprint::of(b"x");
        let out = rewrite(
            "<html><head>\n<title>t</title>\n<script src=\"a.js\"></script>\n<script src=\"b.js\"></script>\n</head><body></body></html>",
            &fp,
        );
        assert_eq!(
            out,
            format!(
                "<html><head>\n<title>t</title>\n<script src=\"{}.js\"></script></head><body></body></html>",
                fp
            )
        );
    }

    #[test]
    fn test_script_as_last_child_of_head() {
        let fp = Fingerprint::of(b"y");
        let out = rewrite(
            "<html><head><meta charset=\"utf-8\"><script src=\"a.js\"></script></head><body></body></html>",
            &fp,
        );
        assert_eq!(
            out,
            format!(
                "<html><head><meta charset=\"utf-8\"><script src=\"{}.js\"></script></head><body></body></html>",
                fp
            )
        );
    }

    #[test]
    fn test_new_script_is_last_child() {
        let mut parsed = parse_str(
            "<html><head><script src=\"a.js\"></script><link rel=\"stylesheet\" href=\"s.css\"></head></html>",
        );
        let head = find_head(&parsed.dom).unwrap();
        let scripts = collect_scripts(&parsed.dom, head);
        let fp = Fingerprint::of(b"z");
        let bundle = rewrite_head(&mut parsed.dom, head, &scripts, &fp);

        let children: Vec<_> = parsed.dom.children(head).collect();
        assert_eq!(children.last(), Some(&bundle));
        assert_eq!(parsed.dom.get_attr(bundle, "src"), Some(fp.file_name().as_str()));
        assert_eq!(
            children.iter().filter(|&&c| parsed.dom.is_script(c)).count(),
            1
        );
    }

    #[test]
    fn test_no_scripts_still_appends_reference() {
        let fp = Fingerprint::of(b"");
        let out = rewrite("<html><head></head><body></body></html>", &fp);
        assert_eq!(
            out,
            "<html><head><script src=\"da39a3ee5e6b4b0d3255bfef95601890afd80709.js\"></script></head><body></body></html>"
        );
    }
}
