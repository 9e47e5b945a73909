// src/core/html.rs
//
// HTML → `dom::Document`. Parsing is html5ever's (via `scraper`), so tables get
// their implied `<tbody>` and entities arrive decoded. Doctype and processing
// instructions are dropped; elements, text and comments are kept in order.

use std::{error::Error, fs, path::Path};

use scraper::{Html, Node};

use crate::dom::{Document, NodeId};

pub fn parse_document(html: &str) -> Document {
    let parsed = Html::parse_document(html);
    let mut doc = Document::new();
    let root = doc.root();

    let mut stack = Vec::new();
    let top: Vec<_> = parsed.tree.root().children().collect();
    for child in top.into_iter().rev() {
        stack.push((child, root));
    }

    while let Some((node, parent)) = stack.pop() {
        let id: Option<NodeId> = match node.value() {
            Node::Element(el) => {
                let id = doc.create_element(el.name());
                for (k, v) in el.attrs() {
                    doc.set_attr(id, k, v);
                }
                Some(id)
            }
            Node::Text(t) => Some(doc.create_text(&t.text)),
            Node::Comment(c) => Some(doc.create_comment(&c.comment)),
            _ => None,
        };
        let Some(id) = id else { continue };
        doc.append_child(parent, id);

        let kids: Vec<_> = node.children().collect();
        for child in kids.into_iter().rev() {
            stack.push((child, id));
        }
    }

    doc
}

/// Read an HTML file from disk. Invalid UTF-8 is replaced, not rejected.
pub fn read_document(path: &Path) -> Result<Document, Box<dyn Error>> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let doc = parse_document(&text);
    logf!("HTML: Loaded {} ({} bytes, {} nodes)", path.display(), bytes.len(), doc.len());
    Ok(doc)
}
