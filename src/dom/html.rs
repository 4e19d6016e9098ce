// HTML parsing into the arena document
//
// scraper (html5ever) does the tolerant browser-grade parsing; we only copy
// its element/text tree into our own arena. Comments, doctypes and
// processing instructions are dropped.

use super::{Document, ElementId};
use scraper::{ElementRef, Html, Node};

impl Document {
    /// Parse a full HTML page (fragments are wrapped in html/body as a browser would)
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        if !parsed.errors.is_empty() {
            tracing::debug!(
                "HTML parser recovered from {} error(s): {:?}",
                parsed.errors.len(),
                parsed.errors
            );
        }

        let mut doc = Document::new();
        let source_root = parsed.root_element();
        let root = doc.root();
        for (name, value) in source_root.value().attrs() {
            doc.set_attribute(root, name, value);
        }
        copy_children(&mut doc, root, source_root);
        doc.finish_loading();
        doc
    }
}

fn copy_children(doc: &mut Document, parent: ElementId, source: ElementRef<'_>) {
    for child in source.children() {
        match child.value() {
            Node::Element(_) => {
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let element = doc.create_element(child_ref.value().name());
                for (name, value) in child_ref.value().attrs() {
                    doc.set_attribute(element, name, value);
                }
                doc.append_child(parent, element);
                copy_children(doc, element, child_ref);
            }
            Node::Text(text) => doc.append_text(parent, &**text),
            _ => {}
        }
    }
}
