use super::{Document, NodeId};

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// Arena-backed document used by the in-memory host and by tests.
///
/// Nodes are never freed; [`MemoryDocument::remove`] only detaches them,
/// which is how a host re-render discards an element together with its
/// processed marker.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    writes: usize,
    child_list_changes: usize,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document holding an empty `body` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Element {
                    tag: "body".to_string(),
                    attributes: Vec::new(),
                },
            }],
            writes: 0,
            child_list_changes: 0,
        }
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Append a new element under `parent`.
    pub fn element(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let attributes = attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let id = self.push(
            Some(parent),
            NodeKind::Element {
                tag: tag.to_string(),
                attributes,
            },
        );
        self.nodes[parent.0].children.push(id);
        self.child_list_changes += 1;
        id
    }

    /// Append a new text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.push(Some(parent), NodeKind::Text(text.to_string()));
        self.nodes[parent.0].children.push(id);
        self.child_list_changes += 1;
        id
    }

    /// Detach `node` (and its subtree) from the document.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
            self.child_list_changes += 1;
        }
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        while let Some(parent) = self.nodes[current.0].parent {
            current = parent;
        }
        current == self.root()
    }

    /// Number of mutations made through the [`Document`] trait
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Number of child-list changes, including host-side rendering
    pub fn child_list_changes(&self) -> usize {
        self.child_list_changes
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            match attributes.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
            self.writes += 1;
        }
    }

    fn text_value(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Text(value) => Some(value),
            NodeKind::Element { .. } => None,
        }
    }

    fn set_text_value(&mut self, node: NodeId, value: &str) {
        if let NodeKind::Text(current) = &mut self.nodes[node.0].kind {
            *current = value.to_string();
            self.writes += 1;
        }
    }

    fn replace_text_content(&mut self, node: NodeId, text: &str) {
        let old = std::mem::take(&mut self.nodes[node.0].children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
        let id = self.push(Some(node), NodeKind::Text(text.to_string()));
        self.nodes[node.0].children.push(id);
        self.writes += 1;
        self.child_list_changes += 1;
    }

    fn prepend_text(&mut self, node: NodeId, text: &str) -> NodeId {
        let id = self.push(Some(node), NodeKind::Text(text.to_string()));
        self.nodes[node.0].children.insert(0, id);
        self.writes += 1;
        self.child_list_changes += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Selector;

    #[test]
    fn test_text_content_and_descendants() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let outer = doc.element(root, "div", &[("id", "left-sidebar")]);
        let inner = doc.element(outer, "span", &[("class", "page-title")]);
        doc.append_text(inner, "a/");
        doc.append_text(outer, "b");

        assert_eq!(doc.text_content(outer), "a/b");
        assert_eq!(doc.descendants(root).len(), 4);
        assert_eq!(doc.closest(inner, &[Selector::id("left-sidebar")]), Some(outer));
        assert_eq!(doc.closest(inner, &[Selector::class("page-title")]), Some(inner));
        assert_eq!(doc.select_all(root, &[Selector::class("page-title")]), vec![inner]);
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let outer = doc.element(root, "div", &[]);
        let inner = doc.element(outer, "span", &[("data-ref", "x")]);

        doc.remove(outer);
        assert!(!doc.is_attached(inner));
        assert!(doc.select_first(root, &[Selector::attr("data-ref")]).is_none());
    }

    #[test]
    fn test_writes_are_counted() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let span = doc.element(root, "span", &[]);
        let text = doc.append_text(span, "x");
        assert_eq!(doc.write_count(), 0);

        doc.set_text_value(text, "y");
        doc.set_attribute(span, "data-hide-prefix", "true");
        doc.prepend_text(span, "z");
        assert_eq!(doc.write_count(), 3);
        assert_eq!(doc.text_content(span), "zy");

        doc.replace_text_content(span, "only");
        assert_eq!(doc.text_content(span), "only");
        assert_eq!(doc.children(span).len(), 1);
    }
}
