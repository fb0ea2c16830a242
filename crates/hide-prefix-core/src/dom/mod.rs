pub mod memory;
pub mod selector;

pub use memory::MemoryDocument;
pub use selector::Selector;

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Abstract interface over the host's rendered document.
///
/// Only the primitives needed to find labels and rewrite their text live
/// here; everything else is built on top as provided methods.
pub trait Document {
    fn root(&self) -> NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Children in document order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Tag name for element nodes, `None` for text nodes
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Value of a text node, `None` for elements
    fn text_value(&self, node: NodeId) -> Option<&str>;

    fn set_text_value(&mut self, node: NodeId, value: &str);

    /// Replace every child of `node` with a single text node.
    fn replace_text_content(&mut self, node: NodeId, text: &str);

    /// Insert a text node as the first child of `node`.
    fn prepend_text(&mut self, node: NodeId, text: &str) -> NodeId;

    fn is_text(&self, node: NodeId) -> bool {
        self.tag_name(node).is_none()
    }

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .map(|list| list.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Concatenated text of every descendant text node
    fn text_content(&self, node: NodeId) -> String {
        if let Some(value) = self.text_value(node) {
            return value.to_string();
        }
        let mut out = String::new();
        for child in self.descendants(node) {
            if let Some(value) = self.text_value(child) {
                out.push_str(value);
            }
        }
        out
    }

    /// All descendants of `node` in document order, excluding `node` itself
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        out
    }

    /// Nearest inclusive ancestor matching any of `selectors`
    fn closest(&self, node: NodeId, selectors: &[Selector]) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if selector::matches_any(self, n, selectors) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    /// Descendants of `scope` matching any of `selectors`, in document order
    fn select_all(&self, scope: NodeId, selectors: &[Selector]) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| selector::matches_any(self, *n, selectors))
            .collect()
    }

    fn select_first(&self, scope: NodeId, selectors: &[Selector]) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| selector::matches_any(self, *n, selectors))
    }
}
