use super::{Document, NodeId};

/// A single compound selector: `tag#id.class[attr=value]`, each part optional.
///
/// Descendant combinators are not supported; callers narrow the scope first
/// and then select inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<&'static str>,
    pub id: Option<&'static str>,
    pub class: Option<&'static str>,
    pub attr: Option<(&'static str, Option<&'static str>)>,
}

impl Selector {
    pub const ANY: Selector = Selector {
        tag: None,
        id: None,
        class: None,
        attr: None,
    };

    pub const fn tag(tag: &'static str) -> Self {
        let mut s = Self::ANY;
        s.tag = Some(tag);
        s
    }

    pub const fn id(id: &'static str) -> Self {
        let mut s = Self::ANY;
        s.id = Some(id);
        s
    }

    pub const fn class(class: &'static str) -> Self {
        let mut s = Self::ANY;
        s.class = Some(class);
        s
    }

    pub const fn attr(name: &'static str) -> Self {
        Self::ANY.with_attr(name)
    }

    pub const fn attr_eq(name: &'static str, value: &'static str) -> Self {
        let mut s = Self::ANY;
        s.attr = Some((name, Some(value)));
        s
    }

    pub const fn with_attr(mut self, name: &'static str) -> Self {
        self.attr = Some((name, None));
        self
    }

    pub fn matches<D: Document + ?Sized>(&self, doc: &D, node: NodeId) -> bool {
        let Some(tag) = doc.tag_name(node) else {
            return false;
        };
        if let Some(expected) = self.tag {
            if !tag.eq_ignore_ascii_case(expected) {
                return false;
            }
        }
        if let Some(expected) = self.id {
            if doc.attribute(node, "id") != Some(expected) {
                return false;
            }
        }
        if let Some(class) = self.class {
            if !doc.has_class(node, class) {
                return false;
            }
        }
        match self.attr {
            Some((name, None)) => doc.has_attribute(node, name),
            Some((name, Some(value))) => doc.attribute(node, name) == Some(value),
            None => true,
        }
    }
}

pub fn matches_any<D: Document + ?Sized>(doc: &D, node: NodeId, selectors: &[Selector]) -> bool {
    selectors.iter().any(|s| s.matches(doc, node))
}
