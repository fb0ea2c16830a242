//! Rewrites a single rendered label so only the last path segment shows.

use log::debug;

use crate::dom::{Document, NodeId, Selector};
use crate::model::StripOutcome;
use crate::name::{shorten_label, PrefixedName};

/// Attribute set on every element the stripper has handled
pub const PROCESSED_ATTR: &str = "data-hide-prefix";
/// Class carried by tag labels (`#tag`)
pub const TAG_CLASS: &str = "tag";
pub const TAG_MARKER: char = '#';

const EDITABLE: Selector = Selector::attr_eq("contenteditable", "true");
const ANCHOR: Selector = Selector::tag("a");

pub fn is_processed<D: Document + ?Sized>(doc: &D, element: NodeId) -> bool {
    doc.has_attribute(element, PROCESSED_ATTR)
}

pub fn mark_processed<D: Document + ?Sized>(doc: &mut D, element: NodeId) {
    doc.set_attribute(element, PROCESSED_ATTR, "true");
}

/// An element wrapped in a link other than itself shows a user-written label.
pub fn is_explicit_alias<D: Document + ?Sized>(doc: &D, element: NodeId) -> bool {
    matches!(doc.closest(element, &[ANCHOR]), Some(anchor) if anchor != element)
}

/// Hide the prefix of `full_name` in the visible text of `element`.
///
/// Names without a separator leave the element untouched and unmarked.
/// Otherwise the element is always marked processed, whether or not its
/// label started with the prefix. An element that is already marked is not
/// written again.
pub fn hide_prefix<D: Document + ?Sized>(
    doc: &mut D,
    element: NodeId,
    full_name: Option<&str>,
) -> StripOutcome {
    let Some(full_name) = full_name.filter(|n| !n.is_empty()) else {
        return StripOutcome::NoPrefix;
    };
    if PrefixedName::parse(full_name).is_none() {
        return StripOutcome::NoPrefix;
    }

    let current = doc.text_content(element);
    let marker = doc.has_class(element, TAG_CLASS).then_some(TAG_MARKER);

    let outcome = match shorten_label(&current, full_name, marker) {
        Some(new_text) if new_text != current => {
            debug!("{:?} -> {:?}", current, new_text);
            set_text_preserving(doc, element, &new_text);
            StripOutcome::Rewritten {
                from: current,
                to: new_text,
            }
        }
        _ => StripOutcome::Unchanged,
    };

    if !is_processed(doc, element) {
        mark_processed(doc, element);
    }
    outcome
}

/// Write `text` into `element` without dropping icon or decoration children.
///
/// Preference order: a nested editable node, the first direct text node,
/// and finally a new text node at the front.
pub fn set_text_preserving<D: Document + ?Sized>(doc: &mut D, element: NodeId, text: &str) {
    if let Some(editable) = doc.select_first(element, &[EDITABLE]) {
        if doc.text_content(editable) != text {
            doc.replace_text_content(editable, text);
        }
        return;
    }

    for child in doc.children(element) {
        if let Some(value) = doc.text_value(child) {
            if value != text {
                doc.set_text_value(child, text);
            }
            return;
        }
    }

    doc.prepend_text(element, text);
}
