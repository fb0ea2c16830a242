//! Scan passes over the rendered document.
//!
//! Each pass finds the labels of one kind of surface, filters out what must
//! not be touched and hands the rest to [`hide_prefix`]. Passes are pure
//! given the document and the settings, so they can run as often as the
//! host re-renders.

use log::debug;

use crate::dom::{Document, NodeId, Selector};
use crate::model::ScanReport;
use crate::settings::{Settings, Surface};
use crate::stripper::{hide_prefix, is_explicit_alias, is_processed};

pub const REF_ATTR: &str = "data-ref";

const INLINE_REFS: [Selector; 2] = [
    Selector::class("page-ref").with_attr(REF_ATTR),
    Selector::class(crate::stripper::TAG_CLASS).with_attr(REF_ATTR),
];
const LEFT_SIDEBAR: Selector = Selector::id("left-sidebar");
const SIDEBAR_TITLE: Selector = Selector::class("page-title");
const HAS_REF: Selector = Selector::attr(REF_ATTR);
const FAVORITE_ITEM: Selector = Selector::class("favorite-item");
const RECENT_ITEM: Selector = Selector::class("recent-item");
const NAV_ITEM: Selector = Selector::class("nav-content-item");
const MAIN_CONTENT: Selector = Selector::class("cp__sidebar-main-content");
const PAGE_TITLE: Selector = Selector::class("title").with_attr(REF_ATTR);
const EDITING_CLASS: &str = "editing";

/// Inline references and tags, followed by the sidebar pass.
pub fn scan_inline<D: Document + ?Sized>(doc: &mut D, settings: &Settings) -> ScanReport {
    let mut report = ScanReport::default();

    if settings.enabled(Surface::TagsLinks) {
        let root = doc.root();
        for el in doc.select_all(root, &INLINE_REFS) {
            report.examined += 1;
            if is_processed(doc, el) || is_explicit_alias(doc, el) {
                report.skipped += 1;
                continue;
            }
            let name = match doc.attribute(el, REF_ATTR) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    report.skipped += 1;
                    continue;
                }
            };
            let outcome = hide_prefix(doc, el, Some(&name));
            report.record(&outcome);
        }
    }

    report += scan_sidebar(doc, settings);
    report
}

/// Which sidebar list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SidebarSection {
    Favorites,
    Recent,
    /// Navigation entries outside both lists
    Other,
}

fn sidebar_section<D: Document + ?Sized>(doc: &D, el: NodeId) -> SidebarSection {
    match doc.closest(el, &[FAVORITE_ITEM, RECENT_ITEM, NAV_ITEM]) {
        Some(item) if FAVORITE_ITEM.matches(doc, item) => SidebarSection::Favorites,
        Some(item) if RECENT_ITEM.matches(doc, item) => SidebarSection::Recent,
        _ => SidebarSection::Other,
    }
}

/// Page titles listed in the left sidebar.
///
/// The whole pass is skipped when both sidebar lists are disabled.
pub fn scan_sidebar<D: Document + ?Sized>(doc: &mut D, settings: &Settings) -> ScanReport {
    let mut report = ScanReport::default();
    if !settings.favorites && !settings.recent {
        return report;
    }

    let root = doc.root();
    let Some(sidebar) = doc.select_first(root, &[LEFT_SIDEBAR]) else {
        return report;
    };

    for el in doc.select_all(sidebar, &[SIDEBAR_TITLE]) {
        report.examined += 1;
        if is_processed(doc, el) {
            report.skipped += 1;
            continue;
        }

        let name = doc
            .closest(el, &[HAS_REF])
            .and_then(|holder| doc.attribute(holder, REF_ATTR))
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let Some(name) = name else {
            report.skipped += 1;
            continue;
        };

        let enabled = match sidebar_section(doc, el) {
            SidebarSection::Favorites => settings.enabled(Surface::Favorites),
            SidebarSection::Recent => settings.enabled(Surface::Recent),
            SidebarSection::Other => true,
        };
        if !enabled {
            report.skipped += 1;
            continue;
        }

        let outcome = hide_prefix(doc, el, Some(&name));
        report.record(&outcome);
    }

    report
}

/// Title of the page currently shown in the main content area.
///
/// `page_name` is the host's canonical name of that page; it wins over the
/// element's own reference when the two disagree.
pub fn scan_title<D: Document + ?Sized>(
    doc: &mut D,
    settings: &Settings,
    page_name: Option<&str>,
) -> ScanReport {
    let mut report = ScanReport::default();
    if !settings.enabled(Surface::PageTitle) {
        return report;
    }
    let Some(page_name) = page_name.filter(|n| !n.is_empty()) else {
        return report;
    };

    let root = doc.root();
    let Some(main) = doc.select_first(root, &[MAIN_CONTENT]) else {
        return report;
    };
    let Some(title) = doc.select_first(main, &[PAGE_TITLE]) else {
        debug!("page title element not found");
        return report;
    };

    report.examined += 1;
    if is_processed(doc, title) {
        report.skipped += 1;
        return report;
    }
    if doc.has_class(title, EDITING_CLASS) || doc.has_attribute(title, "contenteditable") {
        debug!("page title is being edited, skipping");
        report.skipped += 1;
        return report;
    }

    if let Some(own) = doc.attribute(title, REF_ATTR) {
        if own != page_name {
            debug!("title reference {:?} differs from current page {:?}", own, page_name);
        }
    }

    let outcome = hide_prefix(doc, title, Some(page_name));
    report.record(&outcome);
    report
}
