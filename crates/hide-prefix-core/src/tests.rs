use crate::dom::{Document, MemoryDocument, NodeId};
use crate::scan::{scan_inline, scan_title};
use crate::settings::Settings;
use crate::stripper::is_processed;

struct Page {
    doc: MemoryDocument,
    main: NodeId,
    title: NodeId,
    page_ref: NodeId,
    tag: NodeId,
    alias: NodeId,
    flat_ref: NodeId,
    favorite: NodeId,
    recent: NodeId,
    nav: NodeId,
}

fn labelled(
    doc: &mut MemoryDocument,
    parent: NodeId,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> NodeId {
    let el = doc.element(parent, tag, attrs);
    doc.append_text(el, text);
    el
}

fn create_test_page() -> Page {
    let mut doc = MemoryDocument::new();
    let root = doc.root();

    let sidebar = doc.element(root, "div", &[("id", "left-sidebar")]);
    let fav_item = doc.element(
        sidebar,
        "li",
        &[("class", "favorite-item"), ("data-ref", "fav/one")],
    );
    let favorite = labelled(&mut doc, fav_item, "span", &[("class", "page-title")], "Fav/One");
    let rec_item = doc.element(sidebar, "li", &[("class", "recent-item")]);
    let recent = labelled(
        &mut doc,
        rec_item,
        "span",
        &[("class", "page-title"), ("data-ref", "rec/two")],
        "Rec/Two",
    );
    let nav_item = doc.element(
        sidebar,
        "div",
        &[("class", "nav-content-item"), ("data-ref", "nav/three")],
    );
    let nav = labelled(&mut doc, nav_item, "span", &[("class", "page-title")], "Nav/Three");

    let main = doc.element(root, "div", &[("class", "cp__sidebar-main-content")]);
    let title = labelled(
        &mut doc,
        main,
        "span",
        &[("class", "title"), ("data-ref", "projects/rust/parser")],
        "Projects/Rust/Parser",
    );
    let block = doc.element(main, "div", &[("class", "block-content")]);
    let page_ref = labelled(
        &mut doc,
        block,
        "span",
        &[("class", "page-ref"), ("data-ref", "work/notes")],
        "WORK/Notes",
    );
    let tag = labelled(
        &mut doc,
        block,
        "a",
        &[("class", "tag"), ("data-ref", "category/sub/page")],
        "#Category/Sub/Page",
    );
    let anchor = doc.element(block, "a", &[("class", "page-ref-alias")]);
    let alias = labelled(
        &mut doc,
        anchor,
        "span",
        &[("class", "page-ref"), ("data-ref", "category/page")],
        "Custom Label",
    );
    let flat_ref = labelled(
        &mut doc,
        block,
        "span",
        &[("class", "page-ref"), ("data-ref", "inbox")],
        "Inbox",
    );

    Page {
        doc,
        main,
        title,
        page_ref,
        tag,
        alias,
        flat_ref,
        favorite,
        recent,
        nav,
    }
}

#[test]
fn test_full_scan_shortens_every_surface() {
    let mut page = create_test_page();
    let settings = Settings::default();

    let report = scan_inline(&mut page.doc, &settings);
    let title_report = scan_title(&mut page.doc, &settings, Some("Projects/Rust/Parser"));

    let doc = &page.doc;
    assert_eq!(doc.text_content(page.page_ref), "Notes");
    assert_eq!(doc.text_content(page.tag), "#Page");
    assert_eq!(doc.text_content(page.favorite), "One");
    assert_eq!(doc.text_content(page.recent), "Two");
    assert_eq!(doc.text_content(page.nav), "Three");
    assert_eq!(doc.text_content(page.title), "Parser");

    assert_eq!(report.rewritten, 5);
    assert_eq!(title_report.rewritten, 1);
}

#[test]
fn test_explicit_alias_is_never_modified() {
    let mut page = create_test_page();
    scan_inline(&mut page.doc, &Settings::default());

    assert_eq!(page.doc.text_content(page.alias), "Custom Label");
    assert!(!is_processed(&page.doc, page.alias));
}

#[test]
fn test_flat_name_is_left_alone() {
    let mut page = create_test_page();
    scan_inline(&mut page.doc, &Settings::default());

    assert_eq!(page.doc.text_content(page.flat_ref), "Inbox");
}

#[test]
fn test_repeated_scan_performs_no_writes() {
    let mut page = create_test_page();
    let settings = Settings::default();

    scan_inline(&mut page.doc, &settings);
    scan_title(&mut page.doc, &settings, Some("Projects/Rust/Parser"));
    let writes = page.doc.write_count();
    let snapshot = page.doc.text_content(page.doc.root());

    let report = scan_inline(&mut page.doc, &settings);
    scan_title(&mut page.doc, &settings, Some("Projects/Rust/Parser"));

    assert_eq!(page.doc.write_count(), writes);
    assert_eq!(page.doc.text_content(page.doc.root()), snapshot);
    assert_eq!(report.rewritten, 0);
}

#[test]
fn test_repeated_scan_leaves_child_lists_alone() {
    let mut page = create_test_page();
    let settings = Settings::default();

    scan_inline(&mut page.doc, &settings);
    scan_title(&mut page.doc, &settings, Some("Projects/Rust/Parser"));
    let changes = page.doc.child_list_changes();

    scan_inline(&mut page.doc, &settings);
    scan_title(&mut page.doc, &settings, Some("Projects/Rust/Parser"));

    assert_eq!(page.doc.child_list_changes(), changes);
}

#[test]
fn test_disabled_favorites_keep_their_prefix() {
    let mut page = create_test_page();
    let settings = Settings {
        favorites: false,
        ..Settings::default()
    };

    scan_inline(&mut page.doc, &settings);
    scan_title(&mut page.doc, &settings, Some("Projects/Rust/Parser"));

    let doc = &page.doc;
    assert_eq!(doc.text_content(page.favorite), "Fav/One");
    assert!(!is_processed(doc, page.favorite));
    assert_eq!(doc.text_content(page.recent), "Two");
    assert_eq!(doc.text_content(page.page_ref), "Notes");
    assert_eq!(doc.text_content(page.title), "Parser");
}

#[test]
fn test_sidebar_runs_without_inline_pass() {
    let mut page = create_test_page();
    let settings = Settings {
        tags_links: false,
        ..Settings::default()
    };

    scan_inline(&mut page.doc, &settings);

    assert_eq!(page.doc.text_content(page.page_ref), "WORK/Notes");
    assert_eq!(page.doc.text_content(page.tag), "#Category/Sub/Page");
    assert_eq!(page.doc.text_content(page.favorite), "One");
}

#[test]
fn test_sidebar_off_leaves_navigation_items() {
    let mut page = create_test_page();
    let settings = Settings {
        favorites: false,
        recent: false,
        ..Settings::default()
    };

    scan_inline(&mut page.doc, &settings);
    assert_eq!(page.doc.text_content(page.nav), "Nav/Three");
}

#[test]
fn test_title_prefers_page_name_over_own_reference() {
    let mut page = create_test_page();
    page.doc.set_attribute(page.title, "data-ref", "stale/name");

    scan_title(&mut page.doc, &Settings::default(), Some("Projects/Rust/Parser"));
    assert_eq!(page.doc.text_content(page.title), "Parser");
}

#[test]
fn test_title_skipped_while_editing() {
    let mut page = create_test_page();
    page.doc.set_attribute(page.title, "class", "title editing");

    let report = scan_title(&mut page.doc, &Settings::default(), Some("Projects/Rust/Parser"));
    assert_eq!(report.skipped, 1);
    assert_eq!(page.doc.text_content(page.title), "Projects/Rust/Parser");

    page.doc.set_attribute(page.title, "class", "title");
    page.doc.set_attribute(page.title, "contenteditable", "true");
    scan_title(&mut page.doc, &Settings::default(), Some("Projects/Rust/Parser"));
    assert_eq!(page.doc.text_content(page.title), "Projects/Rust/Parser");
}

#[test]
fn test_title_needs_page_name_and_setting() {
    let mut page = create_test_page();

    assert!(scan_title(&mut page.doc, &Settings::default(), None).is_empty());
    let off = Settings {
        page_title: false,
        ..Settings::default()
    };
    assert!(scan_title(&mut page.doc, &off, Some("Projects/Rust/Parser")).is_empty());
    assert_eq!(page.doc.text_content(page.title), "Projects/Rust/Parser");
}

#[test]
fn test_rerendered_label_is_processed_again() {
    let mut page = create_test_page();
    let settings = Settings::default();
    scan_inline(&mut page.doc, &settings);

    page.doc.remove(page.page_ref);
    let block = page.doc.element(page.main, "div", &[("class", "block-content")]);
    let fresh = labelled(
        &mut page.doc,
        block,
        "span",
        &[("class", "page-ref"), ("data-ref", "work/notes")],
        "Work/Notes",
    );

    let report = scan_inline(&mut page.doc, &settings);
    assert_eq!(report.rewritten, 1);
    assert_eq!(page.doc.text_content(fresh), "Notes");
}
