// src/extractors/document.rs
//! Region lookups over a parsed page.
//!
//! Every lookup returns an `Option`: a missing region is an ordinary outcome
//! on these pages, so callers branch on it instead of erroring.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Html, Selector};

/// Page-content container on leaf and hub pages.
pub static CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.r").expect("Failed to compile CONTAINER_SELECTOR")
});

/// Info/group block nested in the container.
pub static GROUP_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.c").expect("Failed to compile GROUP_SELECTOR")
});

pub static DIV_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div").expect("Failed to compile DIV_SELECTOR")
});

pub static P_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p").expect("Failed to compile P_SELECTOR")
});

/// The string bs4-style parsers call `.string`: defined only when the
/// element has a single child, which is text or (recursively) an element
/// that itself has a string.
pub fn own_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match only.value() {
        Node::Text(text) => Some(text.text.to_string()),
        Node::Element(_) => ElementRef::wrap(only).and_then(own_string),
        _ => None,
    }
}

/// All elements under `scope` matching `selector` whose own string matches `pattern`.
pub fn find_all_by_text<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    pattern: &Regex,
) -> Vec<ElementRef<'a>> {
    scope
        .select(selector)
        .filter(|el| own_string(*el).is_some_and(|s| pattern.is_match(&s)))
        .collect()
}

/// First element under `scope` matching `selector` whose own string matches `pattern`.
pub fn find_by_text<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    pattern: &Regex,
) -> Option<ElementRef<'a>> {
    scope
        .select(selector)
        .find(|el| own_string(*el).is_some_and(|s| pattern.is_match(&s)))
}

/// Next sibling that is an element, skipping whitespace and comments.
pub fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Visible text of a region, concatenated without separators.
pub fn region_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text following the first colon of a labelled line, trimmed.
pub fn value_after_colon(line: &str) -> Option<String> {
    line.split_once(':').map(|(_, value)| value.trim().to_string())
}

/// The page-content container, or the document root when the page lacks one.
pub fn content_container(document: &Html) -> ElementRef<'_> {
    document
        .select(&CONTAINER_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element())
}
