//! Small traversal helpers over `scraper` element trees.

use scraper::ElementRef;

/// Descendant elements in document order, excluding `el` itself
pub fn descendants<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

pub fn is_named(el: &ElementRef<'_>, name: &str) -> bool {
    el.value().name() == name
}

/// First descendant element with the given tag name
pub fn first_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    descendants(el).find(|e| is_named(e, name))
}

pub fn count_named(el: ElementRef<'_>, name: &str) -> usize {
    descendants(el).filter(|e| is_named(e, name)).count()
}

pub fn has_child_elements(el: ElementRef<'_>) -> bool {
    el.children().any(|c| c.value().is_element())
}

/// Concatenation of the text nodes directly under `el`
pub fn direct_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|c| c.value().as_text())
        .map(|t| &**t)
        .collect()
}

/// Concatenation of every text node under `el`
pub fn full_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Parent element, if the parent node is an element
pub fn parent_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.parent().and_then(ElementRef::wrap)
}
