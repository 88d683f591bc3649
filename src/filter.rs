use crate::config::ExtractorConfig;
use crate::parsers::dom::{self, count_named, descendants, first_named, is_named};
use scraper::ElementRef;

/// Roles carried by panel chrome rather than by item tiles
const EXCLUDED_ROLES: [&str; 3] = ["button", "dialog", "list"];

/// Structural filter that recognises knowledge-panel item tiles.
///
/// The four layouts share no class names, so a tile is recognised by shape:
/// an explicit role or inline style, not a control, no aria-label override,
/// some nested markup, at most one anchor (an internal search link) and at
/// most one image (the placeholder that stands in for script-hydrated data).
#[derive(Debug, Clone, Copy)]
pub struct TileFilter<'c> {
    panel_marker: &'c str,
    placeholder_src: &'c str,
}

impl<'c> TileFilter<'c> {
    pub fn new(config: &'c ExtractorConfig) -> Self {
        Self {
            panel_marker: &config.panel_marker,
            placeholder_src: &config.placeholder_src,
        }
    }

    /// Whether `el` sits under a panel region (`div[data-attrid^=marker]`)
    pub fn in_panel(&self, el: ElementRef<'_>) -> bool {
        el.ancestors().filter_map(ElementRef::wrap).any(|a| {
            is_named(&a, "div")
                && a.value()
                    .attr("data-attrid")
                    .is_some_and(|v| v.starts_with(self.panel_marker))
        })
    }

    /// Whether `el` has the shape of an item tile
    pub fn is_tile(&self, el: ElementRef<'_>) -> bool {
        is_named(&el, "div")
            && has_role_or_style(el)
            && has_allowed_role(el)
            && !has_aria_label(el)
            && has_nested_div(el)
            && self.has_valid_anchor(el)
            && self.has_valid_image(el)
    }

    /// No anchors, or exactly one pointing at an internal search result
    fn has_valid_anchor(&self, el: ElementRef<'_>) -> bool {
        match count_named(el, "a") {
            0 => true,
            1 => first_named(el, "a")
                .and_then(|a| a.value().attr("href"))
                .is_some_and(is_search_link),
            _ => false,
        }
    }

    /// No images, or exactly one placeholder image
    fn has_valid_image(&self, el: ElementRef<'_>) -> bool {
        match count_named(el, "img") {
            0 => true,
            1 => first_named(el, "img").is_some_and(|img| self.is_placeholder(img)),
            _ => false,
        }
    }

    pub fn is_placeholder(&self, img: ElementRef<'_>) -> bool {
        img.value().attr("src") == Some(self.placeholder_src)
    }
}

fn has_role_or_style(el: ElementRef<'_>) -> bool {
    el.value().attr("role").is_some() || el.value().attr("style").is_some()
}

fn has_allowed_role(el: ElementRef<'_>) -> bool {
    el.value()
        .attr("role")
        .is_none_or(|role| !EXCLUDED_ROLES.contains(&role))
}

fn has_aria_label(el: ElementRef<'_>) -> bool {
    el.value().attr("aria-label").is_some()
}

fn has_nested_div(el: ElementRef<'_>) -> bool {
    descendants(el).any(|d| is_named(&d, "div"))
}

/// Internal search links carry the `sca_esv` session token and a `ved` tracking token
pub fn is_search_link(href: &str) -> bool {
    href.starts_with("/search?") && href.contains("sca_esv") && href.contains("&ved")
}

/// Whether `el` is text-bearing leaf markup: a `div` without element
/// children or a `span` directly under a `div` below `scope`, with
/// non-blank direct text
pub fn is_text_leaf(el: ElementRef<'_>, scope: ElementRef<'_>) -> bool {
    let has_text = !dom::direct_text(el).trim().is_empty();
    if !has_text {
        return false;
    }

    if is_named(&el, "div") {
        return !dom::has_child_elements(el);
    }

    is_named(&el, "span")
        && dom::parent_element(el)
            .is_some_and(|p| is_named(&p, "div") && p.id() != scope.id())
}
