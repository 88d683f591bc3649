use crate::parsers::dom::{descendants, direct_text, is_named};
use scraper::ElementRef;

/// Classify a tile by the section heading structurally above it.
///
/// Walks up to the nearest ancestor `div` that has a preceding sibling
/// `div` holding a level-2 heading, then joins the span text found in all
/// of that ancestor's preceding sibling `div`s. Blank text maps to
/// `default_tag`; anything else is lower-cased.
pub fn entity_tag(tile: ElementRef<'_>, default_tag: &str) -> String {
    let text = section_heading_text(tile);
    if text.is_empty() {
        default_tag.to_string()
    } else {
        text.to_lowercase()
    }
}

fn section_heading_text(tile: ElementRef<'_>) -> String {
    let section = tile
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|a| is_named(a, "div"))
        .find(|a| preceding_divs(*a).iter().any(|s| contains_heading(*s)));

    let Some(section) = section else {
        return String::new();
    };

    preceding_divs(section)
        .into_iter()
        .flat_map(descendants)
        .filter(|e| is_named(e, "span"))
        .map(direct_text)
        .collect()
}

/// Preceding sibling `div`s, in document order
fn preceding_divs(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut siblings: Vec<_> = el
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|s| is_named(s, "div"))
        .collect();
    siblings.reverse();
    siblings
}

fn contains_heading(el: ElementRef<'_>) -> bool {
    descendants(el).any(is_heading)
}

fn is_heading(el: ElementRef<'_>) -> bool {
    is_named(&el, "div")
        && el.value().attr("aria-level") == Some("2")
        && el.value().attr("role") == Some("heading")
        && descendants(el).any(|d| is_named(&d, "span"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn tag_of(markup: &str, class: &str) -> String {
        let html = Html::parse_document(markup);
        let selector = Selector::parse(&format!("div.{class}")).unwrap();
        let tile = html.select(&selector).next().unwrap();
        entity_tag(tile, "entities")
    }

    #[test]
    fn test_nearest_heading_section() {
        let markup = r#"
            <div>
              <div><div aria-level="2" role="heading"><span>Artworks</span></div></div>
              <div><div class="a">x</div></div>
            </div>
            <div>
              <div><div aria-level="2" role="heading"><span>Structures</span></div></div>
              <div><div><div class="b">y</div></div></div>
            </div>"#;

        assert_eq!(tag_of(markup, "a"), "artworks");
        assert_eq!(tag_of(markup, "b"), "structures");
    }

    #[test]
    fn test_default_when_no_heading() {
        let markup = r#"<div><div><span>Not a heading</span></div><div><div class="a">x</div></div></div>"#;
        assert_eq!(tag_of(markup, "a"), "entities");
    }

    #[test]
    fn test_heading_needs_level_role_and_span() {
        let wrong_level = r#"<div><div><div aria-level="3" role="heading"><span>Songs</span></div></div><div><div class="a">x</div></div></div>"#;
        assert_eq!(tag_of(wrong_level, "a"), "entities");

        let no_span = r#"<div><div><div aria-level="2" role="heading">Songs</div></div><div><div class="a">x</div></div></div>"#;
        assert_eq!(tag_of(no_span, "a"), "entities");
    }

    #[test]
    fn test_joins_span_text_of_all_preceding_siblings() {
        let markup = r#"
            <div>
              <div><span>Top </span></div>
              <div><div aria-level="2" role="heading"><span>Songs</span></div></div>
              <div><div class="a">x</div></div>
            </div>"#;
        assert_eq!(tag_of(markup, "a"), "top songs");
    }

    #[test]
    fn test_blank_heading_text_uses_default() {
        let markup = r#"<div><div><div aria-level="2" role="heading"><span><b>Bold</b></span></div></div><div><div class="a">x</div></div></div>"#;
        assert_eq!(tag_of(markup, "a"), "entities");
    }
}
