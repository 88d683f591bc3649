use super::fixtures::*;
use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::parsers::dom::full_text;
use crate::parsers::locator::{Candidate, Locator};

#[cfg(test)]
mod locator_tests {
    use super::*;

    fn locate(markup: &str, check: impl FnOnce(&[Candidate<'_>])) {
        let config = ExtractorConfig::default();
        let document = Document::parse(markup);
        let candidates = Locator::new(&config).locate(&document);
        check(&candidates);
    }

    fn tags(candidates: &[Candidate<'_>]) -> Vec<String> {
        candidates.iter().map(|c| c.tag.clone()).collect()
    }

    #[test]
    fn test_carousel_tiles_in_document_order() {
        locate(&carousel_page(), |candidates| {
            // Five paintings plus the "See more" tile; chrome and the
            // out-of-panel tile are excluded
            assert_eq!(candidates.len(), 6);
            assert!(candidates.iter().all(|c| c.tag == "artworks"));
            assert!(candidates.iter().all(|c| !c.root.is_hydrated()));

            let first = full_text(candidates[0].root.element());
            assert!(first.contains("The Starry Night"));
            let last = full_text(candidates[5].root.element());
            assert_eq!(last, "See more");
        });
    }

    #[test]
    fn test_table_rows_hydrate_from_scripts() {
        locate(&table_page(), |candidates| {
            // wh_23 has no deferred markup and is dropped
            assert_eq!(candidates.len(), 3);
            assert_eq!(tags(candidates), ["entities", "entities", "entities"]);

            assert!(!candidates[0].root.is_hydrated());
            assert!(!candidates[1].root.is_hydrated());
            assert!(candidates[2].root.is_hydrated());

            let hydrated = full_text(candidates[2].root.element());
            assert!(hydrated.contains("c l o s e"));
            assert!(hydrated.contains("2:49"));
        });
    }

    #[test]
    fn test_gallery_sections_tagged_separately() {
        locate(&gallery_page(), |candidates| {
            assert_eq!(
                tags(candidates),
                ["artworks", "artworks", "artworks", "structures", "structures", "structures"]
            );
        });
    }

    #[test]
    fn test_single_tile_list() {
        locate(&list_page(), |candidates| {
            assert_eq!(candidates.len(), 1);
            assert_eq!(candidates[0].tag, "albums");
        });
    }

    #[test]
    fn test_fragment_without_anchor_is_dropped() {
        let markup = format!(
            r#"<html><body><div data-attrid="kc:/x"><div role="row"><div id="wh_1"><div>Loading</div></div></div></div>{}</body></html>"#,
            fragment_script("wh_1", "<div><div>No link here</div></div>")
        );
        locate(&markup, |candidates| assert!(candidates.is_empty()));
    }

    #[test]
    fn test_tile_without_anchor_or_id_is_dropped() {
        let markup = r#"<html><body><div data-attrid="kc:/x"><div role="row"><div><div>Loose</div></div></div></div></body></html>"#;
        locate(markup, |candidates| assert!(candidates.is_empty()));
    }

    #[test]
    fn test_only_first_nested_div_id_is_consulted() {
        let markup = format!(
            r#"<html><body><div data-attrid="kc:/x"><div role="row"><div class="first"><div id="wh_1"></div></div></div></div>{}</body></html>"#,
            fragment_script(
                "wh_1",
                &format!(r#"<a href="{}"><div>Hidden</div></a>"#, search_href("Hidden", 1))
            )
        );
        locate(&markup, |candidates| assert!(candidates.is_empty()));
    }

    #[test]
    fn test_custom_panel_marker() {
        let markup = format!(
            r#"<html><body><div data-attrid="panel:works"><div role="listitem"><a href="{}"><div>Tile</div></a></div></div></body></html>"#,
            search_href("Tile", 1)
        );
        let document = Document::parse(markup.as_str());

        let default = ExtractorConfig::default();
        assert!(Locator::new(&default).locate(&document).is_empty());

        let custom = ExtractorConfig {
            panel_marker: "panel:".to_string(),
            ..ExtractorConfig::default()
        };
        let candidates = Locator::new(&custom).locate(&document);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].tag, "entities");
    }

    #[test]
    fn test_empty_document_has_no_candidates() {
        locate("<html><body></body></html>", |candidates| {
            assert!(candidates.is_empty())
        });
    }
}
