use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::filter::TileFilter;
use crate::parsers::dom::{descendants, first_named, has_child_elements, is_named};
use crate::parsers::heading::entity_tag;
use scraper::{ElementRef, Html};

/// Where a tile's usable markup lives
pub enum TileRoot<'a> {
    /// The matched element itself, inside the document
    Inline(ElementRef<'a>),
    /// Markup recovered from a deferred-HTML script and parsed on its own
    Hydrated(Html),
}

impl TileRoot<'_> {
    pub fn element(&self) -> ElementRef<'_> {
        match self {
            TileRoot::Inline(el) => *el,
            TileRoot::Hydrated(html) => html.root_element(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_hydrated(&self) -> bool {
        matches!(self, TileRoot::Hydrated(_))
    }
}

/// A tile found in the panel, tagged with its section's entity type
pub struct Candidate<'a> {
    pub tag: String,
    pub root: TileRoot<'a>,
}

/// Finds item tiles across the four panel layouts
pub struct Locator<'c> {
    config: &'c ExtractorConfig,
    filter: TileFilter<'c>,
}

impl<'c> Locator<'c> {
    pub fn new(config: &'c ExtractorConfig) -> Self {
        Self {
            config,
            filter: TileFilter::new(config),
        }
    }

    /// Every usable tile in document order. Tiles that cannot be resolved
    /// to markup with an anchor are dropped.
    pub fn locate<'a>(&self, document: &'a Document) -> Vec<Candidate<'a>> {
        let root = document.html().root_element();
        let matched: Vec<ElementRef<'a>> = descendants(root)
            .filter(|el| self.filter.is_tile(*el) && self.filter.in_panel(*el))
            .collect();

        ::log::debug!("Locator matched {} tile elements", matched.len());

        matched
            .into_iter()
            .filter_map(|tile| {
                let root = self.resolve(tile, document)?;
                let tag = entity_tag(tile, &self.config.default_tag);
                Some(Candidate { tag, root })
            })
            .collect()
    }

    /// The markup to build a record from: the tile itself when it holds the
    /// anchor, otherwise the deferred fragment named by its first nested div
    fn resolve<'a>(&self, tile: ElementRef<'a>, document: &Document) -> Option<TileRoot<'a>> {
        if !has_child_elements(tile) {
            return None;
        }

        if first_named(tile, "a").is_some() {
            return Some(TileRoot::Inline(tile));
        }

        let Some(id) = first_named(tile, "div").and_then(|d| d.value().attr("id")) else {
            ::log::trace!("Dropping tile without anchor or deferred id");
            return None;
        };

        let Some(fragment) = document.scripts().fragment(id) else {
            ::log::debug!("No deferred markup found for tile {}", id);
            return None;
        };

        let html = Html::parse_document(&fragment);
        if !descendants(html.root_element()).any(|e| is_named(&e, "a")) {
            ::log::debug!("Deferred markup for tile {} has no anchor", id);
            return None;
        }

        Some(TileRoot::Hydrated(html))
    }
}
