use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::filter::{TileFilter, is_text_leaf};
use crate::parsers::dom::{descendants, first_named, full_text};
use crate::results::Record;
use scraper::ElementRef;

/// Turns one located tile into a `Record`
pub struct RecordBuilder<'c> {
    config: &'c ExtractorConfig,
    filter: TileFilter<'c>,
}

impl<'c> RecordBuilder<'c> {
    pub fn new(config: &'c ExtractorConfig) -> Self {
        Self {
            config,
            filter: TileFilter::new(config),
        }
    }

    /// Build the record for `tile`, or `None` for pagination controls and
    /// tiles with no usable name or link
    pub fn build(&self, tile: ElementRef<'_>, document: &Document) -> Option<Record> {
        let Some(href) = first_named(tile, "a").and_then(|a| a.value().attr("href")) else {
            ::log::debug!("Dropping tile without a link");
            return None;
        };
        let link = self.config.absolute_link(href);

        let texts: Vec<String> = descendants(tile)
            .filter(|el| is_text_leaf(*el, tile))
            .map(full_text)
            .collect();

        let name = match title_text(tile).or_else(|| texts.first().cloned()) {
            Some(name) => name,
            None => {
                ::log::debug!("Dropping tile without name text: {}", link);
                return None;
            }
        };

        if name.trim().is_empty() {
            ::log::debug!("Dropping tile with blank name: {}", link);
            return None;
        }
        if self.config.is_noise_name(&name) {
            ::log::debug!("Skipping pagination tile {:?}", name);
            return None;
        }

        let extensions: Vec<String> = texts.into_iter().skip(1).filter(|t| *t != name).collect();
        let image = self.image(tile, document);

        Some(Record::new(name, extensions, link, image))
    }

    /// Resolve the tile's thumbnail.
    ///
    /// An `id` points at script-embedded data; otherwise `data-src` holds a
    /// direct URL. Generic knowledge-card art resolves to an empty string so
    /// the field is dropped.
    fn image(&self, tile: ElementRef<'_>, document: &Document) -> Option<String> {
        let img = first_named(tile, "img")?;

        if let Some(id) = img.value().attr("id") {
            let image = document.scripts().image(id);
            if image.is_none() {
                ::log::debug!("No script data found for image {}", id);
            }
            return image;
        }

        let Some(src) = img.value().attr("data-src") else {
            if self.filter.is_placeholder(img) {
                ::log::trace!("Placeholder image without id or data-src");
            }
            return None;
        };

        if self.config.is_ignored_image(src) {
            Some(String::new())
        } else {
            Some(src.to_string())
        }
    }
}

/// Text of the first descendant whose class attribute mentions "title"
fn title_text(tile: ElementRef<'_>) -> Option<String> {
    descendants(tile)
        .find(|el| el.value().attr("class").is_some_and(|c| c.contains("title")))
        .map(full_text)
}
