pub mod builder;
pub mod dom;
pub mod heading;
pub mod locator;

#[cfg(test)]
pub(crate) mod tests;

use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::results::Extraction;
use builder::RecordBuilder;
use locator::Locator;

/// Knowledge-panel extractor: locates tiles, builds records and groups
/// them by entity-type tag
pub struct Parser<'c> {
    locator: Locator<'c>,
    builder: RecordBuilder<'c>,
}

impl<'c> Parser<'c> {
    pub fn new(config: &'c ExtractorConfig) -> Self {
        Self {
            locator: Locator::new(config),
            builder: RecordBuilder::new(config),
        }
    }

    /// Extract every record from a parsed document
    pub fn extract(&self, document: &Document) -> Extraction {
        let candidates = self.locator.locate(document);
        let total = candidates.len();

        let extraction: Extraction = candidates
            .into_iter()
            .filter_map(|candidate| {
                let record = self.builder.build(candidate.root.element(), document)?;
                Some((candidate.tag, record))
            })
            .collect();

        ::log::debug!(
            "Built {} records under {} tags from {} candidates",
            extraction.record_count(),
            extraction.len(),
            total
        );

        extraction
    }

    /// Parse raw markup and extract from it
    pub fn extract_str(&self, html: &str) -> Extraction {
        self.extract(&Document::parse(html))
    }
}
