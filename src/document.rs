use crate::error::{PanelError, Result};
use crate::script::ScriptIndex;
use scraper::Html;
use std::path::Path;

/// A parsed search-results page.
///
/// Tile markup and thumbnails are often only reachable through inline
/// scripts, so those are indexed once on load.
pub struct Document {
    html: Html,
    scripts: ScriptIndex,
}

impl Document {
    /// Parse raw markup
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let html = Html::parse_document(&raw);
        let scripts = ScriptIndex::build(&raw);
        Self { html, scripts }
    }

    /// Read and parse a saved page. Empty files are rejected.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| PanelError::io(path, e))?;
        let raw = String::from_utf8_lossy(&bytes).into_owned();

        if raw.trim().is_empty() {
            return Err(PanelError::EmptyDocument(path.to_path_buf()));
        }

        ::log::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::parse(raw))
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn scripts(&self) -> &ScriptIndex {
        &self.scripts
    }
}
