// Re-export modules
pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod script;
pub mod utils;

// Re-export commonly used types for convenience
pub use batch::{BatchOutcome, extract_file, write_extraction};
pub use config::ExtractorConfig;
pub use document::Document;
pub use error::{PanelError, Result};
pub use parsers::Parser;
pub use results::{EntityGroup, Extraction, Record};

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Extract records from raw markup with the given configuration
pub fn extract_str(html: &str, config: &ExtractorConfig) -> Extraction {
    Parser::new(config).extract_str(html)
}

/// Where saved pages come from
#[derive(Debug, Clone)]
pub enum Source {
    /// A single saved page
    File(PathBuf),
    /// Every `.html` page in a directory
    Directory(PathBuf),
}

/// Builder for extraction runs over one page or a directory of pages
pub struct Panels {
    source: Source,
    config: ExtractorConfig,
}

impl Panels {
    /// Create a new builder with default configuration
    pub fn new(source: Source) -> Self {
        Self {
            source,
            config: ExtractorConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = ExtractorConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self> {
        let config = ExtractorConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Set the maximum number of documents processed at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the directory receiving output files
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    /// Set the host prefixed onto extracted links
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Start extraction and get a receiver for per-document outcomes
    pub async fn run(self) -> Result<mpsc::Receiver<BatchOutcome>> {
        self.config.validate()?;

        let inputs = match self.source {
            Source::File(path) => vec![path],
            Source::Directory(dir) => batch::collect_inputs(&dir)?,
        };

        Ok(batch::start(Arc::new(self.config), inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::tests::fixtures::{carousel_page, gallery_page};
    use tempfile::TempDir;

    async fn drain(mut rx: mpsc::Receiver<BatchOutcome>) -> Vec<BatchOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }
        outcomes.sort_by(|a, b| a.input.cmp(&b.input));
        outcomes
    }

    #[test]
    fn test_extract_str() {
        let extraction = extract_str(&carousel_page(), &ExtractorConfig::default());
        assert_eq!(extraction.tags().collect::<Vec<_>>(), ["artworks"]);
        assert_eq!(extraction.record_count(), 5);
    }

    #[tokio::test]
    async fn test_run_over_directory() {
        let dir = TempDir::new().unwrap();
        let input_dir = dir.path().join("html");
        let output_dir = dir.path().join("out");
        std::fs::create_dir_all(&input_dir).unwrap();
        std::fs::write(input_dir.join("a.html"), carousel_page()).unwrap();
        std::fs::write(input_dir.join("b.html"), gallery_page()).unwrap();

        let panels = Panels::new(Source::Directory(input_dir.clone()))
            .with_max_concurrency(2)
            .with_output_dir(&output_dir);
        assert_eq!(panels.config().max_concurrency, 2);

        let outcomes = drain(panels.run().await.unwrap()).await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].input, input_dir.join("a.html"));
        assert_eq!(outcomes[0].records, 5);
        assert_eq!(outcomes[1].records, 4);
        assert_eq!(outcomes[0].output.as_ref().unwrap(), &output_dir.join("a.json"));
        assert!(output_dir.join("b.json").is_file());
    }

    #[tokio::test]
    async fn test_run_single_file_with_config() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("van-gogh-paintings.html");
        std::fs::write(&input, carousel_page()).unwrap();

        let config_path = dir.path().join("config.json");
        let config_json = format!(
            r#"{{"output_dir": {:?}, "max_concurrency": 1}}"#,
            dir.path().join("from-file").display().to_string()
        );
        std::fs::write(&config_path, config_json).unwrap();

        let panels = Panels::new(Source::File(input.clone()))
            .with_config_file(&config_path)
            .unwrap()
            .with_host("https://www.google.de/");
        assert_eq!(panels.config().max_concurrency, 1);

        let outcomes = drain(panels.run().await.unwrap()).await;
        assert_eq!(outcomes.len(), 1);
        let output = outcomes[0].output.as_ref().unwrap();
        assert_eq!(output, &dir.path().join("from-file").join("van-gogh-paintings.json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        let link = value["artworks"][0]["link"].as_str().unwrap();
        assert!(link.starts_with("https://www.google.de/search?"));
    }

    #[test]
    fn test_with_config_str_replaces_config() {
        let panels = Panels::new(Source::File(PathBuf::from("page.html")))
            .with_max_concurrency(9)
            .with_config_str(r#"{"default_tag": "items"}"#)
            .unwrap();
        assert_eq!(panels.config().default_tag, "items");
        assert_eq!(panels.config().max_concurrency, ExtractorConfig::default().max_concurrency);

        assert!(Panels::new(Source::File(PathBuf::from("page.html")))
            .with_config_str(r#"{"host": "nope"}"#)
            .is_err());
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_host() {
        let result = Panels::new(Source::File(PathBuf::from("page.html")))
            .with_host("not a url")
            .run()
            .await;
        assert!(matches!(result, Err(PanelError::InvalidHost(_))));
    }

    #[tokio::test]
    async fn test_run_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = Panels::new(Source::Directory(dir.path().join("missing"))).run().await;
        assert!(matches!(result, Err(PanelError::NotFound(_))));
    }
}
