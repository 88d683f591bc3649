use crate::error::{PanelError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use url::Url;

/// 1x1 transparent GIF the panel renders in place of images it hydrates from scripts.
pub const PLACEHOLDER_GIF: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAP///////yH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==";

/// Configuration for the knowledge-panel extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Host prefixed onto every tile's relative search link
    #[serde(default = "default_host")]
    pub host: String,

    /// Prefix of the `data-attrid` attribute marking the panel region
    #[serde(default = "default_panel_marker")]
    pub panel_marker: String,

    /// `src` of the placeholder image used for script-hydrated thumbnails
    #[serde(default = "default_placeholder_src")]
    pub placeholder_src: String,

    /// Tile names that are pagination controls rather than entities
    #[serde(default = "default_noise_names")]
    pub noise_names: Vec<String>,

    /// `data-src` fragments that mark a generic, low-value thumbnail
    #[serde(default = "default_ignored_image_hosts")]
    pub ignored_image_hosts: Vec<String>,

    /// Tag used when no heading precedes a group of tiles
    #[serde(default = "default_tag")]
    pub default_tag: String,

    /// Directory scanned in batch mode
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory receiving one JSON file per input document
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum number of documents extracted at once in batch mode
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_host() -> String {
    "https://www.google.com".to_string()
}

fn default_panel_marker() -> String {
    "kc:/".to_string()
}

fn default_placeholder_src() -> String {
    PLACEHOLDER_GIF.to_string()
}

fn default_noise_names() -> Vec<String> {
    vec!["See more".to_string(), "Show more".to_string()]
}

fn default_ignored_image_hosts() -> Vec<String> {
    vec!["www.gstatic.com/knowledgecard/".to_string()]
}

fn default_tag() -> String {
    "entities".to_string()
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("./html")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_max_concurrency() -> usize {
    4
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            panel_marker: default_panel_marker(),
            placeholder_src: default_placeholder_src(),
            noise_names: default_noise_names(),
            ignored_image_hosts: default_ignored_image_hosts(),
            default_tag: default_tag(),
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| PanelError::io(path, e))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| PanelError::io(path, e))?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject hosts that cannot prefix a relative link
    pub fn validate(&self) -> Result<()> {
        match Url::parse(&self.host) {
            Ok(url) if url.has_host() => Ok(()),
            _ => Err(PanelError::InvalidHost(self.host.clone())),
        }
    }

    /// Join the configured host with a relative reference, keeping the reference byte-for-byte
    pub fn absolute_link(&self, href: &str) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), href)
    }

    pub fn is_noise_name(&self, name: &str) -> bool {
        self.noise_names.iter().any(|n| n == name)
    }

    pub fn is_ignored_image(&self, src: &str) -> bool {
        self.ignored_image_hosts.iter().any(|h| src.contains(h.as_str()))
    }
}
