use clap::Parser;
use panel_scrape::{ExtractorConfig, Source};
use std::path::PathBuf;

/// Sample page processed when no target is given
pub const DEFAULT_DOCUMENT: &str = "./html/van-gogh-paintings.html";

#[derive(Parser, Debug)]
#[command(name = "panel-scrape")]
#[command(about = "Extract entity records from saved knowledge-panel search pages")]
#[command(version)]
pub struct Args {
    /// Saved page to process, or "all" for every page in the input directory
    pub target: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory scanned by "all"
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving one JSON file per page
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Number of pages processed at once by "all"
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Host prefixed onto extracted links
    #[arg(long)]
    pub host: Option<String>,

    /// Print a single page's JSON to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl Args {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn load_config(&self) -> panel_scrape::Result<ExtractorConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractorConfig::from_file(path)?,
            None => ExtractorConfig::default(),
        };

        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Convert the positional target into a source
    pub fn source(&self, config: &ExtractorConfig) -> Source {
        match self.target.as_deref() {
            None => Source::File(PathBuf::from(DEFAULT_DOCUMENT)),
            Some(t) if t.eq_ignore_ascii_case("all") => Source::Directory(config.input_dir.clone()),
            Some(path) => Source::File(PathBuf::from(path)),
        }
    }
}
