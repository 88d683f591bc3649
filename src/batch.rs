use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::error::{PanelError, Result};
use crate::parsers::Parser;
use crate::results::Extraction;
use crate::utils::{is_html_file, output_path};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

/// Result of processing one document in batch mode
#[derive(Debug)]
pub struct BatchOutcome {
    /// Document that was processed
    pub input: PathBuf,
    /// Written output file, or why the document was abandoned
    pub output: Result<PathBuf>,
    /// Number of records written
    pub records: usize,
}

/// Read, parse and extract one saved page
pub fn extract_file<P: AsRef<Path>>(path: P, config: &ExtractorConfig) -> Result<Extraction> {
    let document = Document::from_file(path)?;
    Ok(Parser::new(config).extract(&document))
}

/// Write an extraction as pretty JSON, creating parent directories as needed
pub fn write_extraction(extraction: &Extraction, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PanelError::io(parent, e))?;
    }
    std::fs::write(path, extraction.to_pretty_json()?).map_err(|e| PanelError::io(path, e))
}

/// Extract one document and write it next to the others in `output_dir`
pub fn process_file(input: &Path, config: &ExtractorConfig) -> Result<(PathBuf, usize)> {
    let extraction = extract_file(input, config)?;
    let output = output_path(input, &config.output_dir);
    write_extraction(&extraction, &output)?;

    ::log::info!(
        "Wrote {} records under {} tags to {}",
        extraction.record_count(),
        extraction.len(),
        output.display()
    );

    Ok((output, extraction.record_count()))
}

/// Saved pages in `dir`, sorted by file name
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PanelError::NotFound(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| PanelError::io(dir, e))?;
    let mut inputs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_html_file(path))
        .collect();
    inputs.sort();

    Ok(inputs)
}

/// Starts extracting `inputs` and returns a receiver yielding one outcome per document.
///
/// Each document runs on a blocking worker; at most `config.max_concurrency`
/// run at once. Documents share nothing, so a failing one is reported and
/// the rest carry on.
pub fn start(config: Arc<ExtractorConfig>, inputs: Vec<PathBuf>) -> mpsc::Receiver<BatchOutcome> {
    let (result_tx, result_rx) = mpsc::channel::<BatchOutcome>(inputs.len().max(1));
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));

    ::log::info!(
        "Processing {} documents with up to {} workers",
        inputs.len(),
        config.max_concurrency.max(1)
    );

    for input in inputs {
        spawn_worker(
            input,
            Arc::clone(&config),
            Arc::clone(&semaphore),
            result_tx.clone(),
        );
    }

    // Channel closes once every worker has reported
    drop(result_tx);

    result_rx
}

fn spawn_worker(
    input: PathBuf,
    config: Arc<ExtractorConfig>,
    semaphore: Arc<Semaphore>,
    result_tx: mpsc::Sender<BatchOutcome>,
) {
    tokio::spawn(async move {
        let Ok(_permit) = semaphore.acquire_owned().await else {
            return;
        };

        ::log::info!("{}", input.display());

        let path = input.clone();
        let outcome = match tokio::task::spawn_blocking(move || process_file(&path, &config)).await {
            Ok(Ok((output, records))) => BatchOutcome {
                input,
                output: Ok(output),
                records,
            },
            Ok(Err(e)) => {
                ::log::warn!("Skipping {}: {}", input.display(), e);
                BatchOutcome {
                    input,
                    output: Err(e),
                    records: 0,
                }
            }
            Err(join_error) => {
                ::log::warn!("Worker for {} failed: {}", input.display(), join_error);
                BatchOutcome {
                    output: Err(PanelError::io(
                        &input,
                        std::io::Error::other(join_error.to_string()),
                    )),
                    input,
                    records: 0,
                }
            }
        };

        if result_tx.send(outcome).await.is_err() {
            ::log::debug!("Batch receiver dropped before all outcomes were sent");
        }
    });
}
