use clap::Parser;
use panel_scrape::{Panels, Source};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Saved page or directory of saved pages
    #[arg(short, long)]
    path: PathBuf,

    /// JSON configuration string
    #[arg(short, long)]
    config: Option<String>,

    /// Path to JSON configuration file
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Maximum concurrency level
    #[arg(long)]
    concurrency: Option<usize>,

    /// Directory receiving the JSON files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Host prefixed onto extracted links
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    println!("Starting extraction for: {}", args.path.display());

    let source = if args.path.is_dir() {
        Source::Directory(args.path)
    } else {
        Source::File(args.path)
    };
    let mut panels = Panels::new(source);

    // Apply configuration from file if specified
    if let Some(config_file) = args.config_file {
        println!("Loading configuration from file: {}", config_file.display());
        panels = panels.with_config_file(config_file)?;
    }

    // Apply configuration from string if specified (overrides file config)
    if let Some(config_str) = args.config {
        println!("Applying configuration from string");
        panels = panels.with_config_str(&config_str)?;
    }

    // Apply command-line overrides
    if let Some(concurrency) = args.concurrency {
        println!("Overriding max concurrency: {}", concurrency);
        panels = panels.with_max_concurrency(concurrency);
    }

    if let Some(output_dir) = args.output_dir {
        println!("Overriding output directory: {}", output_dir.display());
        panels = panels.with_output_dir(output_dir);
    }

    if let Some(host) = args.host {
        println!("Overriding host: {}", host);
        panels = panels.with_host(host);
    }

    let mut rx = panels.run().await?;

    let mut documents = 0;
    let mut records = 0;
    let start_time = std::time::Instant::now();

    while let Some(outcome) = rx.recv().await {
        documents += 1;
        records += outcome.records;
        match outcome.output {
            Ok(path) => println!("Wrote {} records to {}", outcome.records, path.display()),
            Err(e) => println!("Skipped {}: {}", outcome.input.display(), e),
        }
    }

    println!(
        "Extraction complete. Processed {} documents ({} records) in {:.2} seconds.",
        documents,
        records,
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
