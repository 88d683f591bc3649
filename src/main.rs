use clap::Parser;
use panel_scrape::{Panels, Source, extract_file};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let source = args.source(&config);

    if args.stdout {
        let Source::File(path) = &source else {
            ::log::error!("--stdout needs a single page, not a directory");
            std::process::exit(2);
        };
        match extract_file(path, &config).and_then(|e| e.to_pretty_json()) {
            Ok(json) => print!("{json}"),
            Err(e) => {
                ::log::error!("Failed to extract {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    ::log::info!("Starting extraction for {:?}", source);

    let mut rx = match Panels::new(source).with_config(config).run().await {
        Ok(rx) => rx,
        Err(e) => {
            ::log::error!("Failed to start extraction: {}", e);
            std::process::exit(1);
        }
    };

    let start_time = std::time::Instant::now();
    let mut documents = 0;
    let mut failures = 0;
    let mut records = 0;

    while let Some(outcome) = rx.recv().await {
        documents += 1;
        records += outcome.records;
        match outcome.output {
            Ok(path) => println!("{} -> {}", outcome.input.display(), path.display()),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", outcome.input.display(), e);
            }
        }
    }

    ::log::info!(
        "Extraction complete - {} documents ({} failed), {} records in {:.2} seconds",
        documents,
        failures,
        records,
        start_time.elapsed().as_secs_f64()
    );

    if failures > 0 && failures == documents {
        std::process::exit(1);
    }
}
