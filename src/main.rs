use anyhow::{Context, Result};
use profile_calculator::PipelineConfig;
use std::path::PathBuf;

mod batch_processor;
mod curve_renderer;
mod output_verifier;
mod table_exporter;

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

fn load_config(args: &[String]) -> Result<PipelineConfig> {
    let mut config = match arg_value(args, "--config") {
        Some(path) => PipelineConfig::from_json_file(&PathBuf::from(path))
            .with_context(|| format!("Failed to read config {}", path))?,
        None => PipelineConfig::default(),
    };

    // Use test data directory for testing
    if args.iter().any(|arg| arg == "--test") {
        config = config.with_data_dir("test_data");
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .build_global()?;

    let args: Vec<String> = std::env::args().collect();
    let config = load_config(&args)?;

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("Usage: demand_curves [--config <file.json>] [--test] [--sequential] [--no-charts]");
        println!("       demand_curves --verify-results [--config <file.json>]");
    } else if args.iter().any(|arg| arg == "--verify-results") {
        // Verify exported tables from a previous run
        let issues = output_verifier::verify_tables(&config.tables_dir())?;
        if issues > 0 {
            anyhow::bail!("{} issues found in exported tables", issues);
        }
    } else {
        println!("Using {} CPU cores", num_cpus::get());

        let mut processor = batch_processor::BatchProcessor::new(config);
        if args.iter().any(|arg| arg == "--sequential") {
            processor = processor.sequential();
        }
        if args.iter().any(|arg| arg == "--no-charts") {
            processor = processor.without_charts();
        }

        let start = std::time::Instant::now();
        let report = processor.process_all()?;
        println!("\n✅ Processing complete in {:?}!", start.elapsed());

        if !report.is_success() {
            anyhow::bail!("{} of 9 profiles failed", report.failed.len());
        }
    }

    Ok(())
}
