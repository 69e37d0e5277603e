use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use profile_calculator::{DayType, PipelineConfig, ProfileKey, ProfilePipeline, Season};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "profile_calculator")]
#[command(about = "Compute a normalized BDEW / ED Netze / Red Electrica demand profile")]
struct Args {
    /// Season to compute
    #[arg(short, long, value_enum)]
    season: Season,

    /// Day-type to compute
    #[arg(short, long, value_enum)]
    day_type: DayType,

    /// Directory holding the raw CSV files (overrides the config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON pipeline config with data directory and file catalog
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    output: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Summary,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(data_dir) = args.data_dir {
        config = config.with_data_dir(data_dir);
    }

    let key = ProfileKey::new(args.season, args.day_type);

    info!("Computing {} profile from {}", key, config.data_dir.display());
    let pipeline = ProfilePipeline::new(config);
    let profile = pipeline
        .run_profile(key)
        .with_context(|| format!("Failed to compute {} profile", key))?;

    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&profile)?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("hour,bdew,ed_netze,red_electrica");
            for row in &profile.table.rows {
                println!(
                    "{},{:.3},{:.3},{:.3}",
                    row.hour, row.bdew, row.ed_netze, row.red_electrica
                );
            }
        }
        OutputFormat::Summary => {
            let (bdew_peak, ed_netze_peak, red_electrica_peak) = profile.peak_hours();

            println!("{}", profile.title);
            println!("{}", "=".repeat(profile.title.len()));
            println!("Peak hour BDEW:          {}", bdew_peak);
            println!("Peak hour ED Netze:      {}", ed_netze_peak);
            println!("Peak hour Red Electrica: {}", red_electrica_peak);
            println!();
            println!("Hour    BDEW  ED Netze  Red Electrica");
            for row in &profile.table.rows {
                println!(
                    "{:>4} {:>7.3} {:>9.3} {:>14.3}",
                    row.hour, row.bdew, row.ed_netze, row.red_electrica
                );
            }
        }
    }

    Ok(())
}
