use crate::curve_renderer::CurveRenderer;
use crate::table_exporter::TableExporter;
use anyhow::Result;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use profile_calculator::{PipelineConfig, ProfileKey, ProfilePipeline};
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct BatchReport {
    pub tables: Vec<PathBuf>,
    pub charts: Vec<PathBuf>,
    pub failed: Vec<(ProfileKey, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct BatchProcessor {
    config: PipelineConfig,
    parallel: bool,
    render: bool,
}

impl BatchProcessor {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            parallel: true,
            render: true,
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn without_charts(mut self) -> Self {
        self.render = false;
        self
    }

    /// Compute every (season, day-type) profile, then export and render each one.
    pub fn process_all(&self) -> Result<BatchReport> {
        println!("🚀 Demand Curve Comparison - BDEW / ED Netze / Red Electrica");
        println!("Started {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!("Data directory: {}", self.config.data_dir.display());
        println!("{}", "=".repeat(60));

        let keys = ProfileKey::all();
        let pb = ProgressBar::new(keys.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?,
        );

        let mut pipeline = ProfilePipeline::new(self.config.clone());
        if !self.parallel {
            pipeline = pipeline.sequential();
        }

        let set = pipeline.run_all_with_progress(|key, ok| {
            if !ok {
                pb.println(format!("  ❌ {} failed", key));
            }
            pb.inc(1);
        });
        pb.finish_with_message("profiles computed");

        let exporter = TableExporter::new(self.config.tables_dir(), self.config.write_parquet)?;
        let renderer = if self.render {
            Some(CurveRenderer::new(
                self.config.plots_dir(),
                self.config.chart_width,
                self.config.chart_height,
            )?)
        } else {
            None
        };

        let mut report = BatchReport::default();
        for (key, error) in &set.failures {
            report.failed.push((*key, error.clone()));
        }

        for profile in set.profiles.values() {
            println!("\n📈 {} ({})", profile.title, profile.key);

            let written = exporter.export(profile)?;
            for path in &written {
                println!("  💾 {}", path.display());
            }
            report.tables.extend(written);

            if let Some(renderer) = &renderer {
                let chart = renderer.render(profile)?;
                println!("  📊 {}", chart.display());
                report.charts.push(chart);
            }

            let (bdew_peak, ed_netze_peak, red_electrica_peak) = profile.peak_hours();
            println!(
                "  Peak hours: BDEW {}, ED Netze {}, Red Electrica {}",
                bdew_peak, ed_netze_peak, red_electrica_peak
            );
        }

        println!("\n{}", "=".repeat(60));
        println!(
            "✅ {} profiles written, {} failed",
            set.profiles.len(),
            report.failed.len()
        );
        for (key, error) in &report.failed {
            println!("  ❌ {}: {}", key, error);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output_verifier::verify_tables;
    use chrono::{Duration, NaiveDate};
    use profile_calculator::ProfileCatalog;
    use std::fs;
    use std::path::Path;

    fn write_inputs(dir: &Path) {
        let catalog = ProfileCatalog::default();

        let mut source_a = String::from("bdew,ed_netze\n");
        for i in 0..96 {
            let hour = i / 4;
            source_a.push_str(&format!("{},{}\n", 500 + hour * 20, 40 + (hour % 6) * 3));
        }
        for entry in &catalog.profiles {
            fs::write(dir.join(&entry.source_a_file), &source_a).unwrap();
        }

        // Three weeks starting on a Monday
        let start = NaiveDate::from_ymd_opt(2019, 4, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut source_b = String::from("id,name,datetime,value\n");
        for i in 0..21 * 24 {
            let ts = (start + Duration::hours(i)).format("%Y-%m-%dT%H:%M:%S%.3f+02:00");
            source_b.push_str(&format!("1293,Demanda real,{},{}\n", ts, 22_000 + (i % 24) * 250));
        }
        for season in &catalog.seasons {
            for file in &season.source_b_files {
                fs::write(dir.join(file), &source_b).unwrap();
            }
        }
    }

    #[test]
    fn test_process_all_exports_nine_verified_tables() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("all_data");
        fs::create_dir_all(&data_dir).unwrap();
        write_inputs(&data_dir);

        let mut config = PipelineConfig::default().with_data_dir(&data_dir);
        config.output_dir = dir.path().join("out");
        config.write_parquet = false;

        let report = BatchProcessor::new(config.clone())
            .sequential()
            .without_charts()
            .process_all()
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.tables.len(), 9);
        assert!(report.charts.is_empty());
        assert_eq!(verify_tables(&config.tables_dir()).unwrap(), 0);
    }

    #[test]
    fn test_failed_profile_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        fs::remove_file(dir.path().join("red_elec_summer.csv")).unwrap();

        let mut config = PipelineConfig::default().with_data_dir(dir.path());
        config.output_dir = dir.path().join("out");
        config.write_parquet = false;

        let report = BatchProcessor::new(config).without_charts().process_all().unwrap();

        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 3);
        assert_eq!(report.tables.len(), 6);
    }
}
