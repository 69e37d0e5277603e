use crate::averager::HourlyAverager;
use crate::catalog::ProfileEntry;
use crate::classifier::DayTypeClassifier;
use crate::config::PipelineConfig;
use crate::data_loader::DataLoader;
use crate::error::ProfileResult;
use crate::merger::ProfileMerger;
use crate::models::{DemandProfile, ProfileKey, QuarterHourRow, Season, SourceBRow};
use crate::resampler::HourlyResampler;
use log::{info, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Outcome of a batch run, keyed by (season, day-type).
#[derive(Debug, Default)]
pub struct ProfileSet {
    pub profiles: BTreeMap<ProfileKey, DemandProfile>,
    pub failures: BTreeMap<ProfileKey, String>,
}

impl ProfileSet {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compute one curve set from already loaded inputs.
///
/// `source_b` is the whole season bag; for the transition period it must
/// already hold spring and autumn rows together.
pub fn compute_profile(
    entry: &ProfileEntry,
    source_a: &[QuarterHourRow],
    source_b: &[SourceBRow],
) -> ProfileResult<DemandProfile> {
    let hourly = HourlyResampler::resample(source_a)?;
    let classified = DayTypeClassifier::classify(source_b, entry.day_type)?;
    let aligned = HourlyAverager::aligned_profile(&classified)?;
    let table = ProfileMerger::merge_normalized(&hourly, &aligned)?;

    Ok(DemandProfile {
        key: entry.key(),
        title: entry.title.clone(),
        artifact_name: entry.artifact_name.clone(),
        table,
    })
}

pub struct ProfilePipeline {
    config: PipelineConfig,
    parallel: bool,
}

impl ProfilePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            parallel: true,
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// All Source B rows of a season, files concatenated before any averaging.
    pub fn load_season_source_b(&self, season: Season) -> ProfileResult<Vec<SourceBRow>> {
        let paths = self
            .config
            .catalog
            .resolve_source_b(&self.config.data_dir, season)?;
        let rows = DataLoader::load_source_b_files(&paths)?;
        info!("{}: {} Source B rows from {} file(s)", season, rows.len(), paths.len());
        Ok(rows)
    }

    pub fn load_source_a(&self, key: ProfileKey) -> ProfileResult<Vec<QuarterHourRow>> {
        let entry = self.config.catalog.entry(key)?;
        DataLoader::load_source_a(&self.config.data_dir.join(&entry.source_a_file))
    }

    /// Load and compute a single (season, day-type).
    pub fn run_profile(&self, key: ProfileKey) -> ProfileResult<DemandProfile> {
        let entry = self.config.catalog.entry(key)?;
        let source_a = self.load_source_a(key)?;
        let source_b = self.load_season_source_b(key.season)?;
        compute_profile(entry, &source_a, &source_b)
    }

    pub fn run_all(&self) -> ProfileSet {
        self.run_all_with_progress(|_, _| {})
    }

    /// Compute all nine profiles. A failure only drops its own combination.
    ///
    /// `on_done` is called once per profile with whether it succeeded; it may
    /// be called from several threads.
    pub fn run_all_with_progress<F>(&self, on_done: F) -> ProfileSet
    where
        F: Fn(&ProfileKey, bool) + Sync,
    {
        let season_rows: BTreeMap<Season, Result<Vec<SourceBRow>, String>> = Season::ALL
            .iter()
            .map(|season| (*season, self.load_season_source_b(*season).map_err(|e| e.to_string())))
            .collect();

        let keys = ProfileKey::all();
        let compute = |key: &ProfileKey| {
            let outcome = self.compute_key(*key, &season_rows);
            on_done(key, outcome.is_ok());
            (*key, outcome)
        };

        let outcomes: Vec<(ProfileKey, Result<DemandProfile, String>)> = if self.parallel {
            keys.par_iter().map(compute).collect()
        } else {
            keys.iter().map(compute).collect()
        };

        let mut set = ProfileSet::default();
        for (key, outcome) in outcomes {
            match outcome {
                Ok(profile) => {
                    set.profiles.insert(key, profile);
                }
                Err(e) => {
                    warn!("{} failed: {}", key, e);
                    set.failures.insert(key, e);
                }
            }
        }
        set
    }

    fn compute_key(
        &self,
        key: ProfileKey,
        season_rows: &BTreeMap<Season, Result<Vec<SourceBRow>, String>>,
    ) -> Result<DemandProfile, String> {
        let source_b = match season_rows.get(&key.season) {
            Some(Ok(rows)) => rows,
            Some(Err(e)) => return Err(format!("Source B: {}", e)),
            None => return Err(format!("Source B: no rows loaded for {}", key.season)),
        };

        let entry = self.config.catalog.entry(key).map_err(|e| e.to_string())?;
        let source_a = self.load_source_a(key).map_err(|e| format!("Source A: {}", e))?;
        compute_profile(entry, &source_a, source_b).map_err(|e| e.to_string())
    }
}
