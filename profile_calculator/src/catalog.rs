use crate::error::{ProfileError, ProfileResult};
use crate::models::{DayType, ProfileKey, Season};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inputs and labels for one (season, day-type) curve set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub season: Season,
    pub day_type: DayType,
    /// Source A file, relative to the data directory
    pub source_a_file: String,
    pub title: String,
    /// Output stem; exporters add their own extension
    pub artifact_name: String,
}

impl ProfileEntry {
    pub fn key(&self) -> ProfileKey {
        ProfileKey::new(self.season, self.day_type)
    }
}

/// Source B files for a season. Entries may be glob patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSources {
    pub season: Season,
    pub source_b_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCatalog {
    pub profiles: Vec<ProfileEntry>,
    pub seasons: Vec<SeasonSources>,
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        let entry = |season, day_type, source_a_file: &str, title: &str, artifact_name: &str| ProfileEntry {
            season,
            day_type,
            source_a_file: source_a_file.to_string(),
            title: title.to_string(),
            artifact_name: artifact_name.to_string(),
        };

        let profiles = vec![
            entry(
                Season::Summer,
                DayType::Workday,
                "sum_workday_data.csv",
                "Electricity Demand on a Typical Summer Working Day",
                "summer_work_day",
            ),
            entry(
                Season::Summer,
                DayType::Saturday,
                "sum_sat_data.csv",
                "Electricity Demand on a Typical Summer Saturday",
                "summer_saturday",
            ),
            entry(
                Season::Summer,
                DayType::Sunday,
                "sum_sun_data.csv",
                "Electricity Demand on a Typical Summer Sunday",
                "summer_sunday",
            ),
            entry(
                Season::TransitionPeriod,
                DayType::Workday,
                "tp_workday_data.csv",
                "Electricity Demand on a Typical Spring/Autumn Working Day",
                "transition_period_work_day",
            ),
            entry(
                Season::TransitionPeriod,
                DayType::Saturday,
                "tp_sat_data.csv",
                "Electricity Demand on a Typical Autumn/Spring Saturday",
                "transition_period_saturday",
            ),
            entry(
                Season::TransitionPeriod,
                DayType::Sunday,
                "tp_sun_data.csv",
                "Electricity Demand on a Typical Spring/Autumn Sunday",
                "transition_period_sunday",
            ),
            entry(
                Season::Winter,
                DayType::Workday,
                "win_workday_data.csv",
                "Electricity Demand on a Winter Working Day",
                "winter_work_day",
            ),
            entry(
                Season::Winter,
                DayType::Saturday,
                "win_sat_data.csv",
                "Electricity Demand on a Typical Winter Saturday",
                "winter_saturday",
            ),
            entry(
                Season::Winter,
                DayType::Sunday,
                "win_sun_data.csv",
                "Electricity Demand on a Typical Winter Sunday",
                "winter_sunday",
            ),
        ];

        let seasons = vec![
            SeasonSources {
                season: Season::Summer,
                source_b_files: vec!["red_elec_summer.csv".to_string()],
            },
            SeasonSources {
                season: Season::TransitionPeriod,
                source_b_files: vec!["red_elec_spring.csv".to_string(), "red_elec_autumn.csv".to_string()],
            },
            SeasonSources {
                season: Season::Winter,
                source_b_files: vec!["red_elec_winter.csv".to_string()],
            },
        ];

        Self { profiles, seasons }
    }
}

impl ProfileCatalog {
    pub fn entry(&self, key: ProfileKey) -> ProfileResult<&ProfileEntry> {
        self.profiles
            .iter()
            .find(|e| e.key() == key)
            .ok_or_else(|| ProfileError::Config(format!("no catalog entry for {}", key)))
    }

    pub fn season_sources(&self, season: Season) -> ProfileResult<&SeasonSources> {
        self.seasons
            .iter()
            .find(|s| s.season == season)
            .ok_or_else(|| ProfileError::Config(format!("no Source B files listed for {}", season)))
    }

    /// Every (season, day-type) needs exactly one entry and every season a file list.
    pub fn validate(&self) -> ProfileResult<()> {
        for key in ProfileKey::all() {
            let count = self.profiles.iter().filter(|e| e.key() == key).count();
            if count != 1 {
                return Err(ProfileError::Config(format!(
                    "expected one catalog entry for {}, found {}",
                    key, count
                )));
            }
        }

        for season in Season::ALL {
            if self.season_sources(season)?.source_b_files.is_empty() {
                return Err(ProfileError::Config(format!("empty Source B file list for {}", season)));
            }
        }

        Ok(())
    }

    /// Expand a season's Source B entries against the data directory.
    ///
    /// Each entry is a file name or glob pattern; matches are sorted per
    /// entry, and entries keep their catalog order.
    pub fn resolve_source_b(&self, data_dir: &Path, season: Season) -> ProfileResult<Vec<PathBuf>> {
        let sources = self.season_sources(season)?;
        let mut paths = Vec::new();

        for pattern in &sources.source_b_files {
            let full = data_dir.join(pattern);
            let pattern_str = full.to_string_lossy();
            let mut matches: Vec<PathBuf> = glob::glob(&pattern_str)
                .map_err(|e| ProfileError::Config(format!("bad pattern '{}': {}", pattern_str, e)))?
                .filter_map(Result::ok)
                .collect();

            if matches.is_empty() {
                return Err(ProfileError::Config(format!("no files match '{}'", pattern_str)));
            }

            matches.sort();
            paths.extend(matches);
        }

        Ok(paths)
    }
}
