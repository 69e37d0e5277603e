use crate::catalog::ProfileCatalog;
use crate::error::ProfileResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub write_parquet: bool,
    pub catalog: ProfileCatalog,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("all_data"),
            output_dir: PathBuf::from("demand_curves"),
            chart_width: 1200,
            chart_height: 700,
            write_parquet: true,
            catalog: ProfileCatalog::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config; missing fields fall back to the defaults.
    pub fn from_json_file(path: &Path) -> ProfileResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&text)?;
        config.catalog.validate()?;
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.output_dir.join("tables")
    }

    pub fn plots_dir(&self) -> PathBuf {
        self.output_dir.join("plots")
    }
}
