use anyhow::{Context, Result};
use polars::prelude::*;
use profile_calculator::DemandProfile;
use std::fs::File;
use std::path::{Path, PathBuf};

pub struct TableExporter {
    tables_dir: PathBuf,
    write_parquet: bool,
}

impl TableExporter {
    pub fn new(tables_dir: PathBuf, write_parquet: bool) -> Result<Self> {
        std::fs::create_dir_all(&tables_dir)
            .with_context(|| format!("Failed to create {}", tables_dir.display()))?;

        Ok(Self {
            tables_dir,
            write_parquet,
        })
    }

    /// Write `<artifact>.csv` (and `.parquet`), returning the paths written.
    pub fn export(&self, profile: &DemandProfile) -> Result<Vec<PathBuf>> {
        let mut df = to_dataframe(profile)?;
        let mut written = Vec::new();

        let csv_path = self.tables_dir.join(format!("{}.csv", profile.artifact_name));
        CsvWriter::new(create(&csv_path)?).finish(&mut df)?;
        written.push(csv_path);

        if self.write_parquet {
            let parquet_path = self.tables_dir.join(format!("{}.parquet", profile.artifact_name));
            ParquetWriter::new(create(&parquet_path)?).finish(&mut df)?;
            written.push(parquet_path);
        }

        Ok(written)
    }
}

pub fn to_dataframe(profile: &DemandProfile) -> Result<DataFrame> {
    let hours: Vec<i64> = profile.table.hours().into_iter().map(i64::from).collect();

    let df = DataFrame::new(vec![
        Series::new("hour", hours),
        Series::new("bdew", profile.table.bdew()),
        Series::new("ed_netze", profile.table.ed_netze()),
        Series::new("red_electrica", profile.table.red_electrica()),
    ])?;
    Ok(df)
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}
