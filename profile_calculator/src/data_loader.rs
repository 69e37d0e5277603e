use crate::error::{ProfileError, ProfileResult};
use crate::models::{QuarterHourRow, SourceBRow};
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Reads the raw CSV tables of both sources into typed rows, preserving row order.
pub struct DataLoader;

impl DataLoader {
    /// Column types are inferred from every row, not a leading sample.
    pub fn read_csv(path: &Path) -> ProfileResult<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;
        Ok(df)
    }

    /// Load one Source A table (`bdew`, `ed_netze`); other columns are ignored.
    pub fn load_source_a(path: &Path) -> ProfileResult<Vec<QuarterHourRow>> {
        let df = Self::read_csv(path)?;
        let rows = Self::source_a_rows(&df)?;
        info!("Loaded {} quarter-hour rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    /// Load one Source B table (`datetime`, `value`); `id` and `name` are ignored.
    pub fn load_source_b(path: &Path) -> ProfileResult<Vec<SourceBRow>> {
        let df = Self::read_csv(path)?;
        let rows = Self::source_b_rows(&df)?;
        info!("Loaded {} hourly rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    /// Concatenate several Source B files into one bag, in the given order.
    pub fn load_source_b_files(paths: &[PathBuf]) -> ProfileResult<Vec<SourceBRow>> {
        let mut rows = Vec::new();
        for path in paths {
            rows.extend(Self::load_source_b(path)?);
        }
        Ok(rows)
    }

    pub fn source_a_rows(df: &DataFrame) -> ProfileResult<Vec<QuarterHourRow>> {
        let bdew = float_column(df, "bdew")?;
        let ed_netze = float_column(df, "ed_netze")?;

        Ok(bdew
            .into_iter()
            .zip(ed_netze)
            .map(|(bdew, ed_netze)| QuarterHourRow { bdew, ed_netze })
            .collect())
    }

    pub fn source_b_rows(df: &DataFrame) -> ProfileResult<Vec<SourceBRow>> {
        let datetimes = string_column(df, "datetime")?;
        let values = float_column(df, "value")?;

        Ok(datetimes
            .into_iter()
            .zip(values)
            .map(|(datetime, value)| SourceBRow { datetime, value })
            .collect())
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> ProfileResult<&'a Series> {
    df.column(name).map_err(|_| ProfileError::MissingColumn {
        column: name.to_string(),
    })
}

fn float_column(df: &DataFrame, name: &str) -> ProfileResult<Vec<f64>> {
    let series = column(df, name)?.cast(&DataType::Float64)?;
    let values = series.f64()?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| ProfileError::MissingValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}

fn string_column(df: &DataFrame, name: &str) -> ProfileResult<Vec<String>> {
    let series = column(df, name)?.cast(&DataType::String)?;
    let values = series.str()?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.map(str::to_string).ok_or_else(|| ProfileError::MissingValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}
