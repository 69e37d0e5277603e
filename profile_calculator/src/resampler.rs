use crate::error::{ProfileError, ProfileResult};
use crate::models::{HourlyRow, HourlyTable, QuarterHourRow, HOURS_PER_DAY, QUARTER_HOURS_PER_HOUR};

/// Collapses a representative day of 15-minute readings into hourly totals.
pub struct HourlyResampler;

impl HourlyResampler {
    /// Sum each block of four consecutive rows into one hour, labelled 1..24.
    ///
    /// The block is positional: row order is trusted, timestamps are not
    /// consulted. Tables that do not cover exactly one day are rejected.
    pub fn resample(rows: &[QuarterHourRow]) -> ProfileResult<HourlyTable> {
        if rows.len() % QUARTER_HOURS_PER_HOUR != 0 {
            return Err(ProfileError::NotQuarterHourAligned { rows: rows.len() });
        }

        let expected = HOURS_PER_DAY * QUARTER_HOURS_PER_HOUR;
        if rows.len() != expected {
            return Err(ProfileError::RowCount {
                expected,
                actual: rows.len(),
            });
        }

        let rows = rows
            .chunks_exact(QUARTER_HOURS_PER_HOUR)
            .enumerate()
            .map(|(idx, block)| HourlyRow {
                hour: idx as u32 + 1,
                bdew: block.iter().map(|r| r.bdew).sum(),
                ed_netze: block.iter().map(|r| r.ed_netze).sum(),
            })
            .collect();

        Ok(HourlyTable { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_day(bdew: f64, ed_netze: f64) -> Vec<QuarterHourRow> {
        vec![QuarterHourRow { bdew, ed_netze }; 96]
    }

    #[test]
    fn test_constant_input() {
        let table = HourlyResampler::resample(&constant_day(1.0, 2.0)).unwrap();

        assert_eq!(table.rows.len(), 24);
        for (idx, row) in table.rows.iter().enumerate() {
            assert_eq!(row.hour, idx as u32 + 1);
            assert_eq!(row.bdew, 4.0);
            assert_eq!(row.ed_netze, 8.0);
        }
    }

    #[test]
    fn test_blocks_and_sum_conservation() {
        let rows: Vec<QuarterHourRow> = (0..96)
            .map(|i| QuarterHourRow {
                bdew: i as f64,
                ed_netze: (i % 7) as f64 * 0.5,
            })
            .collect();

        let table = HourlyResampler::resample(&rows).unwrap();

        // Hour 1 is rows 0..4, hour 24 is rows 92..96
        assert_eq!(table.rows[0].bdew, 0.0 + 1.0 + 2.0 + 3.0);
        assert_eq!(table.rows[23].bdew, 92.0 + 93.0 + 94.0 + 95.0);

        let input_bdew: f64 = rows.iter().map(|r| r.bdew).sum();
        let input_ed: f64 = rows.iter().map(|r| r.ed_netze).sum();
        let output_bdew: f64 = table.rows.iter().map(|r| r.bdew).sum();
        let output_ed: f64 = table.rows.iter().map(|r| r.ed_netze).sum();
        assert!((input_bdew - output_bdew).abs() < 1e-9);
        assert!((input_ed - output_ed).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_partial_hour() {
        let rows = vec![QuarterHourRow { bdew: 1.0, ed_netze: 1.0 }; 95];
        assert!(matches!(
            HourlyResampler::resample(&rows),
            Err(ProfileError::NotQuarterHourAligned { rows: 95 })
        ));
    }

    #[test]
    fn test_rejects_wrong_day_length() {
        let rows = vec![QuarterHourRow { bdew: 1.0, ed_netze: 1.0 }; 100];
        assert!(matches!(
            HourlyResampler::resample(&rows),
            Err(ProfileError::RowCount { expected: 96, actual: 100 })
        ));
    }
}
