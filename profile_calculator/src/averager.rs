use crate::error::{ProfileError, ProfileResult};
use crate::models::{AlignedHourlyRow, AlignedHourlyTable, ClassifiedRow, HOURS_PER_DAY, OFFSET_CORRECTION_HOURS};
use log::debug;

/// Averages Source B rows into one typical day and moves it onto Source A's clock.
pub struct HourlyAverager;

impl HourlyAverager {
    /// Mean value per hour-of-day (index 0..23). Every hour needs at least one row.
    pub fn hourly_means(rows: &[ClassifiedRow]) -> ProfileResult<[f64; HOURS_PER_DAY]> {
        let mut sums = [0.0_f64; HOURS_PER_DAY];
        let mut counts = [0_usize; HOURS_PER_DAY];

        for row in rows {
            let hour = row.hour_of_day();
            sums[hour] += row.value;
            counts[hour] += 1;
        }

        let mut means = [0.0_f64; HOURS_PER_DAY];
        for hour in 0..HOURS_PER_DAY {
            if counts[hour] == 0 {
                return Err(ProfileError::MissingHour { hour });
            }
            means[hour] = sums[hour] / counts[hour] as f64;
        }

        debug!("Averaged {} rows, counts per hour {:?}", rows.len(), counts);
        Ok(means)
    }

    /// Relabel hour-of-day 0 as 24, giving values in label order 1, 2, ..., 24.
    pub fn rekey(means: &[f64; HOURS_PER_DAY]) -> [f64; HOURS_PER_DAY] {
        let mut labelled = [0.0_f64; HOURS_PER_DAY];
        for (position, value) in labelled.iter_mut().enumerate() {
            *value = means[(position + 1) % HOURS_PER_DAY];
        }
        labelled
    }

    /// Shift a label-ordered day backward by the offset correction.
    ///
    /// Label h takes the value of label h + 2. The last two labels are not
    /// filled from the shift: they hold the values labels 1 and 2 had before it.
    pub fn offset_correct(labelled: &[f64; HOURS_PER_DAY]) -> [f64; HOURS_PER_DAY] {
        let held: [f64; OFFSET_CORRECTION_HOURS] = [labelled[0], labelled[1]];
        let shifted_len = HOURS_PER_DAY - OFFSET_CORRECTION_HOURS;

        let mut corrected = [0.0_f64; HOURS_PER_DAY];
        corrected[..shifted_len].copy_from_slice(&labelled[OFFSET_CORRECTION_HOURS..]);
        corrected[shifted_len..].copy_from_slice(&held);
        corrected
    }

    /// Full Source B profile: means, relabel, offset correction.
    pub fn aligned_profile(rows: &[ClassifiedRow]) -> ProfileResult<AlignedHourlyTable> {
        let means = Self::hourly_means(rows)?;
        let corrected = Self::offset_correct(&Self::rekey(&means));

        let rows = corrected
            .iter()
            .enumerate()
            .map(|(position, value)| AlignedHourlyRow {
                hour: position as u32 + 1,
                red_electrica: *value,
            })
            .collect();

        Ok(AlignedHourlyTable { rows })
    }
}
