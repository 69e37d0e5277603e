use crate::error::{ProfileError, ProfileResult};
use crate::models::{AlignedHourlyTable, HourlyTable, MergedRow, MergedTable, NORMALIZED_DECIMALS};
use log::warn;
use std::collections::BTreeMap;

pub struct ProfileMerger;

impl ProfileMerger {
    /// Join both sources on hour and scale every demand column to its own peak.
    ///
    /// The output follows the Source A row order. Non-positive maxima are not
    /// rejected; they only produce a warning.
    pub fn merge_normalized(
        source_a: &HourlyTable,
        source_b: &AlignedHourlyTable,
    ) -> ProfileResult<MergedTable> {
        let joined = Self::join(source_a, source_b)?;

        let bdew_max = column_max(joined.iter().map(|r| r.bdew), "bdew");
        let ed_netze_max = column_max(joined.iter().map(|r| r.ed_netze), "ed_netze");
        let red_electrica_max = column_max(joined.iter().map(|r| r.red_electrica), "red_electrica");

        let rows = joined
            .iter()
            .map(|r| MergedRow {
                hour: r.hour,
                bdew: round_to(r.bdew / bdew_max, NORMALIZED_DECIMALS),
                ed_netze: round_to(r.ed_netze / ed_netze_max, NORMALIZED_DECIMALS),
                red_electrica: round_to(r.red_electrica / red_electrica_max, NORMALIZED_DECIMALS),
            })
            .collect();

        Ok(MergedTable { rows })
    }

    /// Inner join on hour. Both sides must carry the same hour labels.
    pub fn join(source_a: &HourlyTable, source_b: &AlignedHourlyTable) -> ProfileResult<Vec<MergedRow>> {
        let by_hour: BTreeMap<u32, f64> = source_b
            .rows
            .iter()
            .map(|r| (r.hour, r.red_electrica))
            .collect();

        let mut left: Vec<u32> = source_a.rows.iter().map(|r| r.hour).collect();
        let mut right: Vec<u32> = by_hour.keys().copied().collect();
        left.sort_unstable();
        left.dedup();
        right.sort_unstable();
        if left != right || left.len() != source_a.rows.len() || right.len() != source_b.rows.len() {
            return Err(ProfileError::JoinMismatch { left, right });
        }

        Ok(source_a
            .rows
            .iter()
            .filter_map(|a| {
                by_hour.get(&a.hour).map(|red_electrica| MergedRow {
                    hour: a.hour,
                    bdew: a.bdew,
                    ed_netze: a.ed_netze,
                    red_electrica: *red_electrica,
                })
            })
            .collect())
    }
}

fn column_max(values: impl Iterator<Item = f64>, column: &str) -> f64 {
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 {
        warn!("Column {} has non-positive maximum {}; ratios will fall outside [0, 1]", column, max);
    }
    max
}

/// Round half to even, the way dataframe libraries round.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlignedHourlyRow, HourlyRow};

    fn source_a(bdew: impl Fn(u32) -> f64, ed_netze: impl Fn(u32) -> f64) -> HourlyTable {
        HourlyTable {
            rows: (1..=24)
                .map(|hour| HourlyRow {
                    hour,
                    bdew: bdew(hour),
                    ed_netze: ed_netze(hour),
                })
                .collect(),
        }
    }

    fn source_b(red_electrica: impl Fn(u32) -> f64) -> AlignedHourlyTable {
        AlignedHourlyTable {
            rows: (1..=24)
                .map(|hour| AlignedHourlyRow {
                    hour,
                    red_electrica: red_electrica(hour),
                })
                .collect(),
        }
    }

    #[test]
    fn test_columns_normalized_independently() {
        let a = source_a(|h| if h == 9 { 10.0 } else { 2.0 }, |h| h as f64 * 3.0);
        let b = source_b(|h| if h == 20 { 5.0 } else { 1.0 });

        let merged = ProfileMerger::merge_normalized(&a, &b).unwrap();

        assert_eq!(merged.rows.len(), 24);
        assert_eq!(merged.rows[8].bdew, 1.0);
        assert_eq!(merged.rows[0].bdew, 0.2);
        assert_eq!(merged.rows[19].red_electrica, 1.0);
        assert_eq!(merged.rows[0].red_electrica, 0.2);
        assert_eq!(merged.rows[23].ed_netze, 1.0);
    }

    #[test]
    fn test_max_is_one_and_values_in_unit_range() {
        let a = source_a(|h| (h as f64).sin().abs() + 0.1, |h| 1000.0 + h as f64 * 17.3);
        let b = source_b(|h| 25_000.0 + (h as f64 * 0.7).cos() * 3_000.0);

        let merged = ProfileMerger::merge_normalized(&a, &b).unwrap();

        for column in [merged.bdew(), merged.ed_netze(), merged.red_electrica()] {
            let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(max, 1.0);
            assert!(column.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_rounds_to_three_decimals() {
        let a = source_a(|h| if h == 1 { 3.0 } else { 1.0 }, |_| 1.0);
        let b = source_b(|_| 1.0);

        let merged = ProfileMerger::merge_normalized(&a, &b).unwrap();
        assert_eq!(merged.rows[1].bdew, 0.333);
        assert_eq!(merged.rows[1].ed_netze, 1.0);
    }

    #[test]
    fn test_inputs_left_untouched() {
        let a = source_a(|h| h as f64, |h| h as f64);
        let b = source_b(|h| h as f64);
        let a_before = a.clone();
        let b_before = b.clone();

        ProfileMerger::merge_normalized(&a, &b).unwrap();
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_hour_mismatch_is_rejected() {
        let a = source_a(|_| 1.0, |_| 1.0);
        let mut b = source_b(|_| 1.0);
        b.rows[23].hour = 25;

        assert!(matches!(
            ProfileMerger::merge_normalized(&a, &b),
            Err(ProfileError::JoinMismatch { .. })
        ));
    }

    #[test]
    fn test_non_positive_maximum_is_not_rejected() {
        let a = source_a(|_| 0.0, |h| if h == 5 { -0.5 } else { -1.0 });
        let b = source_b(|_| 2.0);

        let merged = ProfileMerger::merge_normalized(&a, &b).unwrap();

        assert!(merged.bdew().iter().all(|v| v.is_nan()));
        assert_eq!(merged.rows[4].ed_netze, 1.0);
        assert_eq!(merged.rows[0].ed_netze, 2.0);
        assert!(merged.red_electrica().iter().all(|v| *v == 1.0));
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round_to(0.0625, 3), 0.062);
        assert_eq!(round_to(0.1875, 3), 0.188);
        assert_eq!(round_to(0.9996, 3), 1.0);
    }
}
