use crate::error::ProfileResult;
use crate::models::{ClassifiedRow, DayType, SourceBRow};
use crate::timestamp::normalize_column;
use chrono::Datelike;
use log::debug;

pub struct DayTypeClassifier;

impl DayTypeClassifier {
    /// Parse every timestamp of a Source B bag and keep the rows of one day-type.
    ///
    /// All rows are parsed before filtering, so a bad timestamp anywhere in
    /// the table fails it regardless of the requested day-type.
    pub fn classify(rows: &[SourceBRow], day_type: DayType) -> ProfileResult<Vec<ClassifiedRow>> {
        let timestamps = normalize_column(rows.iter().map(|r| r.datetime.as_str()))?;

        let parsed: Vec<ClassifiedRow> = timestamps
            .into_iter()
            .zip(rows.iter())
            .map(|(timestamp, row)| ClassifiedRow {
                timestamp,
                value: row.value,
            })
            .collect();

        let retained = Self::filter(&parsed, day_type);
        debug!(
            "Classified {} of {} rows as {}",
            retained.len(),
            rows.len(),
            day_type
        );

        Ok(retained)
    }

    /// Keep rows whose calendar weekday belongs to `day_type`.
    pub fn filter(rows: &[ClassifiedRow], day_type: DayType) -> Vec<ClassifiedRow> {
        rows.iter()
            .filter(|r| day_type.matches(r.timestamp.weekday()))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfileError;
    use chrono::{Duration, NaiveDate, Weekday};

    // 2019-07-01 is a Monday
    fn one_week_hourly() -> Vec<SourceBRow> {
        let start = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        (0..7 * 24)
            .map(|i| SourceBRow {
                datetime: (start + Duration::hours(i)).format("%Y-%m-%dT%H:%M:%S%.3f+02:00").to_string(),
                value: i as f64,
            })
            .collect()
    }

    #[test]
    fn test_workday_keeps_monday_to_friday() {
        let rows = one_week_hourly();
        let workdays = DayTypeClassifier::classify(&rows, DayType::Workday).unwrap();

        assert_eq!(workdays.len(), 5 * 24);
        assert!(workdays
            .iter()
            .all(|r| !matches!(r.timestamp.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn test_weekend_days_are_exact() {
        let rows = one_week_hourly();

        let saturdays = DayTypeClassifier::classify(&rows, DayType::Saturday).unwrap();
        assert_eq!(saturdays.len(), 24);
        assert!(saturdays.iter().all(|r| r.timestamp.weekday() == Weekday::Sat));

        let sundays = DayTypeClassifier::classify(&rows, DayType::Sunday).unwrap();
        assert_eq!(sundays.len(), 24);
        assert!(sundays.iter().all(|r| r.timestamp.weekday() == Weekday::Sun));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let rows = one_week_hourly();
        for day_type in DayType::ALL {
            let once = DayTypeClassifier::classify(&rows, day_type).unwrap();
            let twice = DayTypeClassifier::filter(&once, day_type);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_bad_timestamp_fails_whole_table() {
        let mut rows = one_week_hourly();
        rows[150].datetime = "yesterday-ish".to_string();

        // Row 150 is a Sunday, but the Saturday request still fails
        let err = DayTypeClassifier::classify(&rows, DayType::Saturday).unwrap_err();
        assert!(matches!(err, ProfileError::UnparseableTimestamp { row: 150, .. }));
    }
}
