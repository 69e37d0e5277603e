use chrono::{NaiveDateTime, Timelike, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source A samples every 15 minutes, so four consecutive rows make one hour.
pub const QUARTER_HOURS_PER_HOUR: usize = 4;
pub const HOURS_PER_DAY: usize = 24;
/// Source B's day boundary sits two hours away from Source A's.
pub const OFFSET_CORRECTION_HOURS: usize = 2;
pub const NORMALIZED_DECIMALS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    TransitionPeriod,
    Winter,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Summer, Season::TransitionPeriod, Season::Winter];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::TransitionPeriod => "transition period",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Workday,
    Saturday,
    Sunday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Workday, DayType::Saturday, DayType::Sunday];

    /// Workday covers Monday to Friday, the weekend days match exactly.
    pub fn matches(&self, weekday: Weekday) -> bool {
        match self {
            DayType::Workday => !matches!(weekday, Weekday::Sat | Weekday::Sun),
            DayType::Saturday => weekday == Weekday::Sat,
            DayType::Sunday => weekday == Weekday::Sun,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayType::Workday => "workday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileKey {
    pub season: Season,
    pub day_type: DayType,
}

impl ProfileKey {
    pub fn new(season: Season, day_type: DayType) -> Self {
        Self { season, day_type }
    }

    /// All nine combinations, season-major.
    pub fn all() -> Vec<ProfileKey> {
        Season::ALL
            .iter()
            .flat_map(|season| DayType::ALL.iter().map(move |day_type| ProfileKey::new(*season, *day_type)))
            .collect()
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season, self.day_type)
    }
}

/// One 15-minute reading from the German utilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarterHourRow {
    pub bdew: f64,
    pub ed_netze: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRow {
    pub hour: u32,
    pub bdew: f64,
    pub ed_netze: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyTable {
    pub rows: Vec<HourlyRow>,
}

/// One hourly reading from Red Electrica, timestamp still unparsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBRow {
    pub datetime: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedRow {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl ClassifiedRow {
    pub fn hour_of_day(&self) -> usize {
        self.timestamp.hour() as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedHourlyRow {
    pub hour: u32,
    pub red_electrica: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedHourlyTable {
    pub rows: Vec<AlignedHourlyRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    pub hour: u32,
    pub bdew: f64,
    pub ed_netze: f64,
    pub red_electrica: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedTable {
    pub rows: Vec<MergedRow>,
}

impl MergedTable {
    pub fn hours(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.hour).collect()
    }

    pub fn bdew(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.bdew).collect()
    }

    pub fn ed_netze(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.ed_netze).collect()
    }

    pub fn red_electrica(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.red_electrica).collect()
    }
}

/// A finished curve set together with what the renderer needs to label it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandProfile {
    pub key: ProfileKey,
    pub title: String,
    pub artifact_name: String,
    pub table: MergedTable,
}

impl DemandProfile {
    /// Hour label of each curve's peak (first occurrence wins).
    pub fn peak_hours(&self) -> (u32, u32, u32) {
        let peak = |values: Vec<f64>| -> u32 {
            let mut best = 0;
            for (idx, value) in values.iter().enumerate() {
                if *value > values[best] {
                    best = idx;
                }
            }
            self.table.rows.get(best).map(|r| r.hour).unwrap_or(0)
        };

        (
            peak(self.table.bdew()),
            peak(self.table.ed_netze()),
            peak(self.table.red_electrica()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_type_weekday_sets() {
        let weekdays = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
        for day in weekdays {
            assert!(DayType::Workday.matches(day));
            assert!(!DayType::Saturday.matches(day));
            assert!(!DayType::Sunday.matches(day));
        }
        assert!(DayType::Saturday.matches(Weekday::Sat));
        assert!(!DayType::Workday.matches(Weekday::Sat));
        assert!(DayType::Sunday.matches(Weekday::Sun));
        assert!(!DayType::Saturday.matches(Weekday::Sun));
    }

    #[test]
    fn test_cli_names() {
        assert_eq!(Season::from_str("transition-period", false), Ok(Season::TransitionPeriod));
        assert_eq!(Season::from_str("Winter", true), Ok(Season::Winter));
        assert_eq!(DayType::from_str("saturday", false), Ok(DayType::Saturday));
        assert!(DayType::from_str("holiday", false).is_err());
    }

    #[test]
    fn test_all_profile_keys() {
        let keys = ProfileKey::all();
        assert_eq!(keys.len(), 9);
        assert_eq!(keys[0], ProfileKey::new(Season::Summer, DayType::Workday));
        assert_eq!(keys[8], ProfileKey::new(Season::Winter, DayType::Sunday));
    }

    #[test]
    fn test_peak_hours() {
        let rows = (1..=24)
            .map(|hour| MergedRow {
                hour,
                bdew: if hour == 12 { 1.0 } else { 0.5 },
                ed_netze: if hour == 19 { 1.0 } else { 0.2 },
                red_electrica: if hour == 21 { 1.0 } else { 0.7 },
            })
            .collect();
        let profile = DemandProfile {
            key: ProfileKey::new(Season::Winter, DayType::Sunday),
            title: "test".to_string(),
            artifact_name: "test".to_string(),
            table: MergedTable { rows },
        };

        assert_eq!(profile.peak_hours(), (12, 19, 21));
    }
}
