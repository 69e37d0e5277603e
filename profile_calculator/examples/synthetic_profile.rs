use chrono::{Duration, NaiveDate};
use profile_calculator::models::{QuarterHourRow, SourceBRow};
use profile_calculator::{compute_profile, DayType, ProfileCatalog, ProfileKey, Season};

fn main() {
    let catalog = ProfileCatalog::default();
    let entry = catalog
        .entry(ProfileKey::new(Season::Winter, DayType::Workday))
        .unwrap();

    // German utilities: morning and evening peaks at 15-minute resolution
    let source_a: Vec<QuarterHourRow> = (0..96)
        .map(|i| {
            let hour = i / 4;
            let bdew = match hour {
                7..=9 => 1_300.0,
                17..=20 => 1_450.0,
                0..=5 => 700.0,
                _ => 1_000.0,
            };
            QuarterHourRow {
                bdew,
                ed_netze: bdew * 0.08,
            }
        })
        .collect();

    // Red Electrica: two weeks of hourly national demand, peaking late
    let start = NaiveDate::from_ymd_opt(2019, 1, 7)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let source_b: Vec<SourceBRow> = (0..14 * 24)
        .map(|i| {
            let hour = i % 24;
            let value = match hour {
                9..=11 => 34_000.0,
                19..=21 => 38_000.0,
                2..=6 => 24_000.0,
                _ => 30_000.0,
            };
            SourceBRow {
                datetime: (start + Duration::hours(i))
                    .format("%Y-%m-%dT%H:%M:%S%.3f+01:00")
                    .to_string(),
                value,
            }
        })
        .collect();

    let profile = compute_profile(entry, &source_a, &source_b).unwrap();

    println!("{}", profile.title);
    println!("{}", "=".repeat(profile.title.len()));
    println!("Hour    BDEW  ED Netze  Red Electrica");
    for row in &profile.table.rows {
        println!(
            "{:>4} {:>7.3} {:>9.3} {:>14.3}",
            row.hour, row.bdew, row.ed_netze, row.red_electrica
        );
    }

    let (bdew_peak, _, red_electrica_peak) = profile.peak_hours();
    println!();
    println!("BDEW peaks at hour {}, Red Electrica at hour {}", bdew_peak, red_electrica_peak);
}
