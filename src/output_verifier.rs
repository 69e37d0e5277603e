use anyhow::{Context, Result};
use glob::glob;
use profile_calculator::MergedRow;
use std::path::{Path, PathBuf};

const MAX_TOLERANCE: f64 = 1e-9;

/// Problems found in one exported table.
pub fn check_table(rows: &[MergedRow]) -> Vec<String> {
    let mut issues = Vec::new();

    if rows.len() != 24 {
        issues.push(format!("expected 24 rows, found {}", rows.len()));
    }

    let hours: Vec<u32> = rows.iter().map(|r| r.hour).collect();
    if hours != (1..=24).collect::<Vec<u32>>() {
        issues.push(format!("hour labels are not 1..24 in order: {:?}", hours));
    }

    let columns: [(&str, fn(&MergedRow) -> f64); 3] = [
        ("bdew", |r| r.bdew),
        ("ed_netze", |r| r.ed_netze),
        ("red_electrica", |r| r.red_electrica),
    ];
    for (name, value) in columns {
        let max = rows.iter().map(value).fold(f64::NEG_INFINITY, f64::max);
        if (max - 1.0).abs() > MAX_TOLERANCE {
            issues.push(format!("{} peaks at {} instead of 1.000", name, max));
        }
        if rows.iter().map(value).any(|v| v < 0.0) {
            issues.push(format!("{} has negative ratios", name));
        }
    }

    issues
}

pub fn read_table(path: &Path) -> Result<Vec<MergedRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: MergedRow = record.with_context(|| format!("Bad row in {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Check every exported CSV table and return the number of issues found.
pub fn verify_tables(tables_dir: &Path) -> Result<usize> {
    println!("\n🔍 Demand Table Verification");
    println!("{}", "=".repeat(60));

    let pattern = tables_dir.join("*.csv");
    let files: Vec<PathBuf> = glob(&pattern.to_string_lossy())?
        .filter_map(Result::ok)
        .collect();

    if files.is_empty() {
        println!("⚠️  No tables found in {}", tables_dir.display());
        return Ok(1);
    }

    println!("📁 Checking {} tables in {}", files.len(), tables_dir.display());

    let mut total_issues = 0;
    for file in files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("\n  Verifying: {}", name);

        let issues = match read_table(&file) {
            Ok(rows) => check_table(&rows),
            Err(e) => vec![e.to_string()],
        };

        if issues.is_empty() {
            println!("    ✅ 24 hours, every curve peaks at 1.000");
        } else {
            for issue in &issues {
                println!("    ❌ {}", issue);
            }
            total_issues += issues.len();
        }
    }

    println!("\n{}", "=".repeat(60));
    if total_issues == 0 {
        println!("✅ Verification passed! No issues found.");
    } else {
        println!("⚠️  Verification found {} issues", total_issues);
    }

    Ok(total_issues)
}
