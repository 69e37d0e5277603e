use anyhow::{Context, Result};
use plotters::prelude::*;
use profile_calculator::{DemandProfile, MergedRow};
use std::path::PathBuf;

const BDEW_COLOR: RGBColor = RGBColor(0x01, 0x8a, 0x16);
const ED_NETZE_COLOR: RGBColor = RGBColor(0xaa, 0x02, 0xf2);
const RED_ELECTRICA_COLOR: RGBColor = RGBColor(0xf2, 0x02, 0x02);
const TITLE_COLOR: RGBColor = RGBColor(0x09, 0x03, 0x80);
const GRID_COLOR: RGBColor = RGBColor(0x96, 0x8f, 0x8f);

pub struct CurveRenderer {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl CurveRenderer {
    pub fn new(output_dir: PathBuf, width: u32, height: u32) -> Result<Self> {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        Ok(Self {
            output_dir,
            width,
            height,
        })
    }

    pub fn output_path(&self, profile: &DemandProfile) -> PathBuf {
        self.output_dir.join(format!("{}.png", profile.artifact_name))
    }

    /// Draw the three normalized curves of one profile to `<artifact>.png`.
    pub fn render(&self, profile: &DemandProfile) -> Result<PathBuf> {
        let output_path = self.output_path(profile);

        let root = BitMapBackend::new(&output_path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&profile.title, ("sans-serif", 30).into_font().color(&TITLE_COLOR))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0.5f64..24.5f64, 0f64..1.05f64)?;

        chart
            .configure_mesh()
            .x_labels(24)
            .x_label_formatter(&|x: &f64| format!("{:.0}", x))
            .y_labels(11)
            .light_line_style(&WHITE)
            .bold_line_style(&GRID_COLOR.mix(0.4))
            .x_desc("Hour of the day")
            .y_desc("Demand (normalized)")
            .draw()?;

        let bdew = series_points(profile, |r| r.bdew);
        let ed_netze = series_points(profile, |r| r.ed_netze);
        let red_electrica = series_points(profile, |r| r.red_electrica);

        chart
            .draw_series(LineSeries::new(bdew.iter().copied(), BDEW_COLOR.stroke_width(4)))?
            .label("BDEW (Germany)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BDEW_COLOR.stroke_width(4)));
        chart.draw_series(bdew.iter().map(|p| Circle::new(*p, 5, BDEW_COLOR.filled())))?;

        chart
            .draw_series(LineSeries::new(ed_netze.iter().copied(), ED_NETZE_COLOR.stroke_width(4)))?
            .label("ED Netze GmbH (Germany)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ED_NETZE_COLOR.stroke_width(4)));
        chart.draw_series(
            ed_netze
                .iter()
                .map(|p| TriangleMarker::new(*p, 6, ED_NETZE_COLOR.filled())),
        )?;

        chart
            .draw_series(LineSeries::new(
                red_electrica.iter().copied(),
                RED_ELECTRICA_COLOR.stroke_width(4),
            ))?
            .label("Red Electrica (Spain)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED_ELECTRICA_COLOR.stroke_width(4)));
        chart.draw_series(
            red_electrica
                .iter()
                .map(|p| Cross::new(*p, 5, RED_ELECTRICA_COLOR.stroke_width(2))),
        )?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&RGBColor(0x0c, 0x08, 0x5c))
            .draw()?;

        root.present()?;

        Ok(self.output_path(profile))
    }
}

/// (hour, ratio) pairs of one curve, in table order.
pub fn series_points(profile: &DemandProfile, value: impl Fn(&MergedRow) -> f64) -> Vec<(f64, f64)> {
    profile
        .table
        .rows
        .iter()
        .map(|r| (r.hour as f64, value(r)))
        .collect()
}
