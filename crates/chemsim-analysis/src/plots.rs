//! Exploratory plots for the cleaned descriptor table.
//!
//! Continuous descriptors get a two-panel image (box plot, filled KDE)
//! written as `<column>_box_kde.png`; discrete descriptors get a count
//! chart written as `<column>_bar.png`.

use std::error::Error;
use std::path::{Path, PathBuf};

use chemsim_common::{ChemsimError, OutputConfig, Result};
use chemsim_molecules::{Descriptor, DescriptorKind};
use plotters::prelude::*;
use tracing::{debug, info, warn};

use crate::stats;
use crate::table::CleanTable;

type DrawResult = std::result::Result<(), Box<dyn Error>>;

const KDE_SAMPLES: usize = 256;

pub fn box_kde_filename(column: &str) -> String {
    format!("{column}_box_kde.png")
}

pub fn bar_filename(column: &str) -> String {
    format!("{column}_bar.png")
}

/// Split descriptors into (continuous, discrete), keeping their order.
pub fn partition(descriptors: &[Descriptor]) -> (Vec<Descriptor>, Vec<Descriptor>) {
    descriptors
        .iter()
        .copied()
        .partition(|d| d.kind() == DescriptorKind::Continuous)
}

pub struct Visualizer {
    out_dir: PathBuf,
    size: (u32, u32),
}

impl Visualizer {
    /// `size` is the box/KDE image size; count charts keep its height at a
    /// 3:2 aspect.
    pub fn new(out_dir: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self { out_dir: out_dir.into(), size }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(output.plots_dir.clone(), output.plot_size)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn bar_size(&self) -> (u32, u32) {
        let height = self.size.1;
        (height * 3 / 2, height)
    }

    /// Write one image per descriptor column present in `table` and return
    /// the written paths.
    pub fn render(&self, table: &CleanTable, descriptors: &[Descriptor]) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.out_dir)?;
        let (continuous, discrete) = partition(descriptors);
        let mut written = Vec::new();

        for descriptor in continuous {
            let name = descriptor.name();
            let Some(values) = self.values(table, &name) else { continue };
            let path = self.out_dir.join(box_kde_filename(&name));
            draw_box_kde(&path, &name, &values, self.size)
                .map_err(|e| ChemsimError::Plot(format!("{}: {e}", path.display())))?;
            debug!(path = %path.display(), "Plot saved");
            written.push(path);
        }

        for descriptor in discrete {
            let name = descriptor.name();
            let Some(values) = self.values(table, &name) else { continue };
            let path = self.out_dir.join(bar_filename(&name));
            draw_counts(&path, &name, &values, self.bar_size())
                .map_err(|e| ChemsimError::Plot(format!("{}: {e}", path.display())))?;
            debug!(path = %path.display(), "Plot saved");
            written.push(path);
        }

        info!(plots = written.len(), dir = %self.out_dir.display(), "Plots written");
        Ok(written)
    }

    fn values(&self, table: &CleanTable, name: &str) -> Option<Vec<f64>> {
        match table.column(name) {
            Some(values) if !values.is_empty() => Some(values),
            Some(_) => {
                warn!(column = name, "No rows to plot");
                None
            }
            None => {
                warn!(column = name, "Column missing from cleaned table");
                None
            }
        }
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Value range padded so constant data still gets a visible axis.
fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < 1e-9 {
        (lo - 1.0, hi + 1.0)
    } else {
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    }
}

fn draw_box_kde(path: &Path, name: &str, values: &[f64], size: (u32, u32)) -> DrawResult {
    let boxed = stats::box_stats(values).ok_or("no values")?;
    let kde = stats::gaussian_kde(values, KDE_SAMPLES).ok_or("no values")?;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    // Box plot
    let data_min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (y_lo, y_hi) = padded_range(data_min, data_max);

    let mut chart = ChartBuilder::on(&panels[0])
        .caption(format!("Boxplot of {name}"), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..1.0f64, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_desc(name)
        .draw()?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.3, boxed.q1), (0.7, boxed.q3)],
        BLUE.mix(0.3).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.3, boxed.q1), (0.7, boxed.q3)],
        BLACK.stroke_width(1),
    )))?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.3, boxed.median), (0.7, boxed.median)],
        BLACK.stroke_width(2),
    )))?;
    for (end, whisker) in [(boxed.q1, boxed.lower_whisker), (boxed.q3, boxed.upper_whisker)] {
        chart.draw_series(std::iter::once(PathElement::new(vec![(0.5, end), (0.5, whisker)], &BLACK)))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.4, whisker), (0.6, whisker)],
            &BLACK,
        )))?;
    }
    chart.draw_series(
        boxed
            .outliers
            .iter()
            .map(|v| Circle::new((0.5, *v), 3, BLACK.mix(0.6))),
    )?;

    // KDE
    let x_lo = kde.points.first().map_or(0.0, |p| p.0);
    let x_hi = kde.points.last().map_or(1.0, |p| p.0);
    let d_max = kde.points.iter().map(|p| p.1).fold(0.0f64, f64::max).max(1e-12) * 1.1;

    let mut chart = ChartBuilder::on(&panels[1])
        .caption(format!("Distribution of {name}"), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0.0f64..d_max)?;

    chart.configure_mesh().x_desc(name).y_desc("Density").draw()?;

    let mut outline = Vec::with_capacity(kde.points.len() + 2);
    outline.push((x_lo, 0.0));
    outline.extend(kde.points.iter().copied());
    outline.push((x_hi, 0.0));
    chart.draw_series(std::iter::once(Polygon::new(outline, BLUE.mix(0.2).filled())))?;
    chart.draw_series(LineSeries::new(kde.points.iter().copied(), &BLUE))?;

    root.present()?;
    Ok(())
}

fn draw_counts(path: &Path, name: &str, values: &[f64], size: (u32, u32)) -> DrawResult {
    let counts = stats::value_counts(values);
    let (Some(first), Some(last)) = (counts.first(), counts.last()) else {
        return Err("no values".into());
    };
    let x_lo = first.0 - 1.0;
    let x_hi = last.0 + 1.0;
    let y_max = counts.iter().map(|c| c.1).max().unwrap_or(1) as f64 * 1.1;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Count of {name}"), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(name)
        .y_desc("count")
        .x_labels(counts.len() + 2)
        .x_label_formatter(&|x: &f64| format!("{x:.0}"))
        .draw()?;

    chart.draw_series(counts.iter().map(|(value, count)| {
        Rectangle::new([(value - 0.4, 0.0), (value + 0.4, *count as f64)], BLUE.mix(0.6).filled())
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DescriptorTable;
    use chemsim_common::DescriptorRecord;
    use pretty_assertions::assert_eq;

    fn table(rows: &[(f64, f64)]) -> CleanTable {
        let records: Vec<DescriptorRecord> = rows
            .iter()
            .enumerate()
            .map(|(i, (mw, rings))| DescriptorRecord {
                cid: i as u64 + 1,
                smiles: "C".to_string(),
                iupac_name: None,
                values: vec![("MW".to_string(), Some(*mw)), ("nRing".to_string(), Some(*rings))],
            })
            .collect();
        DescriptorTable::from_records(&records).clean(&["MW", "nRing"]).unwrap()
    }

    #[test]
    fn test_filenames() {
        assert_eq!(box_kde_filename("TopoPSA(NO)"), "TopoPSA(NO)_box_kde.png");
        assert_eq!(bar_filename("nRing"), "nRing_bar.png");
    }

    #[test]
    fn test_partition_default_descriptors() {
        let (continuous, discrete) = partition(&chemsim_molecules::DEFAULT_DESCRIPTORS);
        let names = |ds: &[Descriptor]| ds.iter().map(|d| d.name()).collect::<Vec<_>>();
        assert_eq!(names(&continuous), vec!["SlogP_VSA2", "SlogP_VSA8", "MW", "SLogP", "TopoPSA(NO)"]);
        assert_eq!(names(&discrete), vec!["nHBDon", "nHBAcc", "nRing"]);
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(2.0, 2.0), (1.0, 3.0));
        let (lo, hi) = padded_range(0.0, 10.0);
        assert!(lo < 0.0 && hi > 10.0);
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plots");
        let visualizer = Visualizer::new(&out, (1500, 600));
        let written = visualizer
            .render(&table(&[]), &[Descriptor::ExactMass, Descriptor::RingCount])
            .unwrap();
        assert!(written.is_empty());
        assert!(out.is_dir());
    }

    #[test]
    #[ignore] // Requires system fonts
    fn test_render_writes_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let visualizer = Visualizer::new(dir.path(), (1500, 600));
        let data = table(&[(180.04, 1.0), (138.03, 1.0), (152.05, 1.0), (151.06, 1.0), (78.05, 1.0), (128.06, 2.0)]);
        let written = visualizer
            .render(&data, &[Descriptor::ExactMass, Descriptor::RingCount])
            .unwrap();
        assert_eq!(
            written,
            vec![dir.path().join("MW_box_kde.png"), dir.path().join("nRing_bar.png")]
        );
        assert!(written.iter().all(|p| p.metadata().map(|m| m.len() > 0).unwrap_or(false)));
    }
}
