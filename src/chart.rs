//! Star history chart.

use crate::{axis::AxisFormat, series::StarSeries, RepositoryId};
use anyhow::{ensure, Context, Error};
use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use std::{
    env,
    ops::Range,
    path::{Path, PathBuf},
    process::Command,
};
use tracing::{debug, info};

const SIZE: (u32, u32) = (1024, 640);

/// Everything needed to draw one chart.
#[derive(Debug)]
pub struct Chart<'a> {
    pub repo: &'a RepositoryId,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: &'a StarSeries,
    pub format: AxisFormat,
}

impl<'a> Chart<'a> {
    pub fn new(repo: &'a RepositoryId, series: &'a StarSeries, format: AxisFormat) -> Self {
        Self {
            repo,
            title: format!("Star history for {repo}"),
            x_label: "Time",
            y_label: "Stars",
            series,
            format,
        }
    }

    /// Time span of the series, widened by a day either side when it is a
    /// single instant.
    fn x_range(&self) -> Result<Range<DateTime<Utc>>, Error> {
        let (start, end) = self.series.span().context("Nothing to plot.")?;
        if start < end {
            Ok(start..end)
        } else {
            Ok((start - Duration::days(1))..(end + Duration::days(1)))
        }
    }

    fn y_range(&self) -> Range<u32> {
        0..self.series.total() + 1
    }
}

pub trait Renderer {
    fn render(&self, chart: &Chart<'_>) -> Result<(), Error>;
}

/// Draws the chart as SVG and hands it to the platform viewer.
#[derive(Debug)]
pub struct SvgRenderer {
    output: Option<PathBuf>,
    open_viewer: bool,
}

impl SvgRenderer {
    pub fn new(output: Option<PathBuf>, open_viewer: bool) -> Self {
        Self {
            output,
            open_viewer,
        }
    }

    /// Chosen output, or a per-repository file in the temporary directory.
    pub fn output_path(&self, repo: &RepositoryId) -> PathBuf {
        match &self.output {
            Some(x) => x.clone(),
            None => env::temp_dir().join(format!(
                "{}-{}-{}.svg",
                env!("CARGO_PKG_NAME"),
                repo.owner,
                repo.name
            )),
        }
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, chart: &Chart<'_>) -> Result<(), Error> {
        let path = self.output_path(chart.repo);
        draw(chart, &path).with_context(|| format!("Failed to draw `{}`.", path.display()))?;
        info!(path = %path.display(), "rendered chart");
        if self.open_viewer {
            open_in_viewer(&path)?;
        }
        Ok(())
    }
}

fn draw(chart: &Chart<'_>, path: &Path) -> Result<(), Error> {
    let x_range = chart.x_range()?;
    let y_range = chart.y_range();
    debug!(?x_range, ?y_range, format = %chart.format, "drawing chart");

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    let format = chart.format;
    ctx.configure_mesh()
        .x_desc(chart.x_label)
        .y_desc(chart.y_label)
        .x_labels(8)
        .x_label_formatter(&|x: &DateTime<Utc>| format.format(x))
        .draw()?;

    let points: Vec<(DateTime<Utc>, u32)> = chart
        .series
        .points()
        .iter()
        .map(|x| (x.at, x.count))
        .collect();
    ctx.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    ctx.draw_series(points.iter().map(|x| Circle::new(*x, 3, BLUE.filled())))?;

    root.present()?;
    Ok(())
}

fn open_in_viewer(path: &Path) -> Result<(), Error> {
    let mut command = viewer_command(path);
    debug!(?command, "opening chart");
    let status = command
        .status()
        .with_context(|| format!("Failed to open `{}`.", path.display()))?;
    ensure!(
        status.success(),
        "Viewer exited with {} while opening `{}`.",
        status,
        path.display()
    );
    Ok(())
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        github::StarEvent,
        series::{build_series, parse_timestamp},
    };
    use std::fs;

    fn series(starred_at: &[&str], now: &str) -> StarSeries {
        let events: Vec<_> = starred_at
            .iter()
            .map(|x| StarEvent {
                starred_at: x.to_string(),
                user: None,
            })
            .collect();
        build_series(&events, parse_timestamp(now).unwrap()).unwrap()
    }

    #[test]
    fn test_chart_labels() {
        let repo = RepositoryId::new("kafji", "shub");
        let series = series(&[], "2024-07-01T00:00:00Z");
        let chart = Chart::new(&repo, &series, AxisFormat::Short);
        assert_eq!(chart.title, "Star history for kafji/shub");
        assert_eq!(chart.x_label, "Time");
        assert_eq!(chart.y_label, "Stars");
    }

    #[test]
    fn test_x_range_pads_single_instant() {
        let repo = RepositoryId::new("kafji", "shub");
        let series = series(&[], "2024-07-01T00:00:00Z");
        let chart = Chart::new(&repo, &series, AxisFormat::Short);
        let range = chart.x_range().unwrap();
        assert_eq!(range.start, parse_timestamp("2024-06-30T00:00:00Z").unwrap());
        assert_eq!(range.end, parse_timestamp("2024-07-02T00:00:00Z").unwrap());
        assert_eq!(chart.y_range(), 0..1);
    }

    #[test]
    fn test_x_range_spans_series() {
        let repo = RepositoryId::new("kafji", "shub");
        let series = series(
            &["2024-06-01T00:00:00Z", "2024-06-10T00:00:00Z"],
            "2024-07-01T00:00:00Z",
        );
        let chart = Chart::new(&repo, &series, AxisFormat::Long);
        let range = chart.x_range().unwrap();
        assert_eq!(range.start, parse_timestamp("2024-06-01T00:00:00Z").unwrap());
        assert_eq!(range.end, parse_timestamp("2024-07-01T00:00:00Z").unwrap());
        assert_eq!(chart.y_range(), 0..3);
    }

    #[test]
    fn test_output_path() {
        let repo = RepositoryId::new("kafji", "shub");
        let renderer = SvgRenderer::new(None, false);
        assert_eq!(
            renderer.output_path(&repo),
            env::temp_dir().join("star-history-kafji-shub.svg")
        );
        let renderer = SvgRenderer::new(Some("chart.svg".into()), false);
        assert_eq!(renderer.output_path(&repo), PathBuf::from("chart.svg"));
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let repo = RepositoryId::new("kafji", "shub");
        let series = series(
            &[
                "2024-06-01T00:00:00Z",
                "2024-06-02T00:00:00Z",
                "2024-06-20T00:00:00Z",
            ],
            "2024-06-30T00:00:00Z",
        );
        let chart = Chart::new(&repo, &series, AxisFormat::Short);

        SvgRenderer::new(Some(path.clone()), false)
            .render(&chart)
            .unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Star history for kafji/shub"));
        assert!(svg.contains("Time"));
        assert!(svg.contains("Stars"));
    }
}
