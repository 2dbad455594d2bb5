use core::fmt::Debug;
use std::path::{Path, PathBuf};

use downcast_rs::{Downcast, impl_downcast};
use dyn_clone::{DynClone, clone_trait_object};
use eyre::{Context, Result};
use tokio::fs::create_dir_all;
use tracing::{debug, info};

use crate::{
    chart::{LineChart, render_line_chart},
    config::Settings,
    dataset::Dataset,
};

/// What happened to a single fixed value
#[derive(Debug, Clone, PartialEq)]
pub enum PlotOutcome {
    /// Chart written to this path
    Rendered(PathBuf),
    /// No rows matched, nothing written. Holds the notice printed for it
    Skipped(String),
}

#[typetag::serde(tag = "type")]
#[async_trait::async_trait]
pub trait Plot: Debug + DynClone + Downcast + Send + Sync {
    /// Name of the plot, for identification in logs
    fn name(&self) -> &'static str;
    /// Renders one chart per configured fixed value, in order
    ///
    /// Arguments:
    /// * `dataset` - The loaded benchmark log
    /// * `plot_path` - The directory charts are written to, ie. plots/
    /// * `settings` - The settings from the config file
    async fn plot(
        &self,
        dataset: &Dataset,
        plot_path: &Path,
        settings: &Settings,
    ) -> Result<Vec<PlotOutcome>>;
}
clone_trait_object!(Plot);
impl_downcast!(Plot);

pub async fn ensure_plot_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir)
        .await
        .with_context(|| format!("Create plot dir {}", dir.display()))
}

/// Renders `chart` to `filepath`, or prints `empty_notice` and writes nothing when the chart has
/// no points
pub fn render_or_skip(
    filepath: PathBuf,
    chart: LineChart,
    empty_notice: String,
) -> Result<PlotOutcome> {
    if chart.points.is_empty() {
        println!("{empty_notice}");
        info!("Skipped {}", filepath.display());
        return Ok(PlotOutcome::Skipped(empty_notice));
    }

    render_line_chart(&filepath, &chart)
        .with_context(|| format!("Render {}", filepath.display()))?;
    debug!("Wrote {}", filepath.display());
    Ok(PlotOutcome::Rendered(filepath))
}

/// Runs every plot one after another
pub async fn plot(
    plots: &[Box<dyn Plot>],
    dataset: &Dataset,
    plot_path: &Path,
    settings: &Settings,
) -> Result<Vec<PlotOutcome>> {
    if plots.is_empty() {
        debug!("No plots");
        return Ok(Vec::new());
    }

    let mut outcomes = Vec::new();
    for plot in plots {
        debug!("Running plot {}", plot.name());
        outcomes.extend(
            plot.plot(dataset, plot_path, settings)
                .await
                .with_context(|| format!("Plot {}", plot.name()))?,
        );
    }
    Ok(outcomes)
}
