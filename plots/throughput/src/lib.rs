use std::path::Path;

use common::{
    chart::LineChart,
    config::Settings,
    dataset::{Dataset, THREAD_COUNT, THROUGHPUT},
    plot::{Plot, PlotOutcome, render_or_skip},
    util::format_fraction,
};
use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_WRITE_PERCENTS: &[f64] = &[0.0, 0.02, 0.05, 0.1, 0.2, 0.3, 0.4];
pub const DEFAULT_THREAD_COUNTS: &[u32] = &[2, 4, 8, 16, 20, 30, 40];

/// Thread count against throughput, one chart per write percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadThroughput {
    #[serde(default = "default_write_percents")]
    pub write_percents: Vec<f64>,
}

impl Default for ThreadThroughput {
    fn default() -> Self {
        Self {
            write_percents: default_write_percents(),
        }
    }
}

fn default_write_percents() -> Vec<f64> {
    DEFAULT_WRITE_PERCENTS.to_vec()
}

/// Write fraction against throughput, one chart per thread count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteThroughput {
    #[serde(default = "default_thread_counts")]
    pub thread_counts: Vec<u32>,
}

impl Default for WriteThroughput {
    fn default() -> Self {
        Self {
            thread_counts: default_thread_counts(),
        }
    }
}

fn default_thread_counts() -> Vec<u32> {
    DEFAULT_THREAD_COUNTS.to_vec()
}

/// The fourteen charts produced when no config file is given
pub fn default_plots() -> Vec<Box<dyn Plot>> {
    vec![
        Box::new(ThreadThroughput::default()),
        Box::new(WriteThroughput::default()),
    ]
}

#[async_trait::async_trait]
#[typetag::serde]
impl Plot for ThreadThroughput {
    fn name(&self) -> &'static str {
        "ThreadThroughput"
    }

    async fn plot(
        &self,
        dataset: &Dataset,
        plot_path: &Path,
        settings: &Settings,
    ) -> Result<Vec<PlotOutcome>> {
        debug!("Plotting {} write percents", self.write_percents.len());
        self.write_percents
            .iter()
            .map(|&write_percent| {
                let label = format_fraction(write_percent);
                render_or_skip(
                    plot_path.join(format!("thread_throughput_{label}.png")),
                    self.chart(dataset, write_percent, settings),
                    format!("No data for Write Percent = {label}"),
                )
            })
            .collect()
    }
}

impl ThreadThroughput {
    fn chart(&self, dataset: &Dataset, write_percent: f64, settings: &Settings) -> LineChart {
        let points = dataset
            .with_write_percent(write_percent)
            .into_iter()
            .map(|row| (row.thread_count as f64, row.throughput))
            .collect();
        LineChart::new(
            format!(
                "Thread Count vs. Throughput at Write Fraction = {}",
                format_fraction(write_percent)
            ),
            THREAD_COUNT,
            THROUGHPUT,
            points,
        )
        .with_size(settings.width, settings.height)
    }
}

#[async_trait::async_trait]
#[typetag::serde]
impl Plot for WriteThroughput {
    fn name(&self) -> &'static str {
        "WriteThroughput"
    }

    async fn plot(
        &self,
        dataset: &Dataset,
        plot_path: &Path,
        settings: &Settings,
    ) -> Result<Vec<PlotOutcome>> {
        debug!("Plotting {} thread counts", self.thread_counts.len());
        self.thread_counts
            .iter()
            .map(|&thread_count| {
                render_or_skip(
                    plot_path.join(format!("write_throughput_{thread_count}.png")),
                    self.chart(dataset, thread_count, settings),
                    format!("No data for Thread Count = {thread_count}"),
                )
            })
            .collect()
    }
}

impl WriteThroughput {
    fn chart(&self, dataset: &Dataset, thread_count: u32, settings: &Settings) -> LineChart {
        let points = dataset
            .with_thread_count(thread_count)
            .into_iter()
            .map(|row| (row.write_percent, row.throughput))
            .collect();
        LineChart::new(
            format!("Write Fraction vs. Throughput at Thread Count = {thread_count}"),
            "Write Fraction",
            THROUGHPUT,
            points,
        )
        .with_size(settings.width, settings.height)
    }
}
