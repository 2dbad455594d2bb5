use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use common::{
    config::Config,
    dataset::{Dataset, THREAD_COUNT, WRITE_PERCENT},
    plot::{PlotOutcome, ensure_plot_dir},
    util::format_fraction,
};
use eyre::{Context, Result};
use itertools::Itertools;
use tokio::fs::read_to_string;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const MODULES: &[&str] = &["common", "throughput"];

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Config file, the built-in plot list is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    log: Vec<String>,
}

#[derive(Subcommand, Clone, Copy, Default)]
enum Commands {
    /// Render every configured chart
    #[default]
    Plot,
    /// List the write percents and thread counts present in the log
    Values,
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();
    let file_appender = tracing_appender::rolling::never(".", "log.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let mut env_filter = EnvFilter::new(format!("throughput_plots={log_level}"));

    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }

    for module in MODULES {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(layer().with_writer(non_blocking))
        .init();

    let config = load_config(args.config.as_deref()).await?;
    match args.command.unwrap_or_default() {
        Commands::Plot => {
            if let Err(err) = plot(&config).await {
                error!("{err:#?}");
                return Err(err);
            }
        }
        Commands::Values => print_values(&config)?,
    };

    Ok(())
}

async fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new(throughput::default_plots()));
    };
    let config = serde_yml::from_str(
        &read_to_string(path)
            .await
            .with_context(|| format!("Reading config file {}", path.display()))?,
    )
    .context("Parsing config file")?;
    Ok(config)
}

async fn plot(config: &Config) -> Result<Vec<PlotOutcome>> {
    let dataset = Dataset::load(&config.input)?;
    ensure_plot_dir(&config.plot_dir).await?;

    let outcomes = common::plot::plot(
        &config.plots,
        &dataset,
        &config.plot_dir,
        &config.settings,
    )
    .await?;
    let rendered = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, PlotOutcome::Rendered(_)))
        .count();
    info!(
        "Rendered {rendered} of {} charts into {}",
        outcomes.len(),
        config.plot_dir.display()
    );
    Ok(outcomes)
}

fn print_values(config: &Config) -> Result<()> {
    let dataset = Dataset::load(&config.input)?;
    for line in value_lines(&dataset) {
        println!("{line}");
    }
    Ok(())
}

fn value_lines(dataset: &Dataset) -> [String; 2] {
    [
        format!(
            "{WRITE_PERCENT}: {}",
            dataset
                .write_percents()
                .into_iter()
                .map(format_fraction)
                .join(", ")
        ),
        format!("{THREAD_COUNT}: {}", dataset.thread_counts().iter().join(", ")),
    ]
}
