use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    chart::{DEFAULT_HEIGHT, DEFAULT_WIDTH},
    plot::Plot,
};

pub const DEFAULT_INPUT: &str = "logfile.csv";
pub const DEFAULT_PLOT_DIR: &str = "plots";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_plot_dir")]
    pub plot_dir: PathBuf,
    #[serde(default)]
    pub settings: Settings,
    pub plots: Vec<Box<dyn Plot>>,
}

impl Config {
    /// Config with the default input and plot paths
    pub fn new(plots: Vec<Box<dyn Plot>>) -> Self {
        Self {
            input: default_input(),
            plot_dir: default_plot_dir(),
            settings: Settings::default(),
            plots,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_plot_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PLOT_DIR)
}
