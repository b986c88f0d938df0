pub mod config;
pub mod core;
pub mod domain;
pub mod output;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, LogFormat};

pub use crate::config::{cli::LocalStorage, toml_config::DashboardConfig};
pub use crate::core::{
    dashboard::{build_report, DashboardEngine, DashboardReport},
    loader::DatasetLoader,
    views::{brand_filter, filter_sort, group_totals, top_n, BrandMatcher, CategoryFilter},
};
pub use crate::domain::model::{Dataset, GroupKey, Lookup, Metric, Record, Total};
pub use crate::output::{Formatter, OutputFormat};
pub use crate::utils::error::{DashboardError, DataLoadError, Result};
