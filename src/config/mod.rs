pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::Metric;
#[cfg(feature = "cli")]
use crate::output::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::DashboardConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// 命令列參數；有指定的值會覆蓋設定檔
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "brand-presence")]
#[command(about = "Brand presence report over eyewear web-citation data", version)]
pub struct CliConfig {
    /// Path to the citation CSV
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of top domains to display (5-20)
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Metric used to rank the top domains
    #[arg(long, value_enum)]
    pub top_metric: Option<Metric>,

    /// Media channels to keep in the explorer table (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Metric the explorer table is sorted by, descending
    #[arg(short, long, value_enum)]
    pub sort_by: Option<Metric>,

    /// Brand substrings matched against the domain, ignoring case (repeatable)
    #[arg(short, long = "brand")]
    pub brands: Vec<String>,

    /// Domains whose citation count is shown as a headline metric (repeatable)
    #[arg(long = "spotlight")]
    pub spotlight_domains: Vec<String>,

    /// Report output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file if one was given, then applies command-line overrides.
    pub fn resolve(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!(path = %path.display(), "📁 Loading configuration file");
                DashboardConfig::from_file(path)?
            }
            None => DashboardConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut DashboardConfig) {
        if let Some(data) = &self.data {
            config.data.path = data.clone();
        }
        if let Some(top) = self.top {
            config.views.top_n = top;
        }
        if let Some(metric) = self.top_metric {
            config.views.top_metric = metric;
        }
        if let Some(metric) = self.sort_by {
            config.views.sort_by = metric;
        }
        if !self.categories.is_empty() {
            config.views.categories = Some(self.categories.clone());
        }
        if !self.brands.is_empty() {
            config.views.brands = self.brands.clone();
        }
        if !self.spotlight_domains.is_empty() {
            config.views.spotlight_domains = self.spotlight_domains.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}
