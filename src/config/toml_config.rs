use crate::domain::model::Metric;
use crate::domain::ports::ConfigProvider;
use crate::output::OutputFormat;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_PATH: &str = "data/eyewear_domains_augmented.csv";
pub const DEFAULT_TOP_N: usize = 10;
pub const MIN_TOP_N: usize = 5;
pub const MAX_TOP_N: usize = 20;

/// 報表的完整設定；可由 TOML 檔載入，再由命令列覆蓋。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub views: ViewsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    pub top_n: usize,
    pub top_metric: Metric,
    pub sort_by: Metric,
    /// 未設定時保留全部類別
    pub categories: Option<Vec<String>>,
    pub brands: Vec<String>,
    pub spotlight_domains: Vec<String>,
    pub headline_categories: Vec<String>,
    pub headline_audiences: Vec<String>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            top_metric: Metric::Cited,
            sort_by: Metric::Cited,
            categories: None,
            brands: strings(&["meta", "ray-ban"]),
            spotlight_domains: strings(&["meta.com", "ray-ban.com"]),
            headline_categories: strings(&["Earned", "Social"]),
            headline_audiences: strings(&["general", "techie"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl DashboardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay
    /// verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("data.path", &self.data.path)?;
        validation::validate_file_extension("data.path", &self.data.path, &["csv"])?;

        validation::validate_range("views.top_n", self.views.top_n, MIN_TOP_N, MAX_TOP_N)?;

        if let Some(categories) = &self.views.categories {
            validation::validate_non_empty_list("views.categories", categories)?;
        }
        validation::validate_non_empty_list("views.brands", &self.views.brands)?;
        validation::validate_non_empty_list("views.spotlight_domains", &self.views.spotlight_domains)?;
        validation::validate_non_empty_list(
            "views.headline_categories",
            &self.views.headline_categories,
        )?;
        validation::validate_non_empty_list(
            "views.headline_audiences",
            &self.views.headline_audiences,
        )?;

        Ok(())
    }
}

impl ConfigProvider for DashboardConfig {
    fn data_path(&self) -> &Path {
        &self.data.path
    }

    fn top_n(&self) -> usize {
        self.views.top_n
    }

    fn top_metric(&self) -> Metric {
        self.views.top_metric
    }

    fn sort_by(&self) -> Metric {
        self.views.sort_by
    }

    fn categories(&self) -> Option<&[String]> {
        self.views.categories.as_deref()
    }

    fn brand_patterns(&self) -> &[String] {
        &self.views.brands
    }

    fn spotlight_domains(&self) -> &[String] {
        &self.views.spotlight_domains
    }

    fn headline_categories(&self) -> &[String] {
        &self.views.headline_categories
    }

    fn headline_audiences(&self) -> &[String] {
        &self.views.headline_audiences
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
