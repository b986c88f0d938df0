use crate::core::loader::DatasetLoader;
use crate::core::views::{self, BrandMatcher, CategoryFilter, GroupedView};
use crate::domain::model::{cited_for_domain, Dataset, GroupKey, Lookup, Metric, Record, Total};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineMetric {
    pub label: String,
    pub value: Lookup<u64>,
}

impl HeadlineMetric {
    fn new(label: impl Into<String>, value: Lookup<u64>) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSection {
    pub top_n: usize,
    pub metric: Metric,
    pub domains: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSection {
    pub headline: Vec<HeadlineMetric>,
    pub unique_domains: usize,
    pub stats: GroupedView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSection {
    pub patterns: Vec<String>,
    /// 沒有任何品牌網域時為空
    pub headline: Vec<HeadlineMetric>,
    pub rows: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudienceSection {
    pub headline: Vec<HeadlineMetric>,
    pub stats: GroupedView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerSection {
    pub categories: Vec<String>,
    pub sort_by: Metric,
    pub rows: Vec<Record>,
}

/// Every view of the dashboard, in render order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub source: PathBuf,
    pub overview: OverviewSection,
    pub channels: ChannelSection,
    pub brands: BrandSection,
    pub audiences: AudienceSection,
    pub explorer: ExplorerSection,
}

fn count_lookup(view: &GroupedView, group: &str, metric: Metric) -> Lookup<u64> {
    view.lookup(group, metric).available().and_then(Total::count).into()
}

pub fn build_report<C: ConfigProvider + ?Sized>(dataset: &Dataset, config: &C) -> DashboardReport {
    let overview = OverviewSection {
        top_n: config.top_n(),
        metric: config.top_metric(),
        domains: views::top_n(dataset, config.top_n(), config.top_metric()),
    };

    let category_stats = views::group_totals(dataset, GroupKey::Category, &Metric::COUNTS);
    let channels = ChannelSection {
        headline: config
            .headline_categories()
            .iter()
            .map(|category| {
                HeadlineMetric::new(
                    format!("Total Citations ({})", category),
                    count_lookup(&category_stats, category, Metric::Cited),
                )
            })
            .collect(),
        unique_domains: dataset.len(),
        stats: category_stats,
    };

    let matcher = BrandMatcher::new(config.brand_patterns());
    let brand_rows = matcher.filter(dataset);
    let brand_headline = if brand_rows.is_empty() {
        Vec::new()
    } else {
        config
            .spotlight_domains()
            .iter()
            .map(|domain| {
                HeadlineMetric::new(
                    format!("{} Citations", domain),
                    cited_for_domain(&brand_rows, domain),
                )
            })
            .collect()
    };
    let brands = BrandSection {
        patterns: matcher.patterns().to_vec(),
        headline: brand_headline,
        rows: brand_rows,
    };

    let audience_stats = views::group_totals(dataset, GroupKey::AudienceCluster, &Metric::COUNTS);
    let audiences = AudienceSection {
        headline: config
            .headline_audiences()
            .iter()
            .map(|audience| {
                HeadlineMetric::new(
                    format!("{} Audience Citations", audience),
                    count_lookup(&audience_stats, audience, Metric::Cited),
                )
            })
            .collect(),
        stats: audience_stats,
    };

    let (filter, categories) = match config.categories() {
        Some(selected) => (CategoryFilter::only(selected.iter().cloned()), selected.to_vec()),
        None => (
            CategoryFilter::All,
            dataset
                .distinct_values(GroupKey::Category)
                .into_iter()
                .map(str::to_string)
                .collect(),
        ),
    };
    let explorer = ExplorerSection {
        categories,
        sort_by: config.sort_by(),
        rows: views::filter_sort(dataset, &filter, config.sort_by()),
    };

    DashboardReport {
        source: dataset.source().to_path_buf(),
        overview,
        channels,
        brands,
        audiences,
        explorer,
    }
}

pub struct DashboardEngine<S: Storage, C: ConfigProvider> {
    loader: DatasetLoader<S>,
    config: C,
}

impl<S: Storage, C: ConfigProvider> DashboardEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            loader: DatasetLoader::new(storage),
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn loader(&self) -> &DatasetLoader<S> {
        &self.loader
    }

    pub fn run(&self) -> Result<DashboardReport> {
        let start_time = Instant::now();
        tracing::info!(path = %self.config.data_path().display(), "🚀 Building dashboard report");

        let dataset = self.loader.load(self.config.data_path())?;
        if dataset.is_empty() {
            tracing::warn!("Dataset has no rows; every headline metric will be N/A");
        }

        let report = build_report(&dataset, &self.config);

        tracing::info!(
            top_domains = report.overview.domains.len(),
            categories = report.channels.stats.len(),
            audiences = report.audiences.stats.len(),
            brand_rows = report.brands.rows.len(),
            explorer_rows = report.explorer.rows.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "✅ Dashboard report ready"
        );
        Ok(report)
    }
}
