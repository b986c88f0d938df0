//! Output formatting for the report.

use crate::core::dashboard::{DashboardReport, HeadlineMetric};
use crate::core::views::GroupedView;
use crate::domain::model::{Metric, Record};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Text tables, one per section
    #[default]
    Table,
    /// Pretty-printed JSON of the whole report
    Json,
}

pub const NO_BRAND_ROWS: &str = "No brand domains found in the dataset";

pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &DashboardReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_tables(report)),
        }
    }

    fn format_report_tables(&self, report: &DashboardReport) -> String {
        let mut sections = Vec::new();

        sections.push(format!(
            "Brand Presence Overview\nTop {} domains by {}\n{}",
            report.overview.domains.len(),
            report.overview.metric,
            records_table(&report.overview.domains)
        ));

        let unique_domains = [(
            "Overall Unique Domains",
            report.channels.unique_domains.to_string(),
        )];
        sections.push(format!(
            "Media Channel Analysis\n{}\n{}",
            headline_table(&report.channels.headline, &unique_domains),
            group_table(&report.channels.stats)
        ));

        let brands = if report.brands.rows.is_empty() {
            NO_BRAND_ROWS.to_string()
        } else {
            format!(
                "{}\n{}",
                headline_table(&report.brands.headline, &[]),
                records_table(&report.brands.rows)
            )
        };
        sections.push(format!(
            "Brand-Specific Analysis ({})\n{}",
            report.brands.patterns.join(", "),
            brands
        ));

        sections.push(format!(
            "Audience Insights\n{}\n{}",
            headline_table(&report.audiences.headline, &[]),
            group_table(&report.audiences.stats)
        ));

        sections.push(format!(
            "Data Explorer\nChannels: {} | sorted by {}\n{}",
            report.explorer.categories.join(", "),
            report.explorer.sort_by,
            records_table(&report.explorer.rows)
        ));

        sections.join("\n\n")
    }
}

fn finish(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn records_table(records: &[Record]) -> String {
    let mut builder = Builder::default();
    let mut header = vec![
        "Domain".to_string(),
        "Category".to_string(),
        "Audience Cluster".to_string(),
    ];
    header.extend(Metric::ALL.iter().map(|m| m.column().to_string()));
    builder.push_record(header);

    for record in records {
        builder.push_record([
            record.domain.clone(),
            record.category.clone(),
            record.audience_cluster.clone(),
            record.times_cited.to_string(),
            record.urls.to_string(),
            record.queries.to_string(),
            record.rank.to_string(),
        ]);
    }

    finish(builder)
}

fn headline_table(metrics: &[HeadlineMetric], extra: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    for metric in metrics {
        builder.push_record([metric.label.clone(), metric.value.to_string()]);
    }
    for (label, value) in extra {
        builder.push_record([label.to_string(), value.clone()]);
    }
    finish(builder)
}

fn group_table(view: &GroupedView) -> String {
    let mut builder = Builder::default();
    let mut header = vec![view.key.column().to_string(), "Domains".to_string()];
    header.extend(view.metrics.iter().map(|m| m.column().to_string()));
    builder.push_record(header);

    for group in &view.groups {
        let mut row = vec![group.group.clone(), group.rows.to_string()];
        row.extend(
            view.metrics
                .iter()
                .map(|m| group.total(*m).to_string()),
        );
        builder.push_record(row);
    }

    finish(builder)
}
