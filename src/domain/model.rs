use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// CSV 表頭必須包含的欄位（區分大小寫）
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Domain",
    "Category",
    "Audience Cluster",
    "# of times Cited",
    "# of URLs",
    "# of Queries",
    "Rank",
];

/// One domain's citation profile, i.e. one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Audience Cluster")]
    pub audience_cluster: String,
    #[serde(rename = "# of times Cited")]
    pub times_cited: u64,
    #[serde(rename = "# of URLs")]
    pub urls: u64,
    #[serde(rename = "# of Queries")]
    pub queries: u64,
    #[serde(rename = "Rank")]
    pub rank: f64,
}

impl Record {
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cited => self.times_cited as f64,
            Metric::Urls => self.urls as f64,
            Metric::Queries => self.queries as f64,
            Metric::Rank => self.rank,
        }
    }

    /// Integer value of a count column; `None` for `Rank`.
    pub fn count(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::Cited => Some(self.times_cited),
            Metric::Urls => Some(self.urls),
            Metric::Queries => Some(self.queries),
            Metric::Rank => None,
        }
    }

    pub fn group_value(&self, key: GroupKey) -> &str {
        match key {
            GroupKey::Category => &self.category,
            GroupKey::AudienceCluster => &self.audience_cluster,
        }
    }
}

/// Numeric columns a view can sort or sum by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Metric {
    #[serde(rename = "# of times Cited", alias = "cited")]
    Cited,
    #[serde(rename = "# of URLs", alias = "urls")]
    Urls,
    #[serde(rename = "# of Queries", alias = "queries")]
    Queries,
    #[serde(rename = "Rank", alias = "rank")]
    Rank,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Cited, Metric::Urls, Metric::Queries, Metric::Rank];

    /// The three count columns the dashboard sums per group.
    pub const COUNTS: [Metric; 3] = [Metric::Cited, Metric::Urls, Metric::Queries];

    pub fn column(&self) -> &'static str {
        match self {
            Metric::Cited => "# of times Cited",
            Metric::Urls => "# of URLs",
            Metric::Queries => "# of Queries",
            Metric::Rank => "Rank",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// 欄位加總：計數欄位用整數累加（飽和），`Rank` 用浮點數
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Total {
    Count(u64),
    Score(f64),
}

impl Total {
    pub fn zero(metric: Metric) -> Self {
        match metric {
            Metric::Rank => Total::Score(0.0),
            _ => Total::Count(0),
        }
    }

    pub fn add(self, record: &Record, metric: Metric) -> Self {
        match (self, record.count(metric)) {
            (Total::Count(sum), Some(value)) => Total::Count(sum.saturating_add(value)),
            (Total::Count(sum), None) => Total::Score(sum as f64 + record.metric(metric)),
            (Total::Score(sum), _) => Total::Score(sum + record.metric(metric)),
        }
    }

    pub fn count(self) -> Option<u64> {
        match self {
            Total::Count(value) => Some(value),
            Total::Score(_) => None,
        }
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Total::Count(value) => value.fmt(f),
            Total::Score(value) => value.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKey {
    #[serde(rename = "Category")]
    Category,
    #[serde(rename = "Audience Cluster")]
    AudienceCluster,
}

impl GroupKey {
    pub fn column(&self) -> &'static str {
        match self {
            GroupKey::Category => "Category",
            GroupKey::AudienceCluster => "Audience Cluster",
        }
    }
}

/// 查詢結果：找不到的群組或網域是 `Unavailable`，不是 0。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<T> {
    Available(T),
    Unavailable,
}

impl<T> Lookup<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Lookup::Available(_))
    }

    pub fn available(self) -> Option<T> {
        match self {
            Lookup::Available(value) => Some(value),
            Lookup::Unavailable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Available(value) => Lookup::Available(f(value)),
            Lookup::Unavailable => Lookup::Unavailable,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Available(value),
            None => Lookup::Unavailable,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Lookup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Available(value) => value.fmt(f),
            Lookup::Unavailable => f.write_str("N/A"),
        }
    }
}

impl<T: Serialize> Serialize for Lookup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Lookup::Available(value) => value.serialize(serializer),
            Lookup::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// 載入後不可變的資料集
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    source: PathBuf,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(source: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values of a grouping column, in order of first occurrence.
    pub fn distinct_values(&self, key: GroupKey) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            let value = record.group_value(key);
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen
    }

    pub fn total(&self, metric: Metric) -> Total {
        self.records
            .iter()
            .fold(Total::zero(metric), |sum, r| sum.add(r, metric))
    }

    /// Citation count of the first row whose domain equals `domain` exactly.
    pub fn cited_for_domain(&self, domain: &str) -> Lookup<u64> {
        cited_for_domain(&self.records, domain)
    }
}

pub fn cited_for_domain(records: &[Record], domain: &str) -> Lookup<u64> {
    records
        .iter()
        .find(|r| r.domain == domain)
        .map(|r| r.times_cited)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domain: &str, category: &str, audience: &str, cited: u64) -> Record {
        Record {
            domain: domain.to_string(),
            category: category.to_string(),
            audience_cluster: audience.to_string(),
            times_cited: cited,
            urls: cited / 2,
            queries: cited / 5,
            rank: 1.0,
        }
    }

    #[test]
    fn test_distinct_values_keep_first_occurrence_order() {
        let dataset = Dataset::new(
            "test.csv",
            vec![
                record("youtube.com", "Social", "general", 60),
                record("meta.com", "Earned", "techie", 50),
                record("reddit.com", "Social", "techie", 20),
            ],
        );
        assert_eq!(dataset.distinct_values(GroupKey::Category), vec!["Social", "Earned"]);
        assert_eq!(
            dataset.distinct_values(GroupKey::AudienceCluster),
            vec!["general", "techie"]
        );
    }

    #[test]
    fn test_cited_for_domain_is_exact_match() {
        let dataset = Dataset::new("test.csv", vec![record("meta.com", "Earned", "techie", 50)]);
        assert_eq!(dataset.cited_for_domain("meta.com"), Lookup::Available(50));
        assert_eq!(dataset.cited_for_domain("Meta.com"), Lookup::Unavailable);
        assert_eq!(dataset.cited_for_domain("about.meta.com"), Lookup::Unavailable);
    }

    #[test]
    fn test_count_totals_are_exact_integers() {
        let big = (1u64 << 53) + 1;
        let dataset = Dataset::new(
            "big.csv",
            vec![
                record("a.com", "Earned", "general", big),
                record("b.com", "Earned", "general", 2),
            ],
        );
        assert_eq!(dataset.total(Metric::Cited), Total::Count(big + 2));
        assert_eq!(dataset.total(Metric::Rank), Total::Score(2.0));

        let saturated = Dataset::new(
            "max.csv",
            vec![
                record("a.com", "Earned", "general", u64::MAX),
                record("b.com", "Earned", "general", 1),
            ],
        );
        assert_eq!(saturated.total(Metric::Cited), Total::Count(u64::MAX));
    }

    #[test]
    fn test_total_display_and_json() {
        assert_eq!(Total::Count(9007199254740995).to_string(), "9007199254740995");
        assert_eq!(serde_json::to_string(&Total::Count(94)).unwrap(), "94");
        assert_eq!(serde_json::to_string(&Total::Score(4.5)).unwrap(), "4.5");
    }

    #[test]
    fn test_lookup_display_and_json() {
        assert_eq!(Lookup::Available(94).to_string(), "94");
        assert_eq!(Lookup::<u64>::Unavailable.to_string(), "N/A");
        assert_eq!(serde_json::to_string(&Lookup::Available(3u64)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&Lookup::<u64>::Unavailable).unwrap(),
            "\"N/A\""
        );
    }

    #[test]
    fn test_metric_accepts_column_name_and_alias() {
        #[derive(Deserialize)]
        struct Wrapper {
            metric: Metric,
        }
        let by_column: Wrapper = toml::from_str(r##"metric = "# of URLs""##).unwrap();
        let by_alias: Wrapper = toml::from_str(r#"metric = "urls""#).unwrap();
        assert_eq!(by_column.metric, Metric::Urls);
        assert_eq!(by_alias.metric, Metric::Urls);
    }
}
