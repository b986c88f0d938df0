use crate::domain::model::Metric;
use crate::output::OutputFormat;
use std::path::Path;

/// 讀取原始資料的來源；錯誤保留 `std::io::Error` 讓載入器區分「找不到」與「讀不到」。
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &Path;
    fn top_n(&self) -> usize;
    fn top_metric(&self) -> Metric;
    fn sort_by(&self) -> Metric;
    /// `None` keeps every category.
    fn categories(&self) -> Option<&[String]>;
    fn brand_patterns(&self) -> &[String];
    fn spotlight_domains(&self) -> &[String];
    fn headline_categories(&self) -> &[String];
    fn headline_audiences(&self) -> &[String];
    fn output_format(&self) -> OutputFormat;
}
