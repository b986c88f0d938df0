pub mod dashboard;
pub mod loader;
pub mod views;

pub use crate::domain::model::{Dataset, Lookup, Record};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
