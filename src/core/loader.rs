use crate::domain::model::{Dataset, Record, REQUIRED_COLUMNS};
use crate::domain::ports::Storage;
use crate::utils::error::DataLoadError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// 快取失效策略。資料來源是靜態檔案，預設永不失效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationPolicy {
    #[default]
    Never,
}

/// Parses CSV files into [`Dataset`]s and memoizes them per path.
pub struct DatasetLoader<S: Storage> {
    storage: S,
    policy: InvalidationPolicy,
    cache: Mutex<HashMap<PathBuf, Arc<Dataset>>>,
}

impl<S: Storage> DatasetLoader<S> {
    pub fn new(storage: S) -> Self {
        Self::with_policy(storage, InvalidationPolicy::default())
    }

    pub fn with_policy(storage: S, policy: InvalidationPolicy) -> Self {
        Self {
            storage,
            policy,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> InvalidationPolicy {
        self.policy
    }

    pub fn load(&self, path: &Path) -> Result<Arc<Dataset>, DataLoadError> {
        if let Some(dataset) = self.cached(path) {
            tracing::debug!(path = %path.display(), "Dataset served from cache");
            return Ok(dataset);
        }

        let start_time = Instant::now();
        let bytes = self.storage.read_file(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataLoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => DataLoadError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let dataset = Arc::new(parse_dataset(path, &bytes)?);
        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "📥 Dataset loaded"
        );

        // 只快取成功的載入
        self.lock_cache()
            .insert(path.to_path_buf(), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drops a cached dataset so the next `load` re-reads it. Returns
    /// whether anything was cached for `path`.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.lock_cache().remove(path).is_some()
    }

    pub fn cached_paths(&self) -> usize {
        self.lock_cache().len()
    }

    fn cached(&self, path: &Path) -> Option<Arc<Dataset>> {
        match self.policy {
            InvalidationPolicy::Never => self.lock_cache().get(path).cloned(),
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<Dataset>>> {
        // 快取內容不會處於半寫入狀態，中毒時直接沿用
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Validates the header against the typed schema, then deserializes each row.
pub fn parse_dataset(path: &Path, bytes: &[u8]) -> Result<Dataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| DataLoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<Record>() {
        let record = result.map_err(|e| malformed(path, e))?;
        records.push(record);
    }

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        records = records.len(),
        "Parsed CSV"
    );
    Ok(Dataset::new(path, records))
}

fn malformed(path: &Path, error: csv::Error) -> DataLoadError {
    let line = error.position().map(|p| p.line()).unwrap_or(0);
    let message = match error.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        _ => error.to_string(),
    };
    DataLoadError::Malformed {
        path: path.to_path_buf(),
        line,
        message,
    }
}
