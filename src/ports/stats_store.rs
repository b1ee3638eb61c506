use crate::engine::error::EngineError;
use crate::player::stats::PlayerStatistics;
use crate::player::stats::TableBucket;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

/// aggregate key a player's counters accumulate under
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct StatsKey {
    pub strategy: String,
    pub bucket: TableBucket,
}

impl StatsKey {
    pub fn new(strategy: impl Into<String>, bucket: TableBucket) -> Self {
        Self {
            strategy: strategy.into(),
            bucket,
        }
    }
}

/// persistent per-player behavioral statistics. the engine commits
/// exactly one update per hand, at post-river; the commit must be
/// atomic from the store's perspective.
pub trait PlayersStatisticsStore {
    fn load(&self, key: &StatsKey) -> PlayerStatistics;
    fn update(&mut self, entries: &[(StatsKey, PlayerStatistics)]) -> Result<(), EngineError>;
}

/// volatile store, the default for simulations and tests
#[derive(Debug, Default)]
pub struct MemoryStatisticsStore {
    rows: BTreeMap<StatsKey, PlayerStatistics>,
}

impl PlayersStatisticsStore for MemoryStatisticsStore {
    fn load(&self, key: &StatsKey) -> PlayerStatistics {
        self.rows.get(key).copied().unwrap_or_default()
    }
    fn update(&mut self, entries: &[(StatsKey, PlayerStatistics)]) -> Result<(), EngineError> {
        for (key, delta) in entries {
            self.rows.entry(key.clone()).or_default().merge(delta);
        }
        Ok(())
    }
}

/// file-backed store: the whole table is read at open and rewritten
/// on every hand commit (write-to-temp then rename, so a crash can
/// not leave a torn file).
#[derive(Debug)]
pub struct JsonStatisticsStore {
    path: PathBuf,
    rows: BTreeMap<StatsKey, PlayerStatistics>,
}

impl JsonStatisticsStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref().to_path_buf();
        let rows = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<Vec<(StatsKey, PlayerStatistics)>>(&text)
                .map_err(|e| EngineError::StorePersistence(e.to_string()))?
                .into_iter()
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(EngineError::StorePersistence(e.to_string())),
        };
        Ok(Self { path, rows })
    }

    fn persist(&self) -> Result<(), EngineError> {
        let rows: Vec<(&StatsKey, &PlayerStatistics)> = self.rows.iter().collect();
        let text = serde_json::to_string_pretty(&rows)
            .map_err(|e| EngineError::StorePersistence(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, text).map_err(|e| EngineError::StorePersistence(e.to_string()))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| EngineError::StorePersistence(e.to_string()))
    }
}

impl PlayersStatisticsStore for JsonStatisticsStore {
    fn load(&self, key: &StatsKey) -> PlayerStatistics {
        self.rows.get(key).copied().unwrap_or_default()
    }
    fn update(&mut self, entries: &[(StatsKey, PlayerStatistics)]) -> Result<(), EngineError> {
        for (key, delta) in entries {
            self.rows.entry(key.clone()).or_default().merge(delta);
        }
        self.persist()
    }
}
