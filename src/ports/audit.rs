use crate::Chips;
use crate::PlayerId;
use crate::engine::action::PlayerAction;
use crate::engine::error::EngineError;
use serde::Deserialize;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// one finished hand, enough to replay the action offline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandAuditRecord {
    pub hand_id: u64,
    pub seats: Vec<(PlayerId, String, Chips)>,
    pub preflop: Vec<PlayerAction>,
    pub flop: Vec<PlayerAction>,
    pub turn: Vec<PlayerAction>,
    pub river: Vec<PlayerAction>,
    pub winners: Vec<PlayerId>,
    pub pot: Chips,
}

/// append-only log of hand action sequences
pub trait HandAuditStore {
    fn append(&mut self, record: &HandAuditRecord) -> Result<(), EngineError>;
}

#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    pub records: Vec<HandAuditRecord>,
}

impl HandAuditStore for MemoryAuditStore {
    fn append(&mut self, record: &HandAuditRecord) -> Result<(), EngineError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// one JSON object per line
#[derive(Debug)]
pub struct JsonlAuditStore {
    file: std::fs::File,
}

impl JsonlAuditStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| EngineError::StorePersistence(e.to_string()))?;
        Ok(Self { file })
    }
}

impl HandAuditStore for JsonlAuditStore {
    fn append(&mut self, record: &HandAuditRecord) -> Result<(), EngineError> {
        let line = serde_json::to_string(record)
            .map_err(|e| EngineError::StorePersistence(e.to_string()))?;
        writeln!(self.file, "{}", line)
            .map_err(|e| EngineError::StorePersistence(e.to_string()))
    }
}
