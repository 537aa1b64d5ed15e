use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// One worksheet: a header row plus data rows, all cells as strings. This is
/// the only wire format in the system and must round-trip exactly (column
/// set and row content) through any connector.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Sheet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn empty(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Look up a cell by column name. Missing columns and short rows read as "".
pub(crate) fn cell<'a>(columns: &[String], cells: &'a [String], name: &str) -> &'a str {
    columns
        .iter()
        .position(|c| c == name)
        .and_then(|i| cells.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// The generic read/update connector over named worksheets.
///
/// `read` always fetches fresh state; `update` is a full-table replace. There
/// is no isolation between concurrent read-modify-write cycles: the last
/// writer wins at whole-worksheet granularity.
#[async_trait]
pub trait SheetConnection {
    async fn read(&self, worksheet: &str) -> Result<Option<Sheet>, StoreError>;
    async fn update(&self, worksheet: &str, sheet: Sheet) -> Result<(), StoreError>;
}

/// Sled-backed connector: worksheet name as key, bincode-encoded [`Sheet`]
/// as value.
#[derive(Clone, Debug)]
pub struct SledSheetStore {
    db: sled::Db,
}

impl SledSheetStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { db })
    }
}

#[async_trait]
impl SheetConnection for SledSheetStore {
    async fn read(&self, worksheet: &str) -> Result<Option<Sheet>, StoreError> {
        let value = self
            .db
            .get(worksheet.as_bytes())
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        match value {
            None => Ok(None),
            Some(raw) => bincode::deserialize(&raw)
                .map(Some)
                .map_err(|e| StoreError::Codec(worksheet.to_string(), e.to_string())),
        }
    }

    async fn update(&self, worksheet: &str, sheet: Sheet) -> Result<(), StoreError> {
        let raw = bincode::serialize(&sheet)
            .map_err(|e| StoreError::Codec(worksheet.to_string(), e.to_string()))?;
        self.db
            .insert(worksheet.as_bytes(), raw)
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }
}

/// In-memory connector, mostly for tests.
#[derive(Clone, Default)]
pub struct MemorySheetStore {
    sheets: Arc<Mutex<HashMap<String, Sheet>>>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SheetConnection for MemorySheetStore {
    async fn read(&self, worksheet: &str) -> Result<Option<Sheet>, StoreError> {
        Ok(self.sheets.lock().await.get(worksheet).cloned())
    }

    async fn update(&self, worksheet: &str, sheet: Sheet) -> Result<(), StoreError> {
        self.sheets.lock().await.insert(worksheet.to_string(), sheet);
        Ok(())
    }
}
