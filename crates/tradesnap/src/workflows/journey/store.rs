use crate::workflows::valuation::demand::PingSummary;
use crate::workflows::valuation::Condition;
use crate::workflows::vehicle::Registration;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JourneyEvent {
    Quoted {
        vehicle: String,
        condition: Condition,
        total_offer: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        demand_bonus: Option<u32>,
    },
    NetworkPinged {
        summary: PingSummary,
    },
    BookingConfirmed {
        reference: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyRecord {
    pub registration: Registration,
    pub recorded_at: NaiveDateTime,
    #[serde(flatten)]
    pub event: JourneyEvent,
}

#[derive(Debug, thiserror::Error)]
pub enum JourneyStoreError {
    #[error("journey store io error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("journey store at {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("journey store unavailable: {0}")]
    Unavailable(String),
}

pub trait JourneyStore: Send + Sync {
    fn record(&self, record: JourneyRecord) -> Result<(), JourneyStoreError>;
    fn for_registration(
        &self,
        registration: &Registration,
    ) -> Result<Vec<JourneyRecord>, JourneyStoreError>;
    fn all(&self) -> Result<Vec<JourneyRecord>, JourneyStoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryJourneyStore {
    records: Arc<Mutex<Vec<JourneyRecord>>>,
}

impl InMemoryJourneyStore {
    fn snapshot(&self) -> Result<Vec<JourneyRecord>, JourneyStoreError> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| JourneyStoreError::Unavailable("journey mutex poisoned".to_string()))
    }
}

impl JourneyStore for InMemoryJourneyStore {
    fn record(&self, record: JourneyRecord) -> Result<(), JourneyStoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| JourneyStoreError::Unavailable("journey mutex poisoned".to_string()))?;
        guard.push(record);
        Ok(())
    }

    fn for_registration(
        &self,
        registration: &Registration,
    ) -> Result<Vec<JourneyRecord>, JourneyStoreError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|record| &record.registration == registration)
            .collect())
    }

    fn all(&self) -> Result<Vec<JourneyRecord>, JourneyStoreError> {
        self.snapshot()
    }
}

/// Flat JSON array on disk, rewritten in full on every append.
///
/// Each rewrite lands in a sibling temp file that is renamed over the
/// journal, so readers see either the old or the new array. Access is
/// serialised within this process only. Two processes sharing the file can
/// lose each other's appends.
#[derive(Debug)]
pub struct JsonFileJourneyStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileJourneyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> JourneyStoreError {
        JourneyStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn poisoned() -> JourneyStoreError {
        JourneyStoreError::Unavailable("journey file lock poisoned".to_string())
    }

    fn read_locked(&self) -> Result<Vec<JourneyRecord>, JourneyStoreError> {
        let _guard = self.lock.read().map_err(|_| Self::poisoned())?;
        self.load()
    }

    fn load(&self) -> Result<Vec<JourneyRecord>, JourneyStoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        if file.metadata().map_err(|err| self.io_error(err))?.len() == 0 {
            return Ok(Vec::new());
        }

        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            JourneyStoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn save(&self, records: &[JourneyRecord]) -> Result<(), JourneyStoreError> {
        let parent = match self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|err| self.io_error(err))?;
                dir
            }
            None => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(parent).map_err(|err| self.io_error(err))?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
                JourneyStoreError::Corrupt {
                    path: self.path.clone(),
                    source,
                }
            })?;
            writer.flush().map_err(|err| self.io_error(err))?;
        }
        staged
            .as_file()
            .sync_all()
            .map_err(|err| self.io_error(err))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

impl JourneyStore for JsonFileJourneyStore {
    fn record(&self, record: JourneyRecord) -> Result<(), JourneyStoreError> {
        let _guard = self.lock.write().map_err(|_| Self::poisoned())?;

        let mut records = self.load()?;
        records.push(record);
        self.save(&records)?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "journey store rewritten"
        );
        Ok(())
    }

    fn for_registration(
        &self,
        registration: &Registration,
    ) -> Result<Vec<JourneyRecord>, JourneyStoreError> {
        Ok(self
            .read_locked()?
            .into_iter()
            .filter(|record| &record.registration == registration)
            .collect())
    }

    fn all(&self) -> Result<Vec<JourneyRecord>, JourneyStoreError> {
        self.read_locked()
    }
}
