//! JSON ledger persistence.
//!
//! One `student_{id}.json` artifact per student under a caller-supplied
//! data directory. Saves are full overwrites through a temp file renamed
//! into place. The store assumes a single writer per student at a time;
//! nothing enforces that.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::TutorError;
use crate::ledger::PerformanceLedger;

/// File-backed store for [`PerformanceLedger`] records.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    data_dir: PathBuf,
}

impl LedgerStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn ledger_path(&self, student_id: &str) -> PathBuf {
        self.data_dir.join(format!("student_{student_id}.json"))
    }

    pub fn report_path(&self, student_id: &str) -> PathBuf {
        self.data_dir.join(format!("student_{student_id}_report.json"))
    }

    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join("students_performance.csv")
    }

    /// Loads an existing ledger, failing with
    /// [`TutorError::StudentNotFound`] if none has been persisted.
    pub fn load(&self, student_id: &str) -> Result<PerformanceLedger, TutorError> {
        let path = self.ledger_path(student_id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TutorError::StudentNotFound(student_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads a ledger, initializing and persisting a fresh one on first
    /// access for this student.
    pub fn load_or_create(&self, student_id: &str) -> Result<PerformanceLedger, TutorError> {
        match self.load(student_id) {
            Ok(ledger) => Ok(ledger),
            Err(e) if e.is_not_found() => {
                let ledger = PerformanceLedger::new(student_id);
                self.save(&ledger)?;
                Ok(ledger)
            }
            Err(e) => Err(e),
        }
    }

    /// Persists the full ledger, replacing any previous artifact.
    pub fn save(&self, ledger: &PerformanceLedger) -> Result<(), TutorError> {
        let json = serde_json::to_string_pretty(ledger)?;
        write_atomic(&self.ledger_path(&ledger.student_id), json.as_bytes())?;
        Ok(())
    }
}

/// Write `contents` to a temp file next to `path`, then rename into place.
///
/// The rename keeps readers from ever observing a half-written artifact;
/// it does not guard against concurrent writers.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}
