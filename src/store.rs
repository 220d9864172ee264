use crate::document::{self, LeagueDocument};
use crate::error::{Result, ScrapeError};
use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where the league document lives between phases.
pub trait DocumentStore {
    fn load(&self) -> Result<LeagueDocument>;
    fn save(&self, doc: &LeagueDocument) -> Result<()>;
    /// Human-readable name of the artifact, used in phase summaries.
    fn location(&self) -> String;
}

/// A single JSON file on disk.
pub struct LocalFsStore {
    path: PathBuf,
}

impl LocalFsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DocumentStore for LocalFsStore {
    fn load(&self) -> Result<LeagueDocument> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScrapeError::NotFound(format!(
                    "{} (run discover-team-links first)",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        document::load(&text)
    }

    fn save(&self, doc: &LeagueDocument) -> Result<()> {
        let text = document::save(doc)?;
        // Write next to the target and swap it in, so a crash never leaves
        // a truncated document behind.
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the serialized document in memory.
#[derive(Default)]
pub struct MemoryStore {
    text: RefCell<Option<String>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(Some(text.into())),
            saves: RefCell::new(0),
        }
    }

    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        *self.saves.borrow()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<LeagueDocument> {
        match self.text.borrow().as_deref() {
            Some(text) => document::load(text),
            None => Err(ScrapeError::NotFound("in-memory document".into())),
        }
    }

    fn save(&self, doc: &LeagueDocument) -> Result<()> {
        let text = document::save(doc)?;
        *self.text.borrow_mut() = Some(text);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
