use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Pending,
    Completed,
    Failed,
}

/// One prompt and the memes generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub id: u64,
    pub prompt: String,
    pub paths: Vec<PathBuf>,
    pub status: GenerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Generation records kept as one JSON file each (`gen_<id>.json`).
///
/// Ids are assigned monotonically: one past the highest id on disk.
pub struct GenerationStore {
    dir: PathBuf,
    create_lock: Mutex<()>,
}

impl GenerationStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create generation store: {}", dir.display()))?;
        Ok(Self {
            dir,
            create_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("gen_{:08}.json", id))
    }

    /// Start a pending record for `prompt`.
    pub fn create(&self, prompt: &str) -> Result<Generation> {
        let _guard = self
            .create_lock
            .lock()
            .map_err(|_| anyhow!("generation store lock poisoned"))?;

        let mut id = self.max_id()? + 1;
        loop {
            let now = Utc::now();
            let record = Generation {
                id,
                prompt: prompt.to_string(),
                paths: Vec::new(),
                status: GenerationStatus::Pending,
                error: None,
                created_at: now,
                updated_at: now,
            };

            // Another process may have claimed this id since the scan.
            let path = self.record_path(id);
            match std::fs::OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    let content = serde_json::to_string_pretty(&record)
                        .context("failed to serialize generation")?;
                    file.write_all(content.as_bytes())
                        .with_context(|| format!("failed to write generation: {}", path.display()))?;
                    tracing::debug!("created generation {}", id);
                    return Ok(record);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => id += 1,
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("failed to create generation: {}", path.display())
                    })
                }
            }
        }
    }

    /// Store the rendered artifact paths and mark the record completed.
    pub fn update_paths(&self, id: u64, paths: Vec<PathBuf>) -> Result<Generation> {
        self.modify(id, |record| {
            record.paths = paths;
            record.status = GenerationStatus::Completed;
            record.error = None;
        })
    }

    pub fn mark_failed(&self, id: u64, reason: &str) -> Result<Generation> {
        self.modify(id, |record| {
            record.status = GenerationStatus::Failed;
            record.error = Some(reason.to_string());
        })
    }

    pub fn get(&self, id: u64) -> Result<Option<Generation>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }
        read_record(&path).map(Some)
    }

    /// The `n` most recent records, newest first.
    pub fn list_last(&self, n: usize) -> Result<Vec<Generation>> {
        let mut records = self.list_all()?;
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records.truncate(n);
        Ok(records)
    }

    fn modify(&self, id: u64, update: impl FnOnce(&mut Generation)) -> Result<Generation> {
        let path = self.record_path(id);
        let mut record = self
            .get(id)?
            .ok_or_else(|| anyhow!("generation {} not found", id))?;
        update(&mut record);
        record.updated_at = Utc::now();

        let content = serde_json::to_string_pretty(&record).context("failed to serialize generation")?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .with_context(|| format!("failed to write generation: {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace generation: {}", path.display()))?;
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<Generation>> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read generation store: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if !is_record_file(&path) {
                continue;
            }
            out.push(read_record(&path)?);
        }
        Ok(out)
    }

    fn max_id(&self) -> Result<u64> {
        let mut max = 0;
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read generation store: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if let Some(id) = record_id(&path) {
                max = max.max(id);
            }
        }
        Ok(max)
    }
}

fn record_id(path: &Path) -> Option<u64> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .strip_prefix("gen_")?
        .parse()
        .ok()
}

fn is_record_file(path: &Path) -> bool {
    path.is_file() && record_id(path).is_some()
}

fn read_record(path: &Path) -> Result<Generation> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read generation: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse generation: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_increasing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = GenerationStore::open(dir.path()).unwrap();

        let a = store.create("india new zealand test match").unwrap();
        let b = store.create("el clasico").unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.status, GenerationStatus::Pending);
        assert!(a.paths.is_empty());
    }

    #[test]
    fn test_ids_continue_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        GenerationStore::open(dir.path()).unwrap().create("first").unwrap();
        let store = GenerationStore::open(dir.path()).unwrap();
        assert_eq!(store.create("second").unwrap().id, 2);
    }

    #[test]
    fn test_update_paths_completes_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = GenerationStore::open(dir.path()).unwrap();
        let g = store.create("prompt").unwrap();

        let updated = store
            .update_paths(g.id, vec![PathBuf::from("out/creations/abc.jpg")])
            .unwrap();
        assert_eq!(updated.status, GenerationStatus::Completed);

        let loaded = store.get(g.id).unwrap().unwrap();
        assert_eq!(loaded.paths, vec![PathBuf::from("out/creations/abc.jpg")]);
        assert!(loaded.updated_at >= loaded.created_at);
    }

    #[test]
    fn test_mark_failed_records_reason() {
        let dir = tempfile::tempdir().unwrap();
        let store = GenerationStore::open(dir.path()).unwrap();
        let g = store.create("prompt").unwrap();

        store.mark_failed(g.id, "no meme rendered").unwrap();
        let loaded = store.get(g.id).unwrap().unwrap();
        assert_eq!(loaded.status, GenerationStatus::Failed);
        assert_eq!(loaded.error.as_deref(), Some("no meme rendered"));
    }

    #[test]
    fn test_get_unknown_is_none_and_update_unknown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = GenerationStore::open(dir.path()).unwrap();
        assert!(store.get(42).unwrap().is_none());
        assert!(store.update_paths(42, Vec::new()).is_err());
    }

    #[test]
    fn test_list_last_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = GenerationStore::open(dir.path()).unwrap();
        for prompt in ["one", "two", "three"] {
            store.create(prompt).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let last = store.list_last(2).unwrap();
        let prompts: Vec<&str> = last.iter().map(|g| g.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["three", "two"]);
    }
}
