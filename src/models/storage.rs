use crate::lookup::PrefixDirectory;
use crate::models::{SearchHistory, TemplateBook};
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TEMPLATES_FILE: &str = "templates.json";
pub const HISTORY_FILE: &str = "search_history.json";
pub const PREFIXES_FILE: &str = "prefixes.json";
pub const LOG_FILE: &str = "phonetrack.log";

/// Storage Manager for disk operations
///
/// Every file is read and written wholesale. Writes go to a temporary file in
/// the same directory that is then renamed over the target, so a crash never
/// leaves a half-written file behind.
#[derive(Debug, Clone)]
pub struct StorageManager {
    data_dir: PathBuf,
    templates_file: PathBuf,
    history_file: PathBuf,
    prefixes_file: PathBuf,
}

impl StorageManager {
    /// Uses `data_dir` when given, otherwise the platform data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory {}", data_dir.display())
        })?;

        Ok(Self {
            templates_file: data_dir.join(TEMPLATES_FILE),
            history_file: data_dir.join(HISTORY_FILE),
            prefixes_file: data_dir.join(PREFIXES_FILE),
            data_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    /// Falls back to the sample templates when the file is missing or unreadable
    pub fn load_templates(&self) -> TemplateBook {
        load_or_default(&self.templates_file)
    }

    pub fn save_templates(&self, book: &TemplateBook) -> Result<()> {
        save_json(&self.templates_file, book).context("Failed to save templates")
    }

    pub fn load_history(&self) -> SearchHistory {
        load_or_default(&self.history_file)
    }

    pub fn save_history(&self, history: &SearchHistory) -> Result<()> {
        save_json(&self.history_file, history).context("Failed to save search history")
    }

    /// Optional prefix data; absent in a fresh install
    pub fn load_prefixes(&self) -> PrefixDirectory {
        load_or_default(&self.prefixes_file)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    Ok(dirs::data_dir()
        .context("Failed to get data directory")?
        .join("phonetrack"))
}

/// Reads a JSON file, returning `T::default()` if it is missing or malformed.
///
/// A malformed file is moved aside to `<name>.corrupt` so the next save does
/// not silently replace the only copy of the user's data.
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::debug!("{} not found, using defaults", path.display());
        return T::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            preserve_corrupt_file(path);
            T::default()
        }
    }
}

fn preserve_corrupt_file(path: &Path) {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".corrupt");
    let backup = PathBuf::from(backup);

    match fs::rename(path, &backup) {
        Ok(()) => log::warn!("Moved unreadable file to {}", backup.display()),
        Err(e) => log::warn!("Failed to move {} aside: {}", path.display(), e),
    }
}

pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    write_atomic(path, content.as_bytes())
}

/// Writes `data` to a sibling temp file, syncs it, then renames it over `path`
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {}", parent.display()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?;
    let temp_path = parent.join(format!(".{}.{}.tmp", file_name, std::process::id()));

    let result = (|| -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create {}", temp_path.display()))?;
        file.write_all(data)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("Failed to sync {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(dir: &Path) -> StorageManager {
        StorageManager::new(Some(dir.to_path_buf())).expect("storage")
    }

    #[test]
    fn test_should_seed_templates_when_no_file_exists() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let book = storage(tmp.path()).load_templates();
        assert_eq!(book, TemplateBook::default());
    }

    #[test]
    fn test_should_round_trip_a_saved_template() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = storage(tmp.path());

        let mut book = storage.load_templates();
        book.insert("Work", "Desk", "+1 (650) 253-0000")
            .expect("insert");
        storage.save_templates(&book).expect("save");

        let reloaded = storage.load_templates();
        assert_eq!(reloaded.get("Work", "Desk"), Some("+1 (650) 253-0000"));
    }

    #[test]
    fn test_should_remove_deleted_templates_from_the_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = storage(tmp.path());

        let mut book = storage.load_templates();
        book.remove("Emergency", "Police").expect("remove");
        storage.save_templates(&book).expect("save");

        let raw = fs::read_to_string(tmp.path().join(TEMPLATES_FILE)).expect("read");
        assert!(!raw.contains("Police"));
        assert_eq!(storage.load_templates().get("Emergency", "Police"), None);
    }

    #[test]
    fn test_should_persist_history_as_an_array() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = storage(tmp.path());

        let mut history = storage.load_history();
        assert!(history.is_empty());
        history.record("+1 650-253-0000");
        storage.save_history(&history).expect("save");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(tmp.path().join(HISTORY_FILE)).expect("read"))
                .expect("json");
        assert_eq!(value[0]["number"], "+1 650-253-0000");
        assert_eq!(storage.load_history().len(), 1);
    }

    #[test]
    fn test_should_fall_back_and_preserve_malformed_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = storage(tmp.path());
        let history_file = tmp.path().join(HISTORY_FILE);
        fs::write(&history_file, "{ not json").expect("write");

        let history = storage.load_history();

        assert!(history.is_empty());
        assert!(!history_file.exists());
        let backup = tmp.path().join(format!("{}.corrupt", HISTORY_FILE));
        assert_eq!(fs::read_to_string(backup).expect("read"), "{ not json");
    }

    #[test]
    fn test_should_not_leave_temp_files_behind() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let target = tmp.path().join("out.json");

        write_atomic(&target, b"[]").expect("write");
        write_atomic(&target, b"[1]").expect("overwrite");

        let names: Vec<_> = fs::read_dir(tmp.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.json")]);
        assert_eq!(fs::read_to_string(target).expect("read"), "[1]");
    }

    #[test]
    fn test_should_treat_missing_prefix_data_as_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        assert_eq!(storage(tmp.path()).load_prefixes(), PrefixDirectory::default());
    }
}
