#![forbid(unsafe_code)]
//! Flat-file document store for quill.
//!
//! Three independent JSON documents under one data directory: the posts
//! list, the ads list, and the settings object. Loads self-heal: a missing
//! or unparseable document is replaced with its default and persisted
//! immediately, and the repair pass fixes malformed list records before a
//! caller ever sees them. Saves rewrite the whole document; there is no
//! locking, so concurrent writers race and the last save wins. That is the
//! documented contract for the single-admin deployment this serves.

mod collection;
mod error;
mod repair;

pub use collection::Collection;
pub use error::{Result, StoreError};

use quill_model::Settings;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const POSTS_FILE: &str = "posts.json";
pub const ADS_FILE: &str = "ads.json";
pub const SETTINGS_FILE: &str = "settings.json";

pub struct DocumentStore {
    data_dir: PathBuf,
}

impl DocumentStore {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Startup hook: create the data directory and seed any missing
    /// document with its default so first requests find valid files.
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        for (file, default) in [
            (POSTS_FILE, Value::Array(Vec::new())),
            (ADS_FILE, Value::Array(Vec::new())),
            (SETTINGS_FILE, serde_json::to_value(Settings::default())?),
        ] {
            if !self.path(file).exists() {
                self.write_doc(file, &default)?;
            }
        }
        Ok(())
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn write_doc(&self, file: &str, doc: &Value) -> Result<()> {
        let body = serde_json::to_string_pretty(doc)?;
        fs::write(self.path(file), body)?;
        Ok(())
    }

    /// Pure read half of the self-healing load: yields the parsed document,
    /// or the default with `repaired = true` when the file is absent or not
    /// valid JSON. Persisting the repair is the caller's explicit step.
    fn load_or_default(&self, file: &str, default: Value) -> Result<(Value, bool)> {
        let path = self.path(file);
        if !path.exists() {
            return Ok((default, true));
        }
        let body = fs::read_to_string(&path)?;
        match serde_json::from_str(&body) {
            Ok(value) => Ok((value, false)),
            Err(_) => Ok((default, true)),
        }
    }

    fn load_list(&self, file: &str, normalize: fn(&mut [Value]) -> bool) -> Result<Collection> {
        let (value, mut repaired) = self.load_or_default(file, Value::Array(Vec::new()))?;
        let mut records = match value {
            Value::Array(records) => records,
            // Valid JSON of the wrong shape counts as corrupt.
            _ => {
                repaired = true;
                Vec::new()
            }
        };
        let changed = normalize(&mut records);
        if repaired || changed {
            self.write_doc(file, &Value::Array(records.clone()))?;
        }
        Ok(Collection::from_records(records))
    }

    pub fn load_posts(&self) -> Result<Collection> {
        self.load_list(POSTS_FILE, repair::normalize_posts)
    }

    pub fn save_posts(&self, posts: &Collection) -> Result<()> {
        self.write_doc(POSTS_FILE, &posts.to_value())
    }

    pub fn load_ads(&self) -> Result<Collection> {
        self.load_list(ADS_FILE, repair::normalize_ads)
    }

    pub fn save_ads(&self, ads: &Collection) -> Result<()> {
        self.write_doc(ADS_FILE, &ads.to_value())
    }

    /// Settings must be a single object; a list-shaped or otherwise
    /// malformed document is replaced with the documented default and
    /// persisted.
    pub fn load_settings(&self) -> Result<Settings> {
        let (value, repaired) =
            self.load_or_default(SETTINGS_FILE, serde_json::to_value(Settings::default())?)?;
        match serde_json::from_value::<Settings>(value) {
            Ok(settings) => {
                if repaired {
                    self.save_settings(&settings)?;
                }
                Ok(settings)
            }
            Err(_) => {
                let settings = Settings::default();
                self.save_settings(&settings)?;
                Ok(settings)
            }
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write_doc(SETTINGS_FILE, &serde_json::to_value(settings)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> DocumentStore {
        DocumentStore::new(dir.path())
    }

    #[test]
    fn missing_posts_file_loads_empty_and_is_created() {
        let dir = tempdir().expect("tempdir");
        let store = store_in(&dir);
        let posts = store.load_posts().expect("load posts");
        assert!(posts.is_empty());
        let on_disk = fs::read_to_string(dir.path().join(POSTS_FILE)).expect("posts file");
        assert_eq!(on_disk.trim(), "[]");
    }

    #[test]
    fn corrupt_posts_file_is_replaced_with_default() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(POSTS_FILE), "{not json").expect("seed corrupt file");
        let store = store_in(&dir);
        let posts = store.load_posts().expect("load posts");
        assert!(posts.is_empty());
        let healed: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(POSTS_FILE)).expect("read"))
                .expect("healed file parses");
        assert_eq!(healed, json!([]));
    }

    #[test]
    fn object_shaped_posts_document_is_treated_as_corrupt() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(POSTS_FILE), r#"{"id": 1}"#).expect("seed wrong shape");
        let store = store_in(&dir);
        assert!(store.load_posts().expect("load posts").is_empty());
    }

    #[test]
    fn bare_string_entry_is_normalized_and_persisted() {
        let dir = tempdir().expect("tempdir");
        fs::write(
            dir.path().join(POSTS_FILE),
            r#"[{"id": 1, "title": "a", "content": ""}, {"id": 2, "title": "b", "content": ""}, "hello"]"#,
        )
        .expect("seed legacy file");
        let store = store_in(&dir);
        let posts = store.load_posts().expect("load posts");
        assert_eq!(
            posts.records()[2],
            json!({"id": 3, "title": "hello", "content": ""})
        );

        // The correction was written back, so a second load has nothing to fix.
        let on_disk: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(POSTS_FILE)).expect("read"))
                .expect("parse");
        assert_eq!(on_disk[2], json!({"id": 3, "title": "hello", "content": ""}));
    }

    #[test]
    fn list_shaped_settings_resets_to_default_and_persists() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(SETTINGS_FILE), "[1, 2, 3]").expect("seed list settings");
        let store = store_in(&dir);
        let settings = store.load_settings().expect("load settings");
        assert_eq!(settings, Settings::default());
        let on_disk: Settings = serde_json::from_str(
            &fs::read_to_string(dir.path().join(SETTINGS_FILE)).expect("read"),
        )
        .expect("parse");
        assert_eq!(on_disk, Settings::default());
    }

    #[test]
    fn settings_round_trip_preserves_fields() {
        let dir = tempdir().expect("tempdir");
        let store = store_in(&dir);
        let settings = Settings {
            title: "Field Notes".to_string(),
            description: "daily".to_string(),
            password: "s3cret".to_string(),
        };
        store.save_settings(&settings).expect("save settings");
        assert_eq!(store.load_settings().expect("load settings"), settings);
    }

    #[test]
    fn save_then_load_posts_round_trips_raw_records() {
        let dir = tempdir().expect("tempdir");
        let store = store_in(&dir);
        let mut posts = store.load_posts().expect("load posts");
        posts.push(json!({"id": 1, "title": "A", "content": "B"}));
        store.save_posts(&posts).expect("save posts");
        let reloaded = store.load_posts().expect("reload posts");
        assert_eq!(
            reloaded.records()[0],
            json!({"id": 1, "title": "A", "content": "B"})
        );
    }

    #[test]
    fn assigned_ids_stay_unique_across_create_and_delete() {
        let dir = tempdir().expect("tempdir");
        let store = store_in(&dir);
        let mut posts = store.load_posts().expect("load posts");
        for title in ["a", "b", "c"] {
            let id = posts.next_id();
            posts.push(json!({"id": id, "title": title, "content": ""}));
        }
        assert!(posts.remove(2));
        // Id 2 is never reused: the allocator only moves forward.
        let id = posts.next_id();
        assert_eq!(id, 4);
        posts.push(json!({"id": id, "title": "d", "content": ""}));
        store.save_posts(&posts).expect("save posts");

        let reloaded = store.load_posts().expect("reload posts");
        let mut ids: Vec<i64> = reloaded
            .records()
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 3, 4]);
        assert!(ids.iter().all(|id| *id >= 1));
    }

    #[test]
    fn ensure_layout_seeds_all_three_documents() {
        let dir = tempdir().expect("tempdir");
        let root = dir.path().join("nested").join("data");
        let store = DocumentStore::new(&root);
        store.ensure_layout().expect("ensure layout");
        for file in [POSTS_FILE, ADS_FILE, SETTINGS_FILE] {
            assert!(root.join(file).exists(), "{file} missing");
        }
        // Seeding is not destructive on a second run.
        store.save_settings(&Settings {
            password: "kept".to_string(),
            ..Settings::default()
        })
        .expect("save settings");
        store.ensure_layout().expect("ensure layout again");
        assert_eq!(store.load_settings().expect("load").password, "kept");
    }
}
