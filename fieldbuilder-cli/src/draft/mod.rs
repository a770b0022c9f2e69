//! Durable persistence for the in-progress field draft.
//!
//! One JSON file per user profile, overwritten on every edit and removed on
//! successful submission. Corruption is never fatal: a draft that fails to
//! parse is logged and treated as absent.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::form::FieldDraft;

const DRAFT_FILE: &str = "draft.json";

#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    /// Store rooted at an explicit file path. Tests use this with a temp dir.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the user config directory (`fieldbuilder/draft.json`).
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("fieldbuilder");
        Ok(Self {
            path: dir.join(DRAFT_FILE),
        })
    }

    /// Read the saved draft. Missing file and malformed content both resolve
    /// to `None`; a parse failure is logged so corruption stays diagnosable.
    pub fn load(&self) -> Option<FieldDraft> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(err) => {
                log::warn!(
                    "discarding unreadable draft at {}: {err}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Serialize and overwrite the draft unconditionally.
    pub fn save(&self, draft: &FieldDraft) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string(draft)?;
        fs::write(&self.path, raw).with_context(|| format!("writing {}", self.path.display()))
    }

    /// Remove the persisted draft. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{FieldType, SelectType};

    fn store_in(dir: &tempfile::TempDir) -> DraftStore {
        DraftStore::at(dir.path().join("draft.json"))
    }

    #[test]
    fn load_returns_none_when_nothing_saved() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_none());
    }

    #[test]
    fn saved_draft_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let draft = FieldDraft {
            field_type: Some(FieldType::Select),
            label: "Priority".into(),
            select_type: Some(SelectType::MultiSelect),
            is_value_required: true,
            options: vec!["Low".into(), "High".into()],
            ..FieldDraft::default()
        };
        store.save(&draft).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, draft);
    }

    #[test]
    fn malformed_content_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(dir.path().join("draft.json"), "{not json at all").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn partial_record_fills_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            dir.path().join("draft.json"),
            r#"{"label": "Carried over", "options": ["A"]}"#,
        )
        .unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.label, "Carried over");
        assert_eq!(loaded.options, vec!["A".to_string()]);
        assert!(loaded.field_type.is_none());
        assert!(!loaded.is_value_required);
    }

    #[test]
    fn clear_removes_the_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&FieldDraft::default()).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }
}
