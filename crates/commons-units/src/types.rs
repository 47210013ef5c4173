//! Domain types for projects, units, and files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use commons_core::DEFAULT_LANGUAGE;

/// A file persisted in the remote store, owned by exactly one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub language: String,
    pub name: String,
    /// Storage location, `<dir>/<name>`.
    pub path: String,
    pub quality: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A language-specific project thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub id: String,
    pub language: String,
    pub path: String,
}

/// One language's file bundle within a project.
///
/// Invariant: a unit with zero files is invalid and must be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub language: String,
    pub files: Vec<StoredFile>,
    pub tag_ids: Vec<String>,
    pub thumbnail: Option<Thumbnail>,
}

impl Unit {
    pub fn has_file(&self, file_id: &str) -> bool {
        self.files.iter().any(|f| f.id == file_id)
    }

    pub fn find_file(&self, file_id: &str) -> Option<&StoredFile> {
        self.files.iter().find(|f| f.id == file_id)
    }
}

/// Authoritative project state fetched from the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub id: String,
    pub title: String,
    pub units: Vec<Unit>,
    pub thumbnails: Vec<Thumbnail>,
    pub tag_ids: Vec<String>,
}

impl ProjectSnapshot {
    /// The unit holding files of `language`, if any. A project has at most
    /// one unit per distinct language.
    pub fn unit_for_language(&self, language: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.language == language)
    }

    /// The unit a persisted file currently belongs to.
    pub fn owning_unit(&self, file_id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.has_file(file_id))
    }

    /// All files across all units.
    pub fn all_files(&self) -> impl Iterator<Item = &StoredFile> {
        self.units.iter().flat_map(|u| u.files.iter())
    }

    /// Best-effort thumbnail for a language: the language's own thumbnail,
    /// falling back to the English one. Documented fallback policy.
    pub fn language_thumbnail(&self, language: &str) -> Option<&Thumbnail> {
        self.thumbnails
            .iter()
            .find(|t| t.language == language)
            .or_else(|| {
                self.thumbnails
                    .iter()
                    .find(|t| t.language == DEFAULT_LANGUAGE)
            })
    }
}

/// A file selected for upload: no id until the remote create succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFile {
    pub name: String,
    pub language: String,
    pub quality: Option<String>,
}

/// An uploaded file ready to be created in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFile {
    pub name: String,
    pub language: String,
    pub quality: Option<String>,
    /// Storage location returned by the upload transport.
    pub path: String,
}

/// Seed data for creating a unit: project title, language, inherited tags,
/// the initial file group, and the best-effort thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDraft {
    pub title: String,
    pub language: String,
    pub tag_ids: Vec<String>,
    pub files: Vec<NewFile>,
    pub thumbnail: Option<Thumbnail>,
}

/// An edit to a pre-existing persisted file. A changed `language` forces
/// reassignment to a different (possibly newly created) unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpdate {
    pub id: String,
    pub language: String,
    pub quality: Option<String>,
}

/// One save batch from the project editor.
///
/// `updates` lists every surviving pre-existing file (modified or not) —
/// together with `pending` it is the intended post-save file set, which
/// also drives empty-unit deletion. `remove` lists files to delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveRequest {
    pub updates: Vec<FileUpdate>,
    pub pending: Vec<PendingFile>,
    /// Ids of persisted files to delete.
    pub remove: Vec<String>,
}

/// Per-file result from the upload transport. `Ok` carries the stored path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub name: String,
    pub result: Result<String, String>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{ProjectSnapshot, StoredFile, Thumbnail, Unit};

    fn file(id: &str, language: &str) -> StoredFile {
        StoredFile {
            id: id.to_string(),
            language: language.to_string(),
            name: format!("{id}.mp4"),
            path: format!("projects/p1/{id}.mp4"),
            quality: None,
            created_at: Utc::now(),
        }
    }

    fn thumbnail(language: &str) -> Thumbnail {
        Thumbnail {
            id: format!("tn-{language}"),
            language: language.to_string(),
            path: format!("projects/p1/tn-{language}.jpg"),
        }
    }

    fn project() -> ProjectSnapshot {
        ProjectSnapshot {
            id: "p1".to_string(),
            title: "Test Project".to_string(),
            units: vec![Unit {
                id: "u-en".to_string(),
                language: "en-us".to_string(),
                files: vec![file("f1", "en-us")],
                tag_ids: vec![],
                thumbnail: None,
            }],
            thumbnails: vec![thumbnail("en-us")],
            tag_ids: vec!["t1".to_string()],
        }
    }

    #[test]
    fn owning_unit_finds_the_unit_holding_a_file() {
        let project = project();
        assert_eq!(
            project.owning_unit("f1").map(|u| u.id.as_str()),
            Some("u-en")
        );
        assert!(project.owning_unit("missing").is_none());
    }

    #[test]
    fn language_thumbnail_falls_back_to_english() {
        let project = project();
        assert_eq!(
            project.language_thumbnail("fr-fr").map(|t| t.id.as_str()),
            Some("tn-en-us")
        );
        assert_eq!(
            project.language_thumbnail("en-us").map(|t| t.id.as_str()),
            Some("tn-en-us")
        );
    }

    #[test]
    fn language_thumbnail_is_none_without_any_match() {
        let mut project = project();
        project.thumbnails.clear();
        assert!(project.language_thumbnail("fr-fr").is_none());
    }
}
