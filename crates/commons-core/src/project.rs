//! Project types and their upload extension allow-lists.

use serde::{Deserialize, Serialize};

/// The kind of content project being edited. Determines which file
/// extensions the editor accepts for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectType {
    VideoProject,
    Package,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VideoProject => "videoProject",
            Self::Package => "package",
        }
    }

    /// Extensions accepted for upload into this project type.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::VideoProject => &[".mov", ".mp4"],
            Self::Package => &[".doc", ".docx", ".pdf"],
        }
    }

    /// Whether a file name carries an accepted extension for this type.
    pub fn allows(self, file_name: &str) -> bool {
        match file_ext(file_name) {
            Some(ext) => self
                .allowed_extensions()
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&ext)),
            None => false,
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the extension of a file name, dot included, lowercased.
/// Returns `None` for names without an extension (no dot, or trailing dot).
pub fn file_ext(name: &str) -> Option<String> {
    let idx = name.rfind('.')?;
    let ext = &name[idx..];
    if ext.len() < 2 {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{file_ext, ProjectType};

    #[test]
    fn file_ext_lowercases_and_keeps_dot() {
        assert_eq!(file_ext("clip.MP4"), Some(".mp4".to_string()));
        assert_eq!(file_ext("report.final.PDF"), Some(".pdf".to_string()));
    }

    #[test]
    fn file_ext_rejects_missing_or_empty_extension() {
        assert_eq!(file_ext("README"), None);
        assert_eq!(file_ext("trailing."), None);
    }

    #[test]
    fn video_projects_accept_only_video_extensions() {
        assert!(ProjectType::VideoProject.allows("intro.mov"));
        assert!(ProjectType::VideoProject.allows("intro.MP4"));
        assert!(!ProjectType::VideoProject.allows("notes.pdf"));
        assert!(!ProjectType::VideoProject.allows("no_extension"));
    }

    #[test]
    fn packages_accept_document_extensions() {
        assert!(ProjectType::Package.allows("briefing.docx"));
        assert!(ProjectType::Package.allows("briefing.pdf"));
        assert!(!ProjectType::Package.allows("briefing.mp4"));
    }
}
