use crate::sk_error::SkError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which pose of the source surface the transfer evaluates against
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PoseMode {
    /// Rest pose for every stroke frame. Stroke point positions are left
    /// alone.
    Current,
    /// The surface pose at each stroke frame's number. Stroke points are
    /// shifted so they ride along with the deformed surface.
    Frames,
}

/// Nearest-reference search strategy
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Weight of the nearest source vertex. Faster.
    Vertex,
    /// Weight averaged over the vertices of the nearest face. Slower.
    Face,
}

/// User-facing transfer configuration
///
/// `source` and `target` name objects in the scene. `max_distance` is the
/// search cutoff in world units; 0 disables the cutoff entirely. Defaults
/// match what the host panel presents: nothing selected, no cutoff,
/// rest-pose evaluation, vertex search.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct TransferSettings {
    pub source: Option<String>,
    pub target: Option<String>,
    pub max_distance: f32,
    pub mode: PoseMode,
    pub nearest: SearchMode,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            source: None,
            target: None,
            max_distance: 0.0f32,
            mode: PoseMode::Current,
            nearest: SearchMode::Vertex,
        }
    }
}

impl TransferSettings {
    /// Parses settings from a YAML document
    ///
    /// # Errors
    /// May return `SkError`
    pub fn from_yaml(text: &str) -> Result<Self, SkError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads settings from a YAML file
    ///
    /// # Errors
    /// May return `SkError`
    pub fn load(path: &Path) -> Result<Self, SkError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::{PoseMode, SearchMode, TransferSettings};

    #[test]
    fn from_yaml() {
        let settings = TransferSettings::from_yaml(
            "source: Body\n\
             target: Outline\n\
             max_distance: 0.5\n\
             mode: Frames\n\
             nearest: Face\n",
        )
        .unwrap();
        assert_eq!(settings.source.as_deref(), Some("Body"));
        assert_eq!(settings.target.as_deref(), Some("Outline"));
        assert!((settings.max_distance - 0.5f32).abs() < f32::EPSILON);
        assert_eq!(settings.mode, PoseMode::Frames);
        assert_eq!(settings.nearest, SearchMode::Face);
    }

    #[test]
    fn defaults() {
        let settings = TransferSettings::default();
        assert!(settings.source.is_none());
        assert!(settings.target.is_none());
        assert!(settings.max_distance.abs() < f32::EPSILON);
        assert_eq!(settings.mode, PoseMode::Current);
        assert_eq!(settings.nearest, SearchMode::Vertex);
    }
}
