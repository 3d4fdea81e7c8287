use std::{error, fmt};

/// Unified error type
///
/// Selection problems are reported with the name the caller used so the
/// message can be shown to the user as-is. Per-point misses (no candidate
/// inside the distance cutoff) are not errors; those points are skipped
/// by the transfer loop.
#[derive(Debug)]
pub enum SkError {
    NoSourceSelected,
    NoTargetSelected,
    ObjectNotFound(String),
    SourceNotSurface(String),
    TargetNotStroke(String),
    WeightEditUnsupported,
    AttributeMissing(String),
    PoseCountMismatch {
        frame: i32,
        expected: usize,
        actual: usize,
    },
    SerdeYamlError(Box<serde_yaml::Error>),
    StdIoError(std::io::Error),
}

impl error::Error for SkError {}

impl fmt::Display for SkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoSourceSelected => write!(f, "no source surface selected"),
            Self::NoTargetSelected => write!(f, "no target object selected"),
            Self::ObjectNotFound(name) => {
                write!(f, "object \"{name}\" not found in scene")
            }
            Self::SourceNotSurface(name) => {
                write!(f, "source \"{name}\" must be a surface object")
            }
            Self::TargetNotStroke(name) => {
                write!(f, "target \"{name}\" must be a stroke object")
            }
            Self::WeightEditUnsupported => {
                write!(f, "target does not support per-point weight writes")
            }
            Self::AttributeMissing(name) => {
                write!(f, "attribute \"{name}\" not found on drawing")
            }
            Self::PoseCountMismatch {
                frame,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "pose for frame {frame} has {actual} positions, \
                     surface has {expected} vertices"
                )
            }
            Self::SerdeYamlError(e) => {
                write!(f, "serde_yaml::Error: {e}")
            }
            Self::StdIoError(e) => write!(f, "std::io::Error: {}", e.kind()),
        }
    }
}

impl From<serde_yaml::Error> for SkError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::SerdeYamlError(Box::new(e))
    }
}

impl From<std::io::Error> for SkError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}
