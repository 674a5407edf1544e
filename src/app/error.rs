use std::path::PathBuf;
use thiserror::Error;

/// Failures that end the whole run. Anything per-file is a skip, not one of these.
#[derive(Debug, Error)]
pub enum ReclinkError {
    #[error("source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    #[error("target is not a directory: {}", .0.display())]
    TargetNotDirectory(PathBuf),
    #[error("source and target directory can not be the same: {}", .0.display())]
    SameRoots(PathBuf),
    #[error("invalid presets file {}: {message}", path.display())]
    InvalidPresets { path: PathBuf, message: String },
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("confirmation was not given")]
    ConfirmationDeclined,
    #[error("symbolic links are not supported on this platform")]
    UnsupportedPlatform,
}

impl ReclinkError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ReclinkError::SourceNotDirectory(_)
            | ReclinkError::TargetNotDirectory(_)
            | ReclinkError::SameRoots(_)
            | ReclinkError::InvalidPresets { .. }
            | ReclinkError::UnknownPreset(_) => 2,
            ReclinkError::ConfirmationDeclined | ReclinkError::UnsupportedPlatform => 1,
        }
    }
}
