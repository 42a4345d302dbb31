// Crate-wide error type.
// Everything here is a startup misconfiguration; the per-tick path never fails.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    /// An action named in the detector config has no binding in the input map.
    #[error("input action '{0}' is not bound")]
    MissingAction(String),

    #[error("detection radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),

    #[error("wall tag must not be empty")]
    EmptyTag,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

pub type Result<T, E = ProbeError> = std::result::Result<T, E>;
