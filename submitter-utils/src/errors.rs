use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SubmitterError {
    #[error("in pod starting mode, the program must be run with: --{flag}={hint}")]
    Configuration { flag: &'static str, hint: &'static str },
    #[error(
        "couldn't find lab {lab} in {}, please make sure it is the same name as this notebook name",
        .path.display()
    )]
    LabNotFound { lab: String, path: PathBuf },
    #[error("invalid entry for lab {lab}: {source}")]
    InvalidLab {
        lab: String,
        source: serde_yaml::Error,
    },
    #[error("submitter answered {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML decoding error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid submitter URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Coarse classification reported to notebooks alongside the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    LabNotFound,
    Rejected,
    Unhandled,
}

impl SubmitterError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> SubmitterError {
        SubmitterError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmitterError::Configuration { .. } => ErrorKind::Configuration,
            SubmitterError::LabNotFound { .. } => ErrorKind::LabNotFound,
            SubmitterError::Rejected { .. } => ErrorKind::Rejected,
            _ => ErrorKind::Unhandled,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::LabNotFound => "lab_not_found",
            ErrorKind::Rejected => "rejected",
            ErrorKind::Unhandled => "unhandled",
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
