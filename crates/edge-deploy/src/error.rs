//! Error types for artifact resolution and packaging
//!
//! Every error carries a stable message identifier so a localization layer can
//! swap in translated text. The `Display` output is the default English message.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Artifact bytes could not be acquired
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl ContentError {
    pub fn message_id(&self) -> &'static str {
        match self {
            ContentError::Io { .. } => "msg_err_content_read_local",
            ContentError::Http { .. } => "msg_err_content_fetch_url",
            ContentError::Status { .. } => "msg_err_content_http_status",
        }
    }
}

/// No runtime kind could be determined for an artifact
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissingKind {
    #[error("creating an action from a .zip artifact requires specifying the action kind explicitly")]
    ArchiveRequiresKind,

    #[error("'{0}' is not a supported action runtime")]
    UnsupportedExtension(String),
}

/// Errors produced while resolving an artifact into an executable descriptor
#[derive(Error, Debug)]
pub enum ExecError {
    #[error(transparent)]
    ContentUnavailable(#[from] ContentError),

    #[error(transparent)]
    MissingKind(#[from] MissingKind),

    #[error("{kind} actions require --main to specify the fully-qualified name of the main class")]
    MissingEntryPoint { kind: String },
}

impl ExecError {
    pub fn message_id(&self) -> &'static str {
        match self {
            ExecError::ContentUnavailable(e) => e.message_id(),
            ExecError::MissingKind(MissingKind::ArchiveRequiresKind) => "msg_err_zip_requires_kind",
            ExecError::MissingKind(MissingKind::UnsupportedExtension(_)) => {
                "msg_err_unsupported_runtime"
            }
            ExecError::MissingEntryPoint { .. } => "msg_err_java_requires_main",
        }
    }
}

/// Archive creation failed; the destination file must be treated as garbage
#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("Failed to create archive {}: {source}", path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to archive {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File name is not valid UTF-8: {}", path.display())]
    NonUtf8Name { path: PathBuf },

    #[error("Failed to write archive: {0}")]
    Write(#[from] zip::result::ZipError),
}

impl PackagingError {
    pub fn message_id(&self) -> &'static str {
        match self {
            PackagingError::CreateDestination { .. } => "msg_err_zip_create",
            PackagingError::Walk(_) => "msg_err_zip_walk",
            PackagingError::Io { .. } => "msg_err_zip_read_entry",
            PackagingError::NonUtf8Name { .. } => "msg_err_zip_entry_name",
            PackagingError::Write(_) => "msg_err_zip_write",
        }
    }
}

/// A runtime table file could not be loaded
#[derive(Error, Debug)]
pub enum RuntimeConfigError {
    #[error("Failed to read runtimes file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid runtimes file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RuntimeConfigError {
    pub fn message_id(&self) -> &'static str {
        match self {
            RuntimeConfigError::Read { .. } => "msg_err_runtimes_read",
            RuntimeConfigError::Parse(_) => "msg_err_runtimes_parse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_kind_messages_differ() {
        let archive = ExecError::from(MissingKind::ArchiveRequiresKind);
        let unsupported = ExecError::from(MissingKind::UnsupportedExtension("txt".to_string()));

        assert_ne!(archive.to_string(), unsupported.to_string());
        assert_ne!(archive.message_id(), unsupported.message_id());
        assert!(unsupported.to_string().contains("'txt'"));
    }

    #[test]
    fn test_content_error_message_id_passes_through() {
        let err = ExecError::from(ContentError::Status {
            url: "https://example.com/a.js".to_string(),
            status: 404,
        });
        assert_eq!(err.message_id(), "msg_err_content_http_status");
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_runtime_config_message_ids() {
        let read = RuntimeConfigError::Read {
            path: PathBuf::from("runtimes.json"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let parse = RuntimeConfigError::from(serde_json::from_str::<u8>("nope").unwrap_err());

        assert_eq!(read.message_id(), "msg_err_runtimes_read");
        assert_eq!(parse.message_id(), "msg_err_runtimes_parse");
        assert!(read.to_string().contains("runtimes.json"));
    }
}
