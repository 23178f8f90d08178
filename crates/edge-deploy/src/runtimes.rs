//! Runtime tables and artifact sentinels
//!
//! The runtime map resolves a file extension to the platform kind that runs it:
//! first extension -> runtime identifier (`js` -> `nodejs`), then identifier ->
//! default versioned kind (`nodejs` -> `nodejs:10`). Built once at startup and
//! shared read-only.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RuntimeConfigError;

/// Extension that marks an artifact as a zip archive
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Extension that marks a compiled-class artifact
pub const COMPILED_CLASS_EXTENSION: &str = "jar";

/// Kind used for container image actions
pub const BLACKBOX_KIND: &str = "blackbox";

/// Base image used when a container action ships its code as an archive
pub const DEFAULT_BLACKBOX_IMAGE: &str = "openwhisk/dockerskeleton";

/// Runtime identifier of the JVM family
pub const JVM_RUNTIME: &str = "java";

const BUILTIN_EXTENSIONS: &[(&str, &str)] = &[
    ("js", "nodejs"),
    ("py", "python"),
    ("jar", "java"),
    ("swift", "swift"),
    ("php", "php"),
    ("rb", "ruby"),
    ("go", "go"),
];

const BUILTIN_DEFAULTS: &[(&str, &str)] = &[
    ("nodejs", "nodejs:10"),
    ("python", "python:3"),
    ("java", "java:8"),
    ("swift", "swift:4.2"),
    ("php", "php:7.3"),
    ("ruby", "ruby:2.5"),
    ("go", "go:1.11"),
];

/// How an artifact's extension affects resolution
///
/// Derived from a single extension, so an artifact is never both an archive
/// and a compiled-class file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactClass {
    Archive,
    CompiledClass,
    Source,
}

impl ArtifactClass {
    /// Classify an extension (no leading dot). Matching is case-sensitive.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            ARCHIVE_EXTENSION => ArtifactClass::Archive,
            COMPILED_CLASS_EXTENSION => ArtifactClass::CompiledClass,
            _ => ArtifactClass::Source,
        }
    }

    pub fn is_archive(self) -> bool {
        self == ArtifactClass::Archive
    }
}

/// Whether a kind belongs to the JVM family and needs an explicit entry point
pub fn is_jvm_kind(kind: &str) -> bool {
    kind == JVM_RUNTIME
        || kind
            .strip_prefix(JVM_RUNTIME)
            .is_some_and(|rest| rest.starts_with(':'))
}

/// Immutable extension and default-kind tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeMap {
    /// File extension (no leading dot) -> runtime identifier
    #[serde(default)]
    extensions: HashMap<String, String>,

    /// Runtime identifier -> default fully-qualified kind
    #[serde(default)]
    defaults: HashMap<String, String>,
}

impl RuntimeMap {
    /// Build a map from explicit tables
    pub fn new(extensions: HashMap<String, String>, defaults: HashMap<String, String>) -> Self {
        Self {
            extensions,
            defaults,
        }
    }

    /// The tables shipped with the tool
    pub fn builtin() -> Self {
        let collect = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        Self::new(collect(BUILTIN_EXTENSIONS), collect(BUILTIN_DEFAULTS))
    }

    /// Parse tables from JSON: `{"extensions": {...}, "defaults": {...}}`
    pub fn from_json(json: &str) -> Result<Self, RuntimeConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tables from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RuntimeConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Runtime identifier registered for an extension
    pub fn runtime_for_extension(&self, ext: &str) -> Option<&str> {
        self.extensions.get(ext).map(String::as_str)
    }

    /// Default kind registered for a runtime identifier
    pub fn default_kind(&self, runtime: &str) -> Option<&str> {
        self.defaults.get(runtime).map(String::as_str)
    }

    /// Two-stage lookup: extension -> runtime -> default kind
    pub fn kind_for_extension(&self, ext: &str) -> Option<&str> {
        self.runtime_for_extension(ext)
            .and_then(|runtime| self.default_kind(runtime))
    }

    /// Extensions known to the map
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }
}

impl Default for RuntimeMap {
    fn default() -> Self {
        Self::builtin()
    }
}
