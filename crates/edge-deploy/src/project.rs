//! Project directory helpers

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Manifest file names, in lookup order
pub const MANIFEST_FILE_NAMES: &[&str] = &["manifest.yaml", "manifest.yml"];

/// Deployment file names, in lookup order
pub const DEPLOYMENT_FILE_NAMES: &[&str] = &["deployment.yaml", "deployment.yml"];

fn first_existing(project: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| project.join(name))
        .find(|path| path.exists())
}

/// Manifest file in `project`, if any
pub fn manifest_file_path<P: AsRef<Path>>(project: P) -> Option<PathBuf> {
    first_existing(project.as_ref(), MANIFEST_FILE_NAMES)
}

/// Deployment file in `project`, if any
pub fn deployment_file_path<P: AsRef<Path>>(project: P) -> Option<PathBuf> {
    first_existing(project.as_ref(), DEPLOYMENT_FILE_NAMES)
}

/// Home directory of the current user
pub fn home_directory() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Pretty-printed JSON for any serializable value
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_manifest_prefers_yaml() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(manifest_file_path(dir.path()), None);

        fs::write(dir.path().join("manifest.yml"), "packages: {}").unwrap();
        assert_eq!(manifest_file_path(dir.path()), Some(dir.path().join("manifest.yml")));

        fs::write(dir.path().join("manifest.yaml"), "packages: {}").unwrap();
        assert_eq!(manifest_file_path(dir.path()), Some(dir.path().join("manifest.yaml")));
    }

    #[test]
    fn test_deployment_file_path() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(deployment_file_path(dir.path()), None);

        fs::write(dir.path().join("deployment.yml"), "application: {}").unwrap();
        assert_eq!(
            deployment_file_path(dir.path()),
            Some(dir.path().join("deployment.yml"))
        );
    }

    #[test]
    fn test_pretty_json() {
        let exec = edge_deploy_sdk::ExecutableDescriptor::new("nodejs:10");
        assert_eq!(pretty_json(&exec).unwrap(), "{\n  \"kind\": \"nodejs:10\"\n}");
    }
}
