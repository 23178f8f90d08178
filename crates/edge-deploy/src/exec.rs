//! Artifact to executable resolution
//!
//! Turns an artifact (source file, archive, compiled-class file or container
//! image reference) into the descriptor the platform invokes:
//!
//! 1. read the payload unless the artifact is a plain image reference
//! 2. pick the kind: explicit, `blackbox` for images, else by extension
//! 3. set the image for container artifacts
//! 4. drop the payload of compiled-class artifacts
//! 5. validate kind and entry point
//! 6. base64-encode archive payloads

use std::sync::Arc;

use edge_deploy_sdk::ExecutableDescriptor;

use crate::content::ContentSource;
use crate::error::{ExecError, MissingKind};
use crate::runtimes::{
    is_jvm_kind, ArtifactClass, RuntimeMap, BLACKBOX_KIND, DEFAULT_BLACKBOX_IMAGE,
};

/// Input to a single resolution
#[derive(Debug, Clone, Default)]
pub struct ExecRequest {
    /// Path or URL of the artifact, or an image reference
    pub artifact: String,
    /// Explicit kind; empty means infer
    pub kind: String,
    /// Treat the artifact as a container image
    pub container_image: bool,
    /// Fully-qualified entry point; empty means none
    pub main: String,
}

impl ExecRequest {
    pub fn new(artifact: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn container_image(mut self, container_image: bool) -> Self {
        self.container_image = container_image;
        self
    }

    pub fn main(mut self, main: impl Into<String>) -> Self {
        self.main = main.into();
        self
    }
}

/// Extension of an artifact path without the leading dot
///
/// Taken from the last `/`-separated segment; empty when there is none.
pub fn artifact_extension(artifact: &str) -> &str {
    let name = artifact
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(artifact);
    name.rfind('.').map(|i| &name[i + 1..]).unwrap_or("")
}

/// Resolves artifacts against a fixed runtime map
pub struct ExecResolver {
    runtimes: Arc<RuntimeMap>,
    content: ContentSource,
}

impl ExecResolver {
    pub fn new(runtimes: Arc<RuntimeMap>, content: ContentSource) -> Self {
        Self { runtimes, content }
    }

    /// Resolve an artifact into an executable descriptor
    pub fn resolve(&self, request: &ExecRequest) -> Result<ExecutableDescriptor, ExecError> {
        let ext = artifact_extension(&request.artifact);
        let class = ArtifactClass::from_extension(ext);
        let mut exec = ExecutableDescriptor::default();

        // A plain image reference has no file behind it
        let mut payload = if !request.container_image || class.is_archive() {
            Some(self.content.fetch(&request.artifact)?)
        } else {
            None
        };

        exec.kind = if !request.kind.is_empty() {
            request.kind.clone()
        } else if class.is_archive() {
            // Archives never infer a kind, even for container images
            String::new()
        } else if request.container_image {
            BLACKBOX_KIND.to_string()
        } else {
            self.runtimes
                .kind_for_extension(ext)
                .unwrap_or_default()
                .to_string()
        };

        if request.container_image {
            exec.image = Some(if class.is_archive() {
                DEFAULT_BLACKBOX_IMAGE.to_string()
            } else {
                request.artifact.clone()
            });
        }

        if class == ArtifactClass::CompiledClass {
            payload = None;
        }

        if exec.kind.is_empty() {
            let missing = if class.is_archive() {
                MissingKind::ArchiveRequiresKind
            } else {
                MissingKind::UnsupportedExtension(ext.to_string())
            };
            return Err(missing.into());
        }

        if !request.main.is_empty() {
            exec.main = Some(request.main.clone());
        } else if is_jvm_kind(&exec.kind) {
            return Err(ExecError::MissingEntryPoint {
                kind: exec.kind,
            });
        }

        if let Some(payload) = payload {
            if class.is_archive() {
                exec.set_binary_code(&payload);
            } else {
                exec.code = Some(String::from_utf8_lossy(&payload).into_owned());
            }
        }

        tracing::debug!(
            "Resolved {} as kind={} image={:?} main={:?}",
            request.artifact,
            exec.kind,
            exec.image,
            exec.main
        );
        Ok(exec)
    }
}
