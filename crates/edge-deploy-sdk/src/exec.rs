//! Executable descriptor handed to the deployment client

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;

/// Describes what the platform runs when an action is invoked
///
/// Either `code` or `image` carries the payload. `code` is absent for
/// compiled-class artifacts and for pure container images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableDescriptor {
    /// Runtime kind (e.g. "nodejs:10", or "blackbox" for container images)
    pub kind: String,

    /// Inline payload: source text, or base64 when `binary` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Container image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Fully-qualified entry point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// Set when `code` is a base64-encoded archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<bool>,
}

impl ExecutableDescriptor {
    /// Create a descriptor with only a kind set
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Whether the code payload is base64-encoded binary
    pub fn is_binary(&self) -> bool {
        self.binary.unwrap_or(false)
    }

    /// Decode a binary payload back into raw bytes
    pub fn decode_code(&self) -> Result<Vec<u8>, DescriptorError> {
        if !self.is_binary() {
            return Err(DescriptorError::NotBinary);
        }
        let code = self.code.as_deref().ok_or(DescriptorError::MissingCode)?;
        Ok(STANDARD.decode(code)?)
    }

    /// Encode raw archive bytes as a binary payload
    pub fn set_binary_code(&mut self, bytes: &[u8]) {
        self.code = Some(STANDARD.encode(bytes));
        self.binary = Some(true);
    }
}
