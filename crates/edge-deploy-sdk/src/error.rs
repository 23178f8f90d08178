//! Error types for reading executable descriptors

use thiserror::Error;

/// Errors that can occur when decoding a descriptor payload
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Descriptor has no code payload")]
    MissingCode,

    #[error("Descriptor payload is not marked as binary")]
    NotBinary,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

impl DescriptorError {
    /// Stable identifier for localized messages
    pub fn message_id(&self) -> &'static str {
        match self {
            DescriptorError::MissingCode => "msg_err_descriptor_missing_code",
            DescriptorError::NotBinary => "msg_err_descriptor_not_binary",
            DescriptorError::InvalidBase64(_) => "msg_err_descriptor_invalid_base64",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_differ() {
        let missing = DescriptorError::MissingCode;
        let not_binary = DescriptorError::NotBinary;
        let invalid = DescriptorError::from(base64::DecodeError::InvalidLength(3));

        assert_ne!(missing.message_id(), not_binary.message_id());
        assert_ne!(not_binary.message_id(), invalid.message_id());
        assert_eq!(invalid.message_id(), "msg_err_descriptor_invalid_base64");
    }
}
