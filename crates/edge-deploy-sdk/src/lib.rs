//! Edge Deploy SDK - Types shared between the deploy tooling and platform clients
//!
//! This crate provides the executable descriptor that describes how the
//! platform should run an action, plus the errors produced when reading one back.

pub mod exec;
pub mod error;

pub mod prelude {
    //! Common imports for code that builds or consumes descriptors
    pub use crate::exec::ExecutableDescriptor;
    pub use crate::error::DescriptorError;
    pub use serde::{Deserialize, Serialize};
}

// Re-export key types at crate root
pub use exec::ExecutableDescriptor;
pub use error::DescriptorError;
