//! Edge Deploy - artifact resolution and packaging for serverless actions
//!
//! - [`exec`] resolves an artifact into an [`ExecutableDescriptor`]
//! - [`archive`] zips a source tree for upload
//! - [`content`] reads artifact bytes from disk or over HTTP

pub mod archive;
pub mod config;
pub mod content;
pub mod error;
pub mod exec;
pub mod project;
pub mod runtimes;

pub use archive::ArchiveRequest;
pub use config::DeployConfig;
pub use content::{ContentSource, HttpTransport, ReqwestTransport};
pub use edge_deploy_sdk::ExecutableDescriptor;
pub use error::{ContentError, ExecError, MissingKind, PackagingError};
pub use exec::{ExecRequest, ExecResolver};
pub use runtimes::RuntimeMap;
