pub mod artifact;
pub mod build;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod platform;
pub mod project;
pub mod render;
pub mod scaffold;
pub mod sync;

pub use artifact::expected_artifact_name;
pub use error::{PsaError, Result};
pub use metadata::{MetadataUpdate, ProjectMetadata};
pub use platform::Platform;
pub use scaffold::{init, InitOptions};
pub use sync::{reconstruct, update};
