use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::artifact::expected_artifact_path;
use crate::config::DEFAULT_BUILD_COMMAND;
use crate::error::{PsaError, Result};
use crate::sync::reconstruct;

/// Options for the `build_deb` operation.
pub struct BuildOptions {
    /// Shell command run in the project directory. Defaults to the stdeb invocation.
    pub command: Option<String>,
}

/// Run the external package builder and check it produced the expected `.deb`.
pub fn build_deb(project_dir: &Path, options: &BuildOptions) -> Result<PathBuf> {
    let project = reconstruct(project_dir)?;
    let metadata = &project.metadata;
    let command = options.command.as_deref().unwrap_or(DEFAULT_BUILD_COMMAND);

    info!(command, project = %project_dir.display(), "running package builder");
    let status = std::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(project_dir)
        .status()
        .map_err(|e| PsaError::BuildFailed {
            message: format!("failed to execute '{command}': {e}"),
        })?;

    if !status.success() {
        return Err(PsaError::BuildFailed {
            message: format!("'{command}' exited with status {status}"),
        });
    }

    let artifact = expected_artifact_path(
        project_dir,
        &metadata.name,
        &metadata.version,
        metadata.revision,
    );
    debug!(artifact = %artifact.display(), "checking build output");
    if !artifact.is_file() {
        return Err(PsaError::ArtifactMissing { path: artifact });
    }

    Ok(artifact)
}
