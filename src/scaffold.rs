use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog;
use crate::error::{PsaError, Result};
use crate::metadata::{validate_name, MetadataUpdate, ProjectMetadata};
use crate::platform::Platform;
use crate::render::{execute_plan, plan_render, GeneratedProject, GenerationPlan};

/// Options for the `init` operation.
pub struct InitOptions {
    /// Directory the project directory is created in.
    pub directory: PathBuf,
    pub name: String,
    /// Platform name as given by the user; parsed during planning.
    pub platform: String,
    /// Field values given on the command line.
    pub overrides: MetadataUpdate,
    /// Field values from the user config, applied before `overrides`.
    pub defaults: MetadataUpdate,
}

/// A project that has been rendered in memory but not yet written.
pub struct ScaffoldPlan {
    pub target: PathBuf,
    pub metadata: ProjectMetadata,
    pub render_plan: GenerationPlan,
}

/// Validate the request and render every file of the platform in memory.
pub fn plan_init(options: &InitOptions) -> Result<ScaffoldPlan> {
    let platform: Platform = options.platform.parse()?;
    validate_name(&options.name)?;
    options.defaults.validate()?;
    options.overrides.validate()?;

    let target = options.directory.join(&options.name);
    if target.symlink_metadata().is_ok() {
        return Err(PsaError::AlreadyExists { path: target });
    }

    let mut metadata = ProjectMetadata::new(&options.name, platform);
    metadata.apply(&options.defaults);
    metadata.apply(&options.overrides);

    let render_plan = plan_render(catalog::files_for(platform), &metadata)?;

    Ok(ScaffoldPlan {
        target,
        metadata,
        render_plan,
    })
}

/// Write a planned project.
///
/// Files go into a hidden staging directory beside the target, which is renamed
/// into place once everything is written. On any error the staging directory is
/// removed, so either the whole project exists or nothing does.
pub fn execute_init(plan: ScaffoldPlan) -> Result<GeneratedProject> {
    let parent = match plan.target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staging = tempfile::Builder::new()
        .prefix(".psa-")
        .tempdir_in(parent)
        .map_err(|e| PsaError::PartialWriteFailure {
            path: parent.to_path_buf(),
            source: e,
        })?;
    debug!(staging = %staging.path().display(), "writing project");

    let result = execute_plan(&plan.render_plan, staging.path())?;

    if plan.target.symlink_metadata().is_ok() {
        return Err(PsaError::AlreadyExists { path: plan.target });
    }
    publish_permissions(staging.path())?;
    std::fs::rename(staging.path(), &plan.target).map_err(|e| PsaError::PartialWriteFailure {
        path: plan.target.clone(),
        source: e,
    })?;

    info!(
        project = %plan.target.display(),
        platform = %plan.metadata.platform,
        "project created"
    );

    Ok(GeneratedProject {
        output_dir: plan.target,
        files_created: result.files_created,
        files_copied: result.files_copied,
    })
}

/// Create a new project: `directory/name` with every catalog file for the platform.
pub fn init(options: &InitOptions) -> Result<GeneratedProject> {
    let plan = plan_init(options)?;
    execute_init(plan)
}

#[cfg(unix)]
fn publish_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
        PsaError::PartialWriteFailure {
            path: dir.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(not(unix))]
fn publish_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}
