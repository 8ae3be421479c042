use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tera::Context;
use tracing::debug;
use walkdir::WalkDir;

use crate::catalog::{self, FileKind};
use crate::error::{PsaError, Result};
use crate::metadata::validate_name;
use crate::platform::Platform;
use crate::render::file::render_path_component;
use crate::sync::extract;

/// An existing project directory whose name and platform have been recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub name: String,
    pub platform: Platform,
}

impl ProjectLayout {
    /// Recognize a scaffold on disk.
    ///
    /// The name comes from the build script (falling back to the directory name);
    /// the platform comes from the desktop entry.
    pub fn detect(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(not_a_project(dir, "directory does not exist"));
        }

        let build_script = dir.join(file_name_for(FileKind::BuildScript, "")?);
        let text = std::fs::read_to_string(&build_script)
            .map_err(|_| not_a_project(dir, "missing or unreadable setup.py"))?;

        let name = match extract::project_name(&text) {
            Some(name) => name,
            None => directory_name(dir)?,
        };
        validate_name(&name)
            .map_err(|_| not_a_project(dir, &format!("'{name}' is not a valid project name")))?;

        let platform = detect_platform(dir, &name)?;
        let layout = Self {
            root: dir.to_path_buf(),
            name,
            platform,
        };

        for spec in catalog::metadata_files_for(platform) {
            let path = layout.path_of(spec.kind)?;
            if !path.is_file() {
                let missing = path.strip_prefix(dir).unwrap_or(&path);
                return Err(not_a_project(
                    dir,
                    &format!("missing {}", missing.display()),
                ));
            }
        }

        debug!(name = %layout.name, platform = %layout.platform, "detected project");
        Ok(layout)
    }

    /// Absolute path of the catalog file of `kind` inside this project.
    pub fn path_of(&self, kind: FileKind) -> Result<PathBuf> {
        Ok(self.root.join(file_name_for(kind, &self.name)?))
    }
}

/// Relative path of the catalog file of `kind` for a project called `name`.
pub fn file_name_for(kind: FileKind, name: &str) -> Result<PathBuf> {
    let spec = catalog::spec_for(kind).ok_or_else(|| PsaError::InvalidField {
        field: "kind".into(),
        reason: format!("no catalog entry for {kind:?}"),
    })?;
    let mut context = Context::new();
    context.insert("name", name);
    Ok(PathBuf::from(render_path_component(spec.path, &context)?))
}

/// The desktop entry's launch lines decide; the harmattan-only packaging files
/// are consulted only when the entry carries neither.
fn detect_platform(dir: &Path, name: &str) -> Result<Platform> {
    let desktop_entry = dir.join(file_name_for(FileKind::DesktopEntry, name)?);
    if let Ok(text) = std::fs::read_to_string(&desktop_entry) {
        if let Some(platform) = extract::platform(&text) {
            return Ok(platform);
        }
    }

    for kind in [FileKind::Installer, FileKind::LongDescription] {
        if dir.join(file_name_for(kind, name)?).exists() {
            return Ok(Platform::Harmattan);
        }
    }
    Ok(Platform::Fremantle)
}

fn directory_name(dir: &Path) -> Result<String> {
    let canonical = dir.canonicalize().map_err(|e| PsaError::Io {
        context: format!("resolving {}", dir.display()),
        source: e,
    })?;
    canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| not_a_project(dir, "cannot determine the project name"))
}

fn not_a_project(dir: &Path, reason: &str) -> PsaError {
    PsaError::NotAProject {
        path: dir.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// All regular files under `dir`, relative to it, skipping build output.
pub fn collect_files(dir: &Path) -> Result<BTreeSet<PathBuf>> {
    let mut files = BTreeSet::new();
    if !dir.exists() {
        return Ok(files);
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name() != "deb_dist")
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() {
            if let Ok(rel) = entry.path().strip_prefix(dir) {
                files.insert(rel.to_path_buf());
            }
        }
    }

    Ok(files)
}
