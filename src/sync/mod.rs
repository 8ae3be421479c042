pub mod diff;
pub mod extract;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::{self, FileKind};
use crate::error::{PsaError, Result};
use crate::metadata::{MetadataUpdate, ProjectMetadata};
use crate::project::ProjectLayout;
use crate::render::{plan_render, write_atomic};

/// Metadata recovered from an existing project.
pub struct Reconstructed {
    pub layout: ProjectLayout,
    pub metadata: ProjectMetadata,
    /// Fields whose marker line was missing or empty, so the default was used.
    pub defaulted: Vec<&'static str>,
}

/// A metadata-bearing file whose content would change.
pub struct FileChange {
    pub relative_path: PathBuf,
    pub old: String,
    pub new: String,
}

/// The outcome of an update computed in memory.
pub struct UpdatePlan {
    pub layout: ProjectLayout,
    pub before: ProjectMetadata,
    pub after: ProjectMetadata,
    pub changes: Vec<FileChange>,
    pub unchanged: Vec<PathBuf>,
    pub defaulted: Vec<&'static str>,
}

/// Report of what happened during an update.
#[derive(Debug)]
pub struct UpdateReport {
    pub metadata: ProjectMetadata,
    pub files_updated: Vec<PathBuf>,
    pub files_unchanged: Vec<PathBuf>,
    pub defaulted: Vec<&'static str>,
}

impl UpdateReport {
    pub fn has_changes(&self) -> bool {
        !self.files_updated.is_empty()
    }
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated, {} unchanged",
            self.files_updated.len(),
            self.files_unchanged.len(),
        )
    }
}

/// Rebuild a project's metadata by reading its metadata-bearing files.
pub fn reconstruct(project_dir: &Path) -> Result<Reconstructed> {
    let layout = ProjectLayout::detect(project_dir)?;
    let mut metadata = ProjectMetadata::new(&layout.name, layout.platform);
    let mut defaulted = Vec::new();

    let control = read_text(&layout.path_of(FileKind::ControlFile)?)?;
    let desktop = read_text(&layout.path_of(FileKind::DesktopEntry)?)?;
    let build_script = read_text(&layout.path_of(FileKind::BuildScript)?)?;

    match extract::section(&control).filter(|v| !v.is_empty()) {
        Some(section) => metadata.section = section,
        None => defaulted.push("section"),
    }
    match extract::app_name(&desktop).filter(|v| !v.is_empty()) {
        Some(app_name) => metadata.app_name = app_name,
        None => defaulted.push("app-name"),
    }
    match extract::category(&desktop).filter(|v| !v.is_empty()) {
        Some(category) => metadata.category = category,
        None => defaulted.push("category"),
    }
    match extract::description(&build_script) {
        Some(description) => metadata.description = description,
        None => defaulted.push("description"),
    }
    match extract::version(&build_script).filter(|v| !v.is_empty()) {
        Some(version) => metadata.version = version,
        None => defaulted.push("version"),
    }
    match extract::revision(&control) {
        Some(revision) => metadata.revision = revision,
        None => defaulted.push("revision"),
    }

    for field in &defaulted {
        info!(field, project = %project_dir.display(), "field not found, using default");
    }

    Ok(Reconstructed {
        layout,
        metadata,
        defaulted,
    })
}

/// Compute the effect of `update` without writing anything.
///
/// An empty update changes nothing, not even files whose boilerplate was edited by hand.
pub fn plan_update(project_dir: &Path, update: &MetadataUpdate) -> Result<UpdatePlan> {
    update.validate()?;

    let Reconstructed {
        layout,
        metadata: before,
        defaulted,
    } = reconstruct(project_dir)?;

    let mut after = before.clone();
    after.apply(update);

    let mut changes = Vec::new();
    let mut unchanged = Vec::new();

    let plan = plan_render(catalog::metadata_files_for(layout.platform), &after)?;
    for file in plan.files {
        let path = layout.root.join(&file.relative_path);
        let old = read_text(&path)?;
        let new = String::from_utf8_lossy(&file.content).into_owned();

        if update.is_empty() || old == new {
            unchanged.push(file.relative_path);
        } else {
            changes.push(FileChange {
                relative_path: file.relative_path,
                old,
                new,
            });
        }
    }

    Ok(UpdatePlan {
        layout,
        before,
        after,
        changes,
        unchanged,
        defaulted,
    })
}

/// Merge `update` over the project's current metadata and re-render its
/// metadata-bearing files in place.
///
/// Each file is replaced atomically, but the set of files is not: a failure
/// part-way leaves earlier files already rewritten.
pub fn update(project_dir: &Path, update: &MetadataUpdate) -> Result<UpdateReport> {
    let plan = plan_update(project_dir, update)?;
    let mut files_updated = Vec::new();

    for change in &plan.changes {
        let path = plan.layout.root.join(&change.relative_path);
        write_atomic(&path, change.new.as_bytes())?;
        debug!(path = %path.display(), "synchronized");
        files_updated.push(change.relative_path.clone());
    }

    Ok(UpdateReport {
        metadata: plan.after,
        files_updated,
        files_unchanged: plan.unchanged,
        defaulted: plan.defaulted,
    })
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| PsaError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::render::execute_plan;

    fn scaffold(dir: &Path, meta: &ProjectMetadata) -> PathBuf {
        let root = dir.join(&meta.name);
        let plan = plan_render(catalog::files_for(meta.platform), meta).unwrap();
        execute_plan(&plan, &root).unwrap();
        root
    }

    fn read(root: &Path, rel: &str) -> String {
        std::fs::read_to_string(root.join(rel)).unwrap()
    }

    #[test]
    fn reconstruct_fresh_project_uses_scaffold_values() {
        let dir = tempfile::tempdir().unwrap();
        let meta = ProjectMetadata::new("demo", Platform::Harmattan);
        let root = scaffold(dir.path(), &meta);

        let rebuilt = reconstruct(&root).unwrap();
        assert_eq!(rebuilt.metadata, meta);
        assert!(rebuilt.defaulted.is_empty());
    }

    #[test]
    fn reconstruct_falls_back_to_defaults_for_missing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut meta = ProjectMetadata::new("demo", Platform::Fremantle);
        meta.section = "games".into();
        let root = scaffold(dir.path(), &meta);
        std::fs::write(root.join("stdeb.cfg"), "[DEFAULT]\nPackage: demo\n").unwrap();

        let rebuilt = reconstruct(&root).unwrap();
        assert_eq!(rebuilt.metadata.section, "utils");
        assert_eq!(rebuilt.metadata.revision, 1);
        assert_eq!(rebuilt.defaulted, vec!["section", "revision"]);
    }

    #[test]
    fn update_rewrites_only_affected_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = scaffold(dir.path(), &ProjectMetadata::new("demo", Platform::Harmattan));
        let readme_before = read(&root, "README.assistant");

        let report = update(
            &root,
            &MetadataUpdate {
                category: Some("Game".into()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(report.files_updated, vec![PathBuf::from("demo.desktop")]);
        assert_eq!(report.files_unchanged.len(), 2);
        assert!(read(&root, "demo.desktop").contains("Categories=Game;\n"));
        assert_eq!(read(&root, "README.assistant"), readme_before);
    }

    #[test]
    fn empty_update_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = scaffold(dir.path(), &ProjectMetadata::new("demo", Platform::Fremantle));
        let edited = format!("# hand edit\n{}", read(&root, "setup.py"));
        std::fs::write(root.join("setup.py"), &edited).unwrap();

        let report = update(&root, &MetadataUpdate::default()).unwrap();

        assert!(!report.has_changes());
        assert_eq!(read(&root, "setup.py"), edited);
    }

    #[test]
    fn invalid_update_is_rejected_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let err = update(
            dir.path(),
            &MetadataUpdate {
                section: Some(String::new()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, PsaError::InvalidField { field, .. } if field == "section"));
    }

    #[test]
    fn update_outside_project_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = update(
            dir.path(),
            &MetadataUpdate {
                section: Some("games".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, PsaError::NotAProject { .. }));
    }

    #[test]
    fn plan_update_shows_changes_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let root = scaffold(dir.path(), &ProjectMetadata::new("demo", Platform::Fremantle));
        let before = read(&root, "stdeb.cfg");

        let plan = plan_update(
            &root,
            &MetadataUpdate {
                section: Some("games".into()),
                app_name: Some("Demo".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let changed: Vec<_> = plan.changes.iter().map(|c| c.relative_path.clone()).collect();
        assert_eq!(
            changed,
            vec![PathBuf::from("stdeb.cfg"), PathBuf::from("demo.desktop")]
        );
        assert_eq!(plan.after.section, "games");
        assert_eq!(plan.before.section, "utils");
        assert_eq!(read(&root, "stdeb.cfg"), before);
    }
}
