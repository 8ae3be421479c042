use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::{FileContent, FileKind, TemplateFileSpec};
use crate::error::{PsaError, Result};
use crate::metadata::ProjectMetadata;
use crate::render::context::build_context;
use crate::render::file::{render_file_content, render_path_component};

#[derive(Debug)]
pub struct GeneratedProject {
    pub output_dir: PathBuf,
    pub files_created: Vec<PathBuf>,
    pub files_copied: Vec<PathBuf>,
}

/// A file that would be created during generation.
pub struct PlannedFile {
    /// Path relative to the project directory.
    pub relative_path: PathBuf,
    pub kind: FileKind,
    /// The file content (rendered template or copied binary).
    pub content: Vec<u8>,
    /// Whether this file was copied verbatim (true) or rendered from a template (false).
    pub is_copy: bool,
    pub executable: bool,
}

/// The result of planning a generation without writing to disk.
pub struct GenerationPlan {
    pub files: Vec<PlannedFile>,
}

impl GenerationPlan {
    pub fn file(&self, kind: FileKind) -> Option<&PlannedFile> {
        self.files.iter().find(|f| f.kind == kind)
    }
}

/// Render catalog entries against `metadata` into memory without writing.
pub fn plan_render<'a>(
    specs: impl IntoIterator<Item = &'a TemplateFileSpec>,
    metadata: &ProjectMetadata,
) -> Result<GenerationPlan> {
    let context = build_context(metadata);
    let mut files = Vec::new();

    for spec in specs {
        let relative_path = PathBuf::from(render_path_component(spec.path, &context)?);
        let (content, is_copy) = match &spec.content {
            FileContent::Template(source) => (
                render_file_content(spec.path, source, &context)?.into_bytes(),
                false,
            ),
            FileContent::Binary(bytes) => (bytes.to_vec(), true),
        };
        debug!(path = %relative_path.display(), bytes = content.len(), "planned file");
        files.push(PlannedFile {
            relative_path,
            kind: spec.kind,
            content,
            is_copy,
            executable: spec.executable,
        });
    }

    Ok(GenerationPlan { files })
}

/// Write the files from a generation plan into a fresh directory.
pub fn execute_plan(plan: &GenerationPlan, output_dir: &Path) -> Result<GeneratedProject> {
    let mut files_created = Vec::new();
    let mut files_copied = Vec::new();

    for file in &plan.files {
        let dest_path = output_dir.join(&file.relative_path);
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PsaError::PartialWriteFailure {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&dest_path, &file.content).map_err(|e| PsaError::PartialWriteFailure {
            path: dest_path.clone(),
            source: e,
        })?;
        if file.executable {
            make_executable(&dest_path)?;
        }
        debug!(path = %dest_path.display(), "wrote file");

        if file.is_copy {
            files_copied.push(file.relative_path.clone());
        } else {
            files_created.push(file.relative_path.clone());
        }
    }

    Ok(GeneratedProject {
        output_dir: output_dir.to_path_buf(),
        files_created,
        files_copied,
    })
}

/// Replace `path` with `content` via a temp file in the same directory and a rename,
/// so readers see either the old or the new file. Existing permissions are kept.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let fail = |source: std::io::Error| PsaError::PartialWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".psa-")
        .tempfile_in(dir)
        .map_err(fail)?;
    tmp.write_all(content).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;

    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(fail)?;
    }

    tmp.persist(path).map_err(|e| fail(e.error))?;
    debug!(path = %path.display(), "replaced file");
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
        PsaError::PartialWriteFailure {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{files_for, metadata_files_for};
    use crate::platform::Platform;

    #[test]
    fn plan_renders_names_into_paths() {
        let meta = ProjectMetadata::new("demo", Platform::Harmattan);
        let plan = plan_render(files_for(Platform::Harmattan), &meta).unwrap();

        let paths: Vec<_> = plan
            .files
            .iter()
            .map(|f| f.relative_path.to_string_lossy().into_owned())
            .collect();
        assert!(paths.contains(&"demo.desktop".to_string()));
        assert!(paths.contains(&"demo.aegis".to_string()));
        assert!(paths.contains(&"demo".to_string()));
        assert!(paths.contains(&"qml/MainPage.qml".to_string()));
    }

    #[test]
    fn plan_copies_icon_verbatim() {
        let meta = ProjectMetadata::new("demo", Platform::Fremantle);
        let plan = plan_render(files_for(Platform::Fremantle), &meta).unwrap();

        let icon = plan.file(FileKind::Icon).unwrap();
        assert!(icon.is_copy);
        assert_eq!(&icon.content[..4], b"\x89PNG");
    }

    #[test]
    fn desktop_entry_differs_per_platform() {
        let harmattan = ProjectMetadata::new("demo", Platform::Harmattan);
        let fremantle = ProjectMetadata::new("demo", Platform::Fremantle);

        let h = plan_render(metadata_files_for(Platform::Harmattan), &harmattan).unwrap();
        let f = plan_render(metadata_files_for(Platform::Fremantle), &fremantle).unwrap();

        let h_desktop = String::from_utf8(h.file(FileKind::DesktopEntry).unwrap().content.clone()).unwrap();
        let f_desktop = String::from_utf8(f.file(FileKind::DesktopEntry).unwrap().content.clone()).unwrap();

        assert!(h_desktop.contains("Exec=invoker --single-instance --type=e /usr/bin/demo\n"));
        assert!(f_desktop.contains("X-Osso-Type=application/x-executable\n"));
        for text in [&h_desktop, &f_desktop] {
            assert!(text.contains("Name=demo\n"));
            assert!(text.ends_with("Categories=Application;\n"));
        }
    }

    #[test]
    fn execute_writes_tree_and_marks_launcher_executable() {
        let dir = tempfile::tempdir().unwrap();
        let meta = ProjectMetadata::new("demo", Platform::Harmattan);
        let plan = plan_render(files_for(Platform::Harmattan), &meta).unwrap();

        let result = execute_plan(&plan, dir.path()).unwrap();

        assert_eq!(result.files_copied, vec![PathBuf::from("demo.png")]);
        assert_eq!(result.files_created.len(), 10);
        assert!(dir.path().join("qml/main.qml").is_file());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(dir.path().join("demo"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[test]
    fn write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stdeb.cfg");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".psa-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("setup.py");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, b"new").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn write_atomic_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/stdeb.cfg");

        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, PsaError::PartialWriteFailure { path: p, .. } if p == path));
    }
}
