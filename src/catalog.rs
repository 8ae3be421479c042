//! The fixed set of files each platform variant must produce.

use crate::error::Result;
use crate::platform::Platform;

/// The role a generated file plays in the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    BuildScript,
    ControlFile,
    DesktopEntry,
    Manifest,
    Launcher,
    Readme,
    Icon,
    MainUi,
    PageUi,
    Installer,
    LongDescription,
}

#[derive(Debug)]
pub enum FileContent {
    /// Tera source rendered against the project metadata.
    Template(&'static str),
    /// Bytes copied verbatim.
    Binary(&'static [u8]),
}

#[derive(Debug)]
pub struct TemplateFileSpec {
    /// Path relative to the project root; may reference `{{ name }}`.
    pub path: &'static str,
    pub kind: FileKind,
    pub content: FileContent,
    /// Metadata-bearing files are re-rendered by `update`; the rest are written once.
    pub metadata_bearing: bool,
    pub executable: bool,
    pub platforms: &'static [Platform],
}

impl TemplateFileSpec {
    pub fn includes(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

const ALL: &[Platform] = &Platform::ALL;
const HARMATTAN: &[Platform] = &[Platform::Harmattan];

pub static CATALOG: &[TemplateFileSpec] = &[
    TemplateFileSpec {
        path: "setup.py",
        kind: FileKind::BuildScript,
        content: FileContent::Template(include_str!("../templates/setup.py.tera")),
        metadata_bearing: true,
        executable: false,
        platforms: ALL,
    },
    TemplateFileSpec {
        path: "stdeb.cfg",
        kind: FileKind::ControlFile,
        content: FileContent::Template(include_str!("../templates/stdeb.cfg.tera")),
        metadata_bearing: true,
        executable: false,
        platforms: ALL,
    },
    TemplateFileSpec {
        path: "{{ name }}.desktop",
        kind: FileKind::DesktopEntry,
        content: FileContent::Template(include_str!("../templates/desktop.tera")),
        metadata_bearing: true,
        executable: false,
        platforms: ALL,
    },
    TemplateFileSpec {
        path: "MANIFEST.in",
        kind: FileKind::Manifest,
        content: FileContent::Template(include_str!("../templates/MANIFEST.in.tera")),
        metadata_bearing: false,
        executable: false,
        platforms: ALL,
    },
    TemplateFileSpec {
        path: "{{ name }}",
        kind: FileKind::Launcher,
        content: FileContent::Template(include_str!("../templates/launcher.tera")),
        metadata_bearing: false,
        executable: true,
        platforms: ALL,
    },
    TemplateFileSpec {
        path: "README.assistant",
        kind: FileKind::Readme,
        content: FileContent::Template(include_str!("../templates/README.assistant.tera")),
        metadata_bearing: false,
        executable: false,
        platforms: ALL,
    },
    TemplateFileSpec {
        path: "{{ name }}.png",
        kind: FileKind::Icon,
        content: FileContent::Binary(include_bytes!("../templates/icon.png")),
        metadata_bearing: false,
        executable: false,
        platforms: ALL,
    },
    TemplateFileSpec {
        path: "qml/main.qml",
        kind: FileKind::MainUi,
        content: FileContent::Template(include_str!("../templates/qml/main.qml.tera")),
        metadata_bearing: false,
        executable: false,
        platforms: ALL,
    },
    TemplateFileSpec {
        path: "qml/MainPage.qml",
        kind: FileKind::PageUi,
        content: FileContent::Template(include_str!("../templates/qml/MainPage.qml.tera")),
        metadata_bearing: false,
        executable: false,
        platforms: HARMATTAN,
    },
    TemplateFileSpec {
        path: "{{ name }}.aegis",
        kind: FileKind::Installer,
        content: FileContent::Template(include_str!("../templates/aegis.tera")),
        metadata_bearing: false,
        executable: false,
        platforms: HARMATTAN,
    },
    TemplateFileSpec {
        path: "{{ name }}.longdesc",
        kind: FileKind::LongDescription,
        content: FileContent::Template(include_str!("../templates/longdesc.tera")),
        metadata_bearing: false,
        executable: false,
        platforms: HARMATTAN,
    },
];

/// All files a project on `platform` consists of, in catalog order.
pub fn files_for(platform: Platform) -> impl Iterator<Item = &'static TemplateFileSpec> {
    CATALOG.iter().filter(move |spec| spec.includes(platform))
}

/// The subset of `files_for` that `update` re-renders.
pub fn metadata_files_for(platform: Platform) -> impl Iterator<Item = &'static TemplateFileSpec> {
    files_for(platform).filter(|spec| spec.metadata_bearing)
}

/// Resolve a platform by name and return its files.
pub fn lookup(platform: &str) -> Result<Vec<&'static TemplateFileSpec>> {
    let platform = platform.parse::<Platform>()?;
    Ok(files_for(platform).collect())
}

pub fn spec_for(kind: FileKind) -> Option<&'static TemplateFileSpec> {
    CATALOG.iter().find(|spec| spec.kind == kind)
}
