#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PsaError {
    #[error("Unknown platform: {platform}")]
    #[diagnostic(help("Supported platforms are 'harmattan' and 'fremantle'"))]
    UnknownPlatform { platform: String },

    #[error("Project directory already exists: {path}")]
    #[diagnostic(help("Choose another project name or remove the existing directory"))]
    AlreadyExists { path: PathBuf },

    #[error("Not a psa project: {path} ({reason})")]
    #[diagnostic(help("Run this command inside a directory created with `psa init`"))]
    NotAProject { path: PathBuf, reason: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Failed to write {path}")]
    PartialWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Template rendering failed for {file}")]
    #[diagnostic(help("This is a bug in the bundled templates"))]
    RenderError {
        file: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to render filename: {filename}")]
    FilenameRenderError {
        filename: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to parse user config {path}")]
    #[diagnostic(help("Check the TOML syntax in your psa config file"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Package build failed: {message}")]
    #[diagnostic(help("Make sure python-stdeb and the Debian build tools are installed"))]
    BuildFailed { message: String },

    #[error("Expected package was not produced: {path}")]
    #[diagnostic(help("The builder finished but did not write the expected .deb file"))]
    ArtifactMissing { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, PsaError>;
