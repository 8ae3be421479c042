use std::path::{Path, PathBuf};

/// Directory the package builder writes its output into.
pub const OUTPUT_DIR: &str = "deb_dist";

/// Canonical file name of the built package: `<name>_<version>-<revision>_all.deb`.
pub fn expected_artifact_name(name: &str, version: &str, revision: u32) -> String {
    format!("{name}_{version}-{revision}_all.deb")
}

pub fn expected_artifact_path(
    project_dir: &Path,
    name: &str,
    version: &str,
    revision: u32,
) -> PathBuf {
    project_dir
        .join(OUTPUT_DIR)
        .join(expected_artifact_name(name, version, revision))
}
