use std::path::Path;

use console::style;
use miette::{IntoDiagnostic, Result};
use psa::project::collect_files;
use psa::{expected_artifact_name, reconstruct};

pub fn run(path: String, json: bool) -> Result<()> {
    let project = reconstruct(Path::new(&path))?;
    let meta = &project.metadata;
    let artifact = expected_artifact_name(&meta.name, &meta.version, meta.revision);
    let files = collect_files(&project.layout.root)?;

    if json {
        let value = serde_json::json!({
            "metadata": meta,
            "artifact": artifact,
            "defaulted": project.defaulted,
            "files": files,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&value).into_diagnostic()?
        );
        return Ok(());
    }

    println!("  Name: {}", style(&meta.name).cyan());
    println!("  Platform: {}", meta.platform);
    println!("  Section: user/{}", meta.section);
    println!("  App name: {}", meta.app_name);
    println!("  Category: {}", meta.category);
    println!("  Description: {}", meta.description);
    println!("  Version: {}-{}", meta.version, meta.revision);
    println!("  Package: deb_dist/{}", artifact);

    if !project.defaulted.is_empty() {
        println!("\n{}", style("Defaulted:").yellow().bold());
        for field in &project.defaulted {
            println!("  {} {}", style("⚠").yellow(), field);
        }
    }

    println!("\n{}", style("Files:").bold());
    for f in &files {
        println!("  {}", f.display());
    }

    Ok(())
}
