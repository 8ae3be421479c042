use std::path::Path;

use console::style;
use miette::Result;
use psa::sync::{diff::unified_diff, plan_update, update};
use psa::MetadataUpdate;

pub fn run(path: String, fields: MetadataUpdate, dry_run: bool) -> Result<()> {
    let project_path = Path::new(&path);

    if dry_run {
        let plan = plan_update(project_path, &fields)?;
        warn_defaulted(&plan.defaulted);

        if plan.changes.is_empty() {
            println!("{} Nothing to change", style("✓").green().bold());
            return Ok(());
        }
        for change in &plan.changes {
            print!(
                "{}",
                unified_diff(&change.old, &change.new, &change.relative_path)
            );
        }
        println!(
            "\n{} Dry run: no files written.",
            style("\u{2139}").blue().bold()
        );
        return Ok(());
    }

    let report = update(project_path, &fields)?;
    warn_defaulted(&report.defaulted);

    if fields.is_empty() {
        println!(
            "{} No fields given; nothing to update",
            style("\u{2139}").blue().bold()
        );
        return Ok(());
    }

    if !report.has_changes() {
        println!(
            "{} Project metadata is already up to date",
            style("✓").green().bold()
        );
        return Ok(());
    }

    println!(
        "{} Update complete: {}",
        style("✓").green().bold(),
        report
    );
    for f in &report.files_updated {
        println!("  {} {}", style("↻").cyan(), f.display());
    }

    Ok(())
}

fn warn_defaulted(fields: &[&str]) {
    if fields.is_empty() {
        return;
    }
    eprintln!(
        "{} {} not found in the project files; using defaults",
        style("warning:").yellow().bold(),
        style(fields.join(", ")).yellow()
    );
}
