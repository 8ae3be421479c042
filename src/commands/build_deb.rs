use std::path::Path;

use console::style;
use miette::Result;
use psa::build::{build_deb, BuildOptions};
use psa::config::load_user_config;

pub fn run(path: String, command: Option<String>) -> Result<()> {
    let command = match command {
        Some(command) => command,
        None => load_user_config()?
            .unwrap_or_default()
            .build_command()
            .to_string(),
    };

    println!(
        "{} Building package with `{}`",
        style("...").cyan().bold(),
        style(&command).dim()
    );

    let artifact = build_deb(
        Path::new(&path),
        &BuildOptions {
            command: Some(command),
        },
    )?;

    println!(
        "\n{} Package built: {}",
        style("✓").green().bold(),
        style(artifact.display()).cyan()
    );

    Ok(())
}
