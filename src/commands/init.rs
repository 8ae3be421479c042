use console::style;
use miette::Result;
use psa::config::load_user_config;
use psa::scaffold::{execute_init, plan_init, InitOptions};
use psa::MetadataUpdate;

pub fn run(name: String, platform: String, overrides: MetadataUpdate, dry_run: bool) -> Result<()> {
    let defaults = load_user_config()?
        .map(|config| config.defaults)
        .unwrap_or_default();

    let directory = std::env::current_dir()
        .map_err(|e| miette::miette!("failed to get current directory: {e}"))?;

    let options = InitOptions {
        directory,
        name,
        platform,
        overrides,
        defaults,
    };

    let plan = plan_init(&options)?;

    if dry_run {
        println!(
            "\n{} Dry run: files that would be generated in {}:",
            style("==>").cyan().bold(),
            style(plan.target.display()).cyan()
        );
        for file in &plan.render_plan.files {
            let action = if file.is_copy { "copy  " } else { "create" };
            println!("  {} {}", style(action).green(), file.relative_path.display());
        }
        println!(
            "\n{} Dry run: no files written.",
            style("\u{2139}").blue().bold()
        );
        return Ok(());
    }

    let platform = plan.metadata.platform;
    let result = execute_init(plan)?;

    println!(
        "\n{} {} project created at {}",
        style("✓").green().bold(),
        platform,
        style(result.output_dir.display()).cyan()
    );
    println!(
        "  {} files rendered, {} files copied",
        result.files_created.len(),
        result.files_copied.len()
    );

    Ok(())
}
