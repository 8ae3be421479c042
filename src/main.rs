mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    psa::logging::init(cli.verbose);

    match cli.command {
        Commands::Init {
            name,
            platform,
            fields,
            dry_run,
        } => commands::init::run(name, platform, fields.into(), dry_run),
        Commands::Update {
            fields,
            path,
            dry_run,
        } => commands::update::run(path, fields.into(), dry_run),
        Commands::BuildDeb { path, command } => commands::build_deb::run(path, command),
        Commands::Info { path, json } => commands::info::run(path, json),
    }
}
