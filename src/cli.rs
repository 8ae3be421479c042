use clap::{Args, Parser, Subcommand};
use psa::MetadataUpdate;

#[derive(Parser)]
#[command(
    name = "psa",
    about = "Create PySide projects for Harmattan and Fremantle and keep their packaging metadata in sync",
    version
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project directory
    Init {
        /// Project name, also used for the directory and package name
        name: String,

        /// Target platform: harmattan or fremantle
        platform: String,

        #[command(flatten)]
        fields: MetadataArgs,

        /// Show the files that would be created without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Change packaging metadata of an existing project
    Update {
        #[command(flatten)]
        fields: MetadataArgs,

        /// Path to the project (default: current directory)
        #[arg(long, default_value = ".")]
        path: String,

        /// Show the resulting changes as a diff without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Build the Debian package into deb_dist/
    BuildDeb {
        /// Path to the project (default: current directory)
        #[arg(long, default_value = ".")]
        path: String,

        /// Builder command to run instead of the configured one
        #[arg(long)]
        command: Option<String>,
    },

    /// Show the metadata of an existing project
    Info {
        /// Path to the project (default: current directory)
        #[arg(long, default_value = ".")]
        path: String,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct MetadataArgs {
    /// Package section, written as user/<SECTION>
    #[arg(short, long)]
    pub section: Option<String>,

    /// Display name shown in the application launcher
    #[arg(short, long = "app-name")]
    pub app_name: Option<String>,

    /// Desktop entry category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Package description
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<MetadataArgs> for MetadataUpdate {
    fn from(args: MetadataArgs) -> Self {
        MetadataUpdate {
            section: args.section,
            app_name: args.app_name,
            category: args.category,
            description: args.description,
        }
    }
}
