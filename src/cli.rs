use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "onefc",
    version,
    about = "Resolve ONE Championship athletes into multilingual profiles"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "Settings profile to use"
    )]
    pub profile: String,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve and fetch a batch of athletes
    Lookup(LookupArgs),
    /// Find the canonical profile url for one athlete
    Resolve(ResolveArgs),
    /// Fetch every locale of one profile url
    Fetch(FetchArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    #[arg(help = "Names, slugs or profile urls; commas and newlines also separate entries")]
    pub entries: Vec<String>,
    #[arg(long, help = "Read entries from file")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Read entries from stdin")]
    pub stdin: bool,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[arg(required = true, num_args = 1.., help = "Athlete name, slug or profile url")]
    pub query: Vec<String>,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[arg(help = "Canonical profile url")]
    pub url: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings
    Show,
    /// Write the default settings to the profile file
    Init(ConfigInitArgs),
}

#[derive(Debug, Args)]
pub struct ConfigInitArgs {
    #[arg(long, help = "Overwrite an existing profile file")]
    pub force: bool,
}
