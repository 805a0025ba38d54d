use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        profile,
        json,
        command,
        ..
    } = cli;

    let ctx = AppContext::bootstrap(&profile, json)?;
    tracing::debug!(profile = %ctx.profile, base_url = %ctx.site.base(), "context ready");

    match command {
        Command::Lookup(args) => commands::lookup::run(&ctx, args).await,
        Command::Resolve(args) => commands::resolve::run(&ctx, args).await,
        Command::Fetch(args) => commands::fetch::run(&ctx, args).await,
        Command::Config(args) => commands::config::run(&ctx, args.command),
    }
}
