use serde::Serialize;

use crate::cli::ConfigCommand;
use crate::config::{self, Settings};
use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
struct ConfigView {
    profile: String,
    path: String,
    settings: Settings,
}

pub fn run(ctx: &AppContext, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => {
            let path = ctx.paths.settings_file(&ctx.profile);
            let view = ConfigView {
                profile: ctx.profile.clone(),
                path: path.display().to_string(),
                settings: ctx.settings.effective(),
            };
            let text = format!(
                "{} ({})\n{}",
                view.profile,
                view.path,
                serde_json::to_string_pretty(&view.settings)?
            );
            ctx.output.emit(&text, &view)
        }
        ConfigCommand::Init(args) => {
            let (path, settings) = config::init_settings(&ctx.paths, &ctx.profile, args.force)?;
            let view = ConfigView {
                profile: ctx.profile.clone(),
                path: path.display().to_string(),
                settings,
            };
            let text = format!("{}: wrote {}", view.profile, view.path);
            ctx.output.emit(&text, &view)
        }
    }
}
