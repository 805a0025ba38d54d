use crate::cli::ResolveArgs;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(ctx: &AppContext, args: ResolveArgs) -> AppResult<()> {
    let query = args.query.join(" ");
    let resolved = ctx.resolver().resolve(&query).await;

    let text = match &resolved {
        Some(profile) => format!("{} ({})", profile.canonical_url, profile.slug),
        None => format!("no profile found for `{}`", query.trim()),
    };
    ctx.output.emit(&text, &resolved)
}
