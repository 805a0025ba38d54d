use serde::Serialize;

use crate::athlete::batch::build_record;
use crate::athlete::{AthleteRecord, LocaleResults, ResolvedProfile, parse_name};
use crate::cli::FetchArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::site::urls::slug_from_url;

#[derive(Debug, Serialize)]
struct FetchView {
    url: String,
    locales: Vec<LocaleView>,
    record: Option<AthleteRecord>,
}

#[derive(Debug, Serialize)]
struct LocaleView {
    locale: String,
    ok: bool,
    raw_name: String,
    name: String,
    nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

pub async fn run(ctx: &AppContext, args: FetchArgs) -> AppResult<()> {
    let url = args.url.trim().to_string();
    let slug = slug_from_url(&url).ok_or_else(|| {
        AppError::InvalidInput(format!("`{url}` does not end in a profile slug"))
    })?;

    let results = ctx.fetcher().fetch(&url).await;
    let profile = ResolvedProfile {
        canonical_url: url.clone(),
        slug,
    };
    let view = FetchView {
        record: build_record(&profile, &results),
        locales: locale_views(&results),
        url,
    };

    let text = format_view(&view);
    ctx.output.emit(&text, &view)
}

fn locale_views(results: &LocaleResults) -> Vec<LocaleView> {
    results
        .values()
        .map(|result| {
            let parsed = parse_name(&result.raw_name);
            LocaleView {
                locale: result.locale.name.clone(),
                ok: result.ok,
                raw_name: result.raw_name.clone(),
                name: parsed.name,
                nickname: parsed.nickname,
                country: result.raw_country.clone(),
            }
        })
        .collect()
}

fn format_view(view: &FetchView) -> String {
    let mut lines = vec![view.url.clone()];
    for locale in &view.locales {
        let status = if locale.ok { "ok" } else { "failed" };
        let name = if locale.name.is_empty() {
            "-"
        } else {
            locale.name.as_str()
        };
        lines.push(format!("   {} [{status}]: {name}", locale.locale));
    }

    match &view.record {
        Some(record) => {
            if !record.nickname.is_empty() {
                lines.push(format!("   nickname: {}", record.nickname));
            }
            lines.push(format!("   country: {}", record.country));
        }
        None => lines.push("   no usable default-locale name".to_string()),
    }
    lines.join("\n")
}
