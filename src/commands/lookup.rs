use std::fs;
use std::io::{self, Read};

use crate::athlete::{AthleteRecord, BatchResult};
use crate::cli::LookupArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::site::Locale;

pub async fn run(ctx: &AppContext, args: LookupArgs) -> AppResult<()> {
    let raw = read_entries(&args)?;
    let result = ctx.batch_runner().run(&raw).await;

    let text = format_result(&result, ctx.site.locales());
    ctx.output.emit(&text, &result)
}

fn read_entries(args: &LookupArgs) -> AppResult<String> {
    let selected = [!args.entries.is_empty(), args.file.is_some(), args.stdin]
        .into_iter()
        .filter(|chosen| *chosen)
        .count();

    if selected == 0 {
        return Err(AppError::InvalidInput(
            "missing entries; pass names or urls, --file, or --stdin".to_string(),
        ));
    }

    if selected > 1 {
        return Err(AppError::InvalidInput(
            "pass only one entry source: positional entries, --file, or --stdin".to_string(),
        ));
    }

    if let Some(path) = &args.file {
        return Ok(fs::read_to_string(path)?);
    }

    if args.stdin {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        return Ok(raw);
    }

    Ok(args.entries.join("\n"))
}

fn format_result(result: &BatchResult, locales: &[Locale]) -> String {
    if result.is_empty() && result.failed.is_empty() {
        return "0 athletes".to_string();
    }

    let mut blocks = result
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| format_record(index + 1, record, locales))
        .collect::<Vec<_>>();

    let noun = if result.records.len() == 1 {
        "athlete"
    } else {
        "athletes"
    };
    let mut summary = format!("{} {noun}", result.records.len());
    if !result.failed.is_empty() {
        summary.push_str(&format!(
            ", {} not found: {}",
            result.failed.len(),
            result.failed.join(", ")
        ));
    }
    blocks.push(summary);
    blocks.join("\n\n")
}

fn format_record(position: usize, record: &AthleteRecord, locales: &[Locale]) -> String {
    let mut lines = vec![format!("{position}. {}", record.name)];
    if !record.nickname.is_empty() {
        lines.push(format!("   nickname: {}", record.nickname));
    }
    let country = if record.country.is_empty() {
        "(unknown)"
    } else {
        record.country.as_str()
    };
    lines.push(format!("   country: {country}"));

    for locale in locales.iter().filter(|locale| !locale.is_default()) {
        let name = record
            .names
            .get(&locale.name)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or("-");
        lines.push(format!("   {}: {name}", locale.name.to_lowercase()));
    }

    lines.push(format!("   url: {}", record.url));
    lines.join("\n")
}
