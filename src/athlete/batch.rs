use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use super::fetcher::Fetcher;
use super::models::{AthleteRecord, BatchResult, LocaleResults, ResolvedProfile};
use super::parser::parse_name;
use super::resolver::Resolver;
use crate::site::PageSource;

#[derive(Debug, Clone, Copy)]
pub struct BatchPolicy {
    /// Wait before the retry pass, only when something needs retrying.
    pub retry_pause: Duration,
    /// Wait between consecutive entries within a pass.
    pub entry_delay: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            retry_pause: Duration::from_secs(1),
            entry_delay: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFailure {
    Unresolved,
    MissingName,
}

impl fmt::Display for EntryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryFailure::Unresolved => f.write_str("no profile url found"),
            EntryFailure::MissingName => f.write_str("profile has no default-locale name"),
        }
    }
}

/// Runs entries through resolve, fetch and parse: one scan pass, then a
/// single retry pass for whatever failed.
///
/// Entries are processed one at a time; only the locale fetches of a
/// single entry run concurrently.
pub struct BatchRunner<S> {
    resolver: Resolver<S>,
    fetcher: Fetcher<S>,
    policy: BatchPolicy,
}

impl<S: PageSource> BatchRunner<S> {
    pub fn new(resolver: Resolver<S>, fetcher: Fetcher<S>, policy: BatchPolicy) -> Self {
        Self {
            resolver,
            fetcher,
            policy,
        }
    }

    pub async fn run(&self, raw: &str) -> BatchResult {
        self.run_entries(unique_entries(split_entries(raw))).await
    }

    pub async fn run_entries(&self, entries: Vec<String>) -> BatchResult {
        let mut result = BatchResult::default();
        if entries.is_empty() {
            tracing::info!("no entries to process");
            return result;
        }

        tracing::info!(entries = entries.len(), "scan phase");
        let mut retry_queue = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            if index > 0 {
                pause(self.policy.entry_delay).await;
            }

            match self.process_entry(&entry).await {
                Ok(record) => result.records.push(record),
                Err(reason) => {
                    tracing::debug!(entry = %entry, %reason, "queued for retry");
                    retry_queue.push(entry);
                }
            }
        }

        if !retry_queue.is_empty() {
            tracing::info!(
                pending = retry_queue.len(),
                pause = ?self.policy.retry_pause,
                "retry phase"
            );
            pause(self.policy.retry_pause).await;

            for (index, entry) in retry_queue.into_iter().enumerate() {
                if index > 0 {
                    pause(self.policy.entry_delay).await;
                }

                match self.process_entry(&entry).await {
                    Ok(record) => result.records.push(record),
                    Err(reason) => {
                        tracing::debug!(entry = %entry, %reason, "dropped after retry");
                        result.failed.push(entry);
                    }
                }
            }
        }

        if !result.failed.is_empty() {
            tracing::warn!(failed = result.failed.len(), "some entries could not be processed");
        }
        tracing::info!(records = result.records.len(), "batch complete");
        result
    }

    pub async fn process_entry(&self, entry: &str) -> Result<AthleteRecord, EntryFailure> {
        let profile = self
            .resolver
            .resolve(entry)
            .await
            .ok_or(EntryFailure::Unresolved)?;
        let results = self.fetcher.fetch(&profile.canonical_url).await;
        build_record(&profile, &results).ok_or(EntryFailure::MissingName)
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Splits on commas and newlines, trimming and dropping empty pieces.
pub fn split_entries(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Drops repeated entries, keeping the first occurrence in input order.
pub fn unique_entries(entries: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

/// `None` when the default locale produced no usable name.
pub fn build_record(profile: &ResolvedProfile, results: &LocaleResults) -> Option<AthleteRecord> {
    let default = results.values().find(|result| result.locale.is_default())?;
    let parsed = parse_name(&default.raw_name);
    if parsed.name.is_empty() {
        return None;
    }

    let names = results
        .values()
        .map(|result| (result.locale.name.clone(), parse_name(&result.raw_name).name))
        .collect();
    let country = default
        .raw_country
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Some(AthleteRecord {
        name: parsed.name,
        nickname: parsed.nickname,
        country,
        names,
        url: profile.canonical_url.clone(),
    })
}
