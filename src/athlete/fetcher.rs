use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::site::urls::{self, SiteUrls};
use crate::site::{Locale, PageSource, html};

use super::models::{LocaleFetchResult, LocaleResults};

const DEFAULT_WORKERS: usize = 4;
const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(10);

/// One locale page to retrieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTask {
    pub locale: Locale,
    pub url: String,
}

pub struct Fetcher<S> {
    source: Arc<S>,
    site: SiteUrls,
    workers: usize,
    task_timeout: Duration,
}

impl<S: PageSource> Fetcher<S> {
    pub fn new(source: Arc<S>, site: SiteUrls) -> Self {
        Self {
            source,
            site,
            workers: DEFAULT_WORKERS,
            task_timeout: DEFAULT_TASK_TIMEOUT,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn tasks(&self, slug: &str) -> Vec<LocaleTask> {
        self.site
            .locales()
            .iter()
            .map(|locale| LocaleTask {
                locale: locale.clone(),
                url: self.site.locale_profile_url(locale, slug),
            })
            .collect()
    }

    /// Fetches every configured locale of the profile behind `canonical_url`.
    ///
    /// Always returns one result per locale; failed locales are marked
    /// `ok = false` with empty fields.
    pub async fn fetch(&self, canonical_url: &str) -> LocaleResults {
        let Some(slug) = urls::slug_from_url(canonical_url) else {
            tracing::warn!(url = canonical_url, "profile url has no slug");
            return self.all_failed();
        };

        let mut results: LocaleResults = stream::iter(self.tasks(&slug))
            .map(|task| self.run_task(task))
            .buffer_unordered(self.workers)
            .map(|result| (result.locale.clone(), result))
            .collect()
            .await;

        for locale in self.site.locales() {
            results
                .entry(locale.clone())
                .or_insert_with(|| LocaleFetchResult::failed(locale.clone()));
        }

        results
    }

    async fn run_task(&self, task: LocaleTask) -> LocaleFetchResult {
        let LocaleTask { locale, url } = task;
        let fetched = tokio::time::timeout(self.task_timeout, self.source.fetch_page(&url)).await;
        let page = match fetched {
            Ok(Ok(page)) => page,
            Ok(Err(err)) => {
                tracing::warn!(locale = %locale.name, url = %url, error = %err, "locale fetch failed");
                return LocaleFetchResult::failed(locale);
            }
            Err(_) => {
                tracing::warn!(
                    locale = %locale.name,
                    url = %url,
                    timeout = ?self.task_timeout,
                    "locale fetch timed out"
                );
                return LocaleFetchResult::failed(locale);
            }
        };

        let raw_name =
            html::profile_heading(&page).unwrap_or_else(|| html::NAME_NOT_FOUND.to_string());
        let raw_country = locale
            .is_default()
            .then(|| html::profile_country(&page).unwrap_or_default());

        tracing::debug!(locale = %locale.name, url = %url, raw_name = %raw_name, "locale fetched");
        LocaleFetchResult {
            locale,
            raw_name,
            raw_country,
            ok: true,
        }
    }

    fn all_failed(&self) -> LocaleResults {
        self.site
            .locales()
            .iter()
            .map(|locale| (locale.clone(), LocaleFetchResult::failed(locale.clone())))
            .collect()
    }
}
