use std::sync::Arc;

use crate::athlete::{BatchPolicy, BatchRunner, Fetcher, Resolver};
use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::output::Output;
use crate::site::{SiteClient, SiteUrls};

#[derive(Debug)]
pub struct AppContext {
    pub profile: String,
    pub paths: AppPaths,
    pub settings: Settings,
    pub site: SiteUrls,
    pub site_client: Arc<SiteClient>,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(profile: &str, json: bool) -> AppResult<Self> {
        let profile = config::resolve_profile(profile)?;
        let paths = AppPaths::discover()?;
        let settings = config::load_settings(&paths, &profile)?;
        settings.validate()?;

        let site = SiteUrls::new(settings.base_url(), settings.locales())?;
        let site_client = Arc::new(SiteClient::from_settings(&settings)?);
        let output = Output::new(json);

        Ok(Self {
            profile,
            paths,
            settings,
            site,
            site_client,
            output,
        })
    }

    pub fn resolver(&self) -> Resolver<SiteClient> {
        Resolver::new(Arc::clone(&self.site_client), self.site.clone())
            .with_cache_ttl(self.settings.resolve_cache_ttl())
    }

    pub fn fetcher(&self) -> Fetcher<SiteClient> {
        Fetcher::new(Arc::clone(&self.site_client), self.site.clone())
            .with_workers(self.settings.fetch_workers())
            .with_task_timeout(self.settings.locale_task_timeout())
    }

    pub fn batch_runner(&self) -> BatchRunner<SiteClient> {
        let policy = BatchPolicy {
            retry_pause: self.settings.retry_pause(),
            entry_delay: self.settings.entry_delay(),
        };
        BatchRunner::new(self.resolver(), self.fetcher(), policy)
    }
}
