#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use onefc::athlete::{BatchPolicy, BatchRunner, Fetcher, Resolver};
use onefc::error::{AppError, AppResult};
use onefc::site::{Locale, PageSource, SiteUrls};

pub const BASE_URL: &str = "https://www.onefc.com";

#[derive(Debug, Clone)]
pub enum Reply {
    Page(String),
    Slow(Duration, String),
    Missing,
    NetworkError,
    Hang,
}

/// Scripted site: each url answers with its replies in order, repeating
/// the last one. Unscripted urls answer `Missing`.
#[derive(Debug, Default)]
pub struct FakeSite {
    probes: Mutex<HashMap<String, Vec<Reply>>>,
    pages: Mutex<HashMap<String, Vec<Reply>>>,
    probe_calls: Mutex<HashMap<String, usize>>,
    page_calls: Mutex<HashMap<String, usize>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(self, url: &str, replies: Vec<Reply>) -> Self {
        self.probes.lock().unwrap().insert(url.to_string(), replies);
        self
    }

    pub fn page(self, url: &str, replies: Vec<Reply>) -> Self {
        self.pages.lock().unwrap().insert(url.to_string(), replies);
        self
    }

    pub fn probe_calls(&self, url: &str) -> usize {
        self.probe_calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn page_calls(&self, url: &str) -> usize {
        self.page_calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        let probes: usize = self.probe_calls.lock().unwrap().values().sum();
        let pages: usize = self.page_calls.lock().unwrap().values().sum();
        probes + pages
    }

    fn next_reply(
        script: &Mutex<HashMap<String, Vec<Reply>>>,
        calls: &Mutex<HashMap<String, usize>>,
        url: &str,
    ) -> Reply {
        *calls.lock().unwrap().entry(url.to_string()).or_default() += 1;

        let mut script = script.lock().unwrap();
        match script.get_mut(url) {
            Some(replies) if replies.len() > 1 => replies.remove(0),
            Some(replies) => replies.first().cloned().unwrap_or(Reply::Missing),
            None => Reply::Missing,
        }
    }
}

impl PageSource for FakeSite {
    async fn exists(&self, url: &str) -> bool {
        let reply = Self::next_reply(&self.probes, &self.probe_calls, url);
        matches!(reply, Reply::Page(_) | Reply::Slow(..))
    }

    async fn fetch_page(&self, url: &str) -> AppResult<String> {
        match Self::next_reply(&self.pages, &self.page_calls, url) {
            Reply::Page(body) => Ok(body),
            Reply::Slow(delay, body) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            Reply::Missing => Err(AppError::Site {
                url: url.to_string(),
                status: 404,
            }),
            Reply::NetworkError => Err(AppError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(AppError::Timeout(url.to_string()))
            }
        }
    }
}

pub fn site() -> SiteUrls {
    SiteUrls::new(BASE_URL, Locale::defaults()).unwrap()
}

pub fn profile_url(slug: &str) -> String {
    format!("{BASE_URL}/athletes/{slug}/")
}

pub fn mirror_url(code: &str, slug: &str) -> String {
    format!("{BASE_URL}/{code}/athletes/{slug}/")
}

pub fn profile_page(heading: &str, country: Option<&str>) -> String {
    let attributes = country
        .map(|country| {
            format!(
                r#"<div class="attr"><h5 class="title">Country</h5><div class="value"><a href="/c/">{country}</a></div></div>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<html><body><main><h1 class="use-letter-spacing-hint my-4">{heading}</h1>{attributes}</main></body></html>"#
    )
}

pub fn page(heading: &str) -> Reply {
    Reply::Page(profile_page(heading, None))
}

/// Registers all four locale pages of `slug` with the given default heading.
pub fn with_profile(fake: FakeSite, slug: &str, heading: &str, country: &str) -> FakeSite {
    fake.page(
        &profile_url(slug),
        vec![Reply::Page(profile_page(heading, Some(country)))],
    )
    .page(&mirror_url("th", slug), vec![page(&format!("{heading} (th)"))])
    .page(&mirror_url("jp", slug), vec![page(&format!("{heading} (jp)"))])
    .page(&mirror_url("cn", slug), vec![page(&format!("{heading} (cn)"))])
}

pub fn resolver(fake: &Arc<FakeSite>) -> Resolver<FakeSite> {
    Resolver::new(Arc::clone(fake), site())
}

pub fn fetcher(fake: &Arc<FakeSite>) -> Fetcher<FakeSite> {
    Fetcher::new(Arc::clone(fake), site()).with_task_timeout(Duration::from_millis(200))
}

pub fn runner(fake: &Arc<FakeSite>) -> BatchRunner<FakeSite> {
    runner_with_pause(fake, Duration::ZERO)
}

pub fn runner_with_pause(fake: &Arc<FakeSite>, retry_pause: Duration) -> BatchRunner<FakeSite> {
    let policy = BatchPolicy {
        retry_pause,
        entry_delay: Duration::ZERO,
    };
    BatchRunner::new(resolver(fake), fetcher(fake), policy)
}
