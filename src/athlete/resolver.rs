use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::site::urls::{self, SiteUrls};
use crate::site::{PageSource, html};

use super::models::ResolvedProfile;

/// Ways of turning a free-text query into a profile url, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The query already is a default-locale profile url.
    CanonicalUrl,
    /// `Rodtang Jitmuangnon` -> `/athletes/rodtang-jitmuangnon/`.
    FullSlug,
    /// `Rodtang Jitmuangnon` -> `/athletes/rodtang/`.
    FirstToken,
    /// First athlete link on the site's search results page.
    SiteSearch,
}

impl Strategy {
    pub const DEFAULT_ORDER: [Strategy; 4] = [
        Strategy::CanonicalUrl,
        Strategy::FullSlug,
        Strategy::FirstToken,
        Strategy::SiteSearch,
    ];

    async fn attempt<S: PageSource>(
        self,
        query: &str,
        site: &SiteUrls,
        source: &S,
    ) -> Option<String> {
        match self {
            Strategy::CanonicalUrl => site
                .is_canonical_profile(query)
                .then(|| query.to_string()),
            Strategy::FullSlug => probe(source, site, &urls::slugify(query)).await,
            Strategy::FirstToken => {
                // A single token was already probed by `FullSlug`.
                if query.split_whitespace().nth(1).is_none() {
                    return None;
                }
                let slug = urls::first_token_slug(query)?;
                probe(source, site, &slug).await
            }
            Strategy::SiteSearch => search(source, site, query).await,
        }
    }
}

async fn probe<S: PageSource>(source: &S, site: &SiteUrls, slug: &str) -> Option<String> {
    if slug.is_empty() {
        return None;
    }

    let candidate = site.profile_url(slug);
    source.exists(&candidate).await.then_some(candidate)
}

async fn search<S: PageSource>(source: &S, site: &SiteUrls, query: &str) -> Option<String> {
    let search_url = site.search_url(query);
    match source.fetch_page(&search_url).await {
        Ok(page) => html::search_result_links(&page, site).into_iter().next(),
        Err(err) => {
            tracing::warn!(query, error = %err, "site search failed");
            None
        }
    }
}

#[derive(Debug)]
struct CachedProfile {
    profile: ResolvedProfile,
    stored_at: Instant,
}

pub struct Resolver<S> {
    source: Arc<S>,
    site: SiteUrls,
    strategies: Vec<Strategy>,
    cache_ttl: Duration,
    cache: Mutex<HashMap<String, CachedProfile>>,
}

impl<S: PageSource> Resolver<S> {
    pub fn new(source: Arc<S>, site: SiteUrls) -> Self {
        Self {
            source,
            site,
            strategies: Strategy::DEFAULT_ORDER.to_vec(),
            cache_ttl: Duration::ZERO,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Remember successful resolutions for `ttl`. Failures are never cached.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub async fn resolve(&self, query: &str) -> Option<ResolvedProfile> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(profile) = self.cached(query) {
            tracing::debug!(query, url = %profile.canonical_url, "resolved from cache");
            return Some(profile);
        }

        for strategy in &self.strategies {
            let Some(canonical_url) = strategy.attempt(query, &self.site, &*self.source).await
            else {
                continue;
            };

            let Some(slug) = urls::slug_from_url(&canonical_url) else {
                tracing::debug!(query, url = %canonical_url, "candidate url has no slug");
                continue;
            };

            tracing::debug!(query, ?strategy, url = %canonical_url, "resolved");
            let profile = ResolvedProfile {
                canonical_url,
                slug,
            };
            self.remember(query, &profile);
            return Some(profile);
        }

        tracing::debug!(query, "no strategy resolved the query");
        None
    }

    fn cached(&self, query: &str) -> Option<ResolvedProfile> {
        if self.cache_ttl.is_zero() {
            return None;
        }

        let mut cache = self.cache.lock().ok()?;
        match cache.get(query) {
            Some(entry) if entry.stored_at.elapsed() < self.cache_ttl => {
                Some(entry.profile.clone())
            }
            Some(_) => {
                cache.remove(query);
                None
            }
            None => None,
        }
    }

    fn remember(&self, query: &str, profile: &ResolvedProfile) {
        if self.cache_ttl.is_zero() {
            return;
        }

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(
                query.to_string(),
                CachedProfile {
                    profile: profile.clone(),
                    stored_at: Instant::now(),
                },
            );
        }
    }
}
