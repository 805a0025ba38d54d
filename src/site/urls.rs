use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, AppResult};

const ATHLETES_SEGMENT: &str = "athletes";

/// A language mirror of the site. The default locale has no path prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Locale {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Locale {
    pub fn default_locale(name: &str) -> Self {
        Self {
            name: name.to_string(),
            code: None,
        }
    }

    pub fn mirror(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: Some(code.to_string()),
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::default_locale("English"),
            Self::mirror("Thai", "th"),
            Self::mirror("Japanese", "jp"),
            Self::mirror("Chinese", "cn"),
        ]
    }

    pub fn is_default(&self) -> bool {
        self.code.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: Url,
    locales: Vec<Locale>,
}

impl SiteUrls {
    pub fn new(base_url: &str, locales: Vec<Locale>) -> AppResult<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(AppError::Config(format!(
                "base_url `{base_url}` must be an absolute http(s) url"
            )));
        }

        validate_locales(&locales)?;

        Ok(Self { base, locales })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn profile_url(&self, slug: &str) -> String {
        self.athlete_url(None, slug)
    }

    pub fn locale_profile_url(&self, locale: &Locale, slug: &str) -> String {
        self.athlete_url(locale.code.as_deref(), slug)
    }

    pub fn search_url(&self, query: &str) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut().clear().append_pair("s", query);
        url.to_string()
    }

    /// Resolves a possibly relative href found on a site page.
    pub fn absolutize(&self, href: &str) -> Option<Url> {
        self.base.join(href.trim()).ok()
    }

    /// True when `query` is a default-locale profile url on this site,
    /// with or without a scheme.
    pub fn is_canonical_profile(&self, query: &str) -> bool {
        let Some(url) = parse_loose(query) else {
            return false;
        };

        if !same_site(url.host_str(), self.base.host_str()) {
            return false;
        }

        let segments = non_empty_segments(&url);
        let prefix = non_empty_segments(&self.base);
        let Some(rest) = segments.strip_prefix(prefix.as_slice()) else {
            return false;
        };

        matches!(rest, [athletes, slug] if *athletes == ATHLETES_SEGMENT && !slug.is_empty())
    }

    fn athlete_url(&self, code: Option<&str>, slug: &str) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            if let Some(code) = code {
                segments.push(code);
            }
            segments.extend([ATHLETES_SEGMENT, slug, ""]);
        }
        url.to_string()
    }
}

/// Exactly one default locale; names and codes unique and non-empty.
///
/// Records key localized names by locale name, so a repeated name would
/// silently merge two columns.
pub fn validate_locales(locales: &[Locale]) -> AppResult<()> {
    let defaults = locales.iter().filter(|locale| locale.is_default()).count();
    if defaults != 1 {
        return Err(AppError::Config(format!(
            "locales must contain exactly one default (code-less) locale, found {defaults}"
        )));
    }

    let mut names = HashSet::new();
    let mut codes = HashSet::new();
    for locale in locales {
        let name = locale.name.trim();
        if name.is_empty() {
            return Err(AppError::Config("locale names must not be empty".to_string()));
        }
        if !names.insert(name.to_lowercase()) {
            return Err(AppError::Config(format!("duplicate locale name `{name}`")));
        }

        let Some(code) = locale.code.as_deref() else {
            continue;
        };
        let code = code.trim();
        if code.is_empty() || code.contains('/') {
            return Err(AppError::Config(format!(
                "locale `{name}` needs a non-empty path code without `/`"
            )));
        }
        if !codes.insert(code.to_lowercase()) {
            return Err(AppError::Config(format!("duplicate locale code `{code}`")));
        }
    }

    Ok(())
}

/// `"Rodtang Jitmuangnon"` -> `"rodtang-jitmuangnon"`.
pub fn slugify(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

pub fn first_token_slug(query: &str) -> Option<String> {
    query.split_whitespace().next().map(str::to_lowercase)
}

/// Lower-cased last non-empty path segment.
pub fn slug_from_url(url: &str) -> Option<String> {
    let parsed = parse_loose(url)?;
    non_empty_segments(&parsed)
        .last()
        .map(|segment| segment.to_lowercase())
}

pub fn is_athlete_link(url: &Url) -> bool {
    let text = url.as_str();
    if !text.contains("/athletes/") || text.matches('/').count() < 4 {
        return false;
    }

    non_empty_segments(url)
        .last()
        .is_some_and(|segment| *segment != ATHLETES_SEGMENT)
}

fn parse_loose(input: &str) -> Option<Url> {
    let input = input.trim();
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return None;
    }

    if input.contains("://") {
        Url::parse(input).ok()
    } else {
        Url::parse(&format!("https://{input}")).ok()
    }
}

fn same_site(candidate: Option<&str>, base: Option<&str>) -> bool {
    match (candidate, base) {
        (Some(candidate), Some(base)) => strip_www(candidate).eq_ignore_ascii_case(strip_www(base)),
        _ => false,
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn non_empty_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default()
}
