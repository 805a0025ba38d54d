use std::collections::BTreeMap;

use serde::Serialize;

use crate::site::Locale;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedProfile {
    pub canonical_url: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleFetchResult {
    pub locale: Locale,
    pub raw_name: String,
    /// Only populated for the default locale.
    pub raw_country: Option<String>,
    pub ok: bool,
}

impl LocaleFetchResult {
    pub fn failed(locale: Locale) -> Self {
        let raw_country = locale.is_default().then(String::new);
        Self {
            locale,
            raw_name: String::new(),
            raw_country,
            ok: false,
        }
    }
}

/// One entry per configured locale, keyed by locale.
pub type LocaleResults = BTreeMap<Locale, LocaleFetchResult>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AthleteRecord {
    pub name: String,
    pub nickname: String,
    pub country: String,
    /// Clean name per configured locale name; empty when that locale failed.
    pub names: BTreeMap<String, String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    pub records: Vec<AthleteRecord>,
    /// Entries that failed both the scan and the retry pass.
    pub failed: Vec<String>,
}

impl BatchResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
