pub mod client;
pub mod html;
pub mod urls;

use std::future::Future;

use crate::error::AppResult;

pub use client::SiteClient;
pub use urls::{Locale, SiteUrls};

/// Network capability shared by the resolver and the fetcher.
///
/// Implementations are used concurrently without external locking.
pub trait PageSource: Send + Sync {
    /// Lightweight existence check. Any failure counts as "does not exist".
    fn exists(&self, url: &str) -> impl Future<Output = bool> + Send;

    /// Full page body for a success status, an error otherwise.
    fn fetch_page(&self, url: &str) -> impl Future<Output = AppResult<String>> + Send;
}
