pub mod batch;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod resolver;

pub use batch::{BatchPolicy, BatchRunner};
pub use fetcher::Fetcher;
pub use models::{AthleteRecord, BatchResult, LocaleFetchResult, LocaleResults, ResolvedProfile};
pub use parser::{ParsedName, parse_name};
pub use resolver::{Resolver, Strategy};
