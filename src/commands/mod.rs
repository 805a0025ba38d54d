pub mod config;
pub mod fetch;
pub mod lookup;
pub mod resolve;
