pub mod adapter;
pub mod fetcher;
pub mod traits;

pub use adapter::SourceAdapter;
pub use fetcher::ScraperImpl;
pub use traits::{Scraper, Site};
