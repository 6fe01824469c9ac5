//! Page fetching and marker extraction.

mod extractor;
mod fetcher;

pub use extractor::UpdateExtractor;
pub use fetcher::{HttpPageFetcher, PageFetcher};
