pub mod adaptors;
pub mod listing;
pub mod schedule;
pub mod scraper;
pub mod store;
