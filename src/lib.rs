mod aggregator;
mod config;
mod csv_export;
mod district_scraper;
mod municipality_scraper;
mod ratelimit;
mod requests;
mod scraping_context;
mod text_manipulators;
mod url_invalid_error;

pub use aggregator::{AggregatedRow, ResultsAggregator};
pub use config::ScrapingConfig;
pub use csv_export::export_results;
pub use district_scraper::{DistrictScraper, parse_municipality_list};
pub use municipality_scraper::{ElectionResult, MunicipalityScraper, parse_election_result};
pub use requests::{PageFetcher, RequestClient};
pub use scraping_context::ScrapingContext;
pub use url_invalid_error::UrlInvalidError;
