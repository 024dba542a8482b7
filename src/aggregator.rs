use std::collections::{HashMap, HashSet};

use log::info;

use crate::{
    district_scraper::DistrictScraper,
    municipality_scraper::{ElectionResult, MunicipalityScraper},
    requests::PageFetcher,
};

/// One municipality flattened into an output row: the five fixed fields
/// plus whatever parties its page reported.
#[derive(Debug)]
pub struct AggregatedRow {
    pub code: String,
    pub name: String,
    pub registered_voters: u64,
    pub envelopes_issued: u64,
    pub valid_votes: u64,
    pub party_votes: HashMap<String, u64>,
}

/// Drives one full run over a district: scrapes the overview page, then
/// every municipality page in index order. Owns the accumulated rows and
/// the union of party names for the whole run.
#[derive(Debug)]
pub struct ResultsAggregator {
    index_url: String,
    pub rows: Vec<AggregatedRow>,
    pub parties: HashSet<String>,
}

impl ResultsAggregator {
    pub fn new(index_url: String) -> Self {
        Self {
            index_url,
            rows: vec![],
            parties: HashSet::new(),
        }
    }

    /// Any fetch failure aborts the run; partial results are never
    /// written.
    pub async fn run<F: PageFetcher>(&mut self, fetcher: &F, base_url: &str) -> anyhow::Result<()> {
        let mut district = DistrictScraper::new(self.index_url.clone());
        district.scrape(fetcher, base_url).await?;

        let total = district.municipality_scrapers.len();
        info!("municipalities found: {total}");

        for (position, scraper) in district.municipality_scrapers.iter().enumerate() {
            let result = scraper.scrape(fetcher).await?;
            let done = position + 1;
            info!("[{done}/{total}] {} ({}%)", scraper.name, done * 100 / total);
            self.absorb(scraper, result);
        }
        Ok(())
    }

    fn absorb(&mut self, municipality: &MunicipalityScraper, result: ElectionResult) {
        // Digit-only labels come from malformed rows (stray candidate
        // counts read as names) and never become columns.
        self.parties.extend(
            result
                .party_votes
                .keys()
                .filter(|name| name.chars().any(|c| !c.is_ascii_digit()))
                .cloned(),
        );
        self.rows.push(AggregatedRow {
            code: municipality.code.clone(),
            name: municipality.name.clone(),
            registered_voters: result.registered_voters,
            envelopes_issued: result.envelopes_issued,
            valid_votes: result.valid_votes,
            party_votes: result.party_votes,
        });
    }
}
