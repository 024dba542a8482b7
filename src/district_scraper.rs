use scraper::{Html, Selector};

use crate::{
    municipality_scraper::MunicipalityScraper,
    requests::PageFetcher,
    text_manipulators::{extract_text, resolve_detail_url},
};

/// Scrapes a district overview page into the ordered list of
/// municipalities it links to.
#[derive(Debug)]
pub struct DistrictScraper {
    pub url: String,
    pub municipality_scrapers: Vec<MunicipalityScraper>,
}

impl DistrictScraper {
    pub fn new(url: String) -> Self {
        Self {
            url,
            municipality_scrapers: vec![],
        }
    }

    pub async fn scrape<F: PageFetcher>(
        &mut self,
        fetcher: &F,
        base_url: &str,
    ) -> anyhow::Result<()> {
        let html = fetcher.fetch_page(&self.url).await?;
        self.municipality_scrapers = parse_municipality_list(&html, base_url);
        Ok(())
    }
}

/// Walks every table on the overview page. The first cell of a data row
/// holds the municipality code wrapped in a link to its results page,
/// the second the name. Rows without a link are summary rows, not data.
/// Document order is preserved and nothing is deduplicated.
pub fn parse_municipality_list(html: &str, base_url: &str) -> Vec<MunicipalityScraper> {
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let link_selector = Selector::parse("a").unwrap();

    let document = Html::parse_document(html);
    let mut scrapers = vec![];
    for table in document.select(&table_selector) {
        // Overview tables open with a two row header.
        for row in table.select(&row_selector).skip(2) {
            let cells: Vec<_> = row.select(&cell_selector).collect();
            if cells.len() < 2 {
                continue;
            }
            let href = cells[0]
                .select(&link_selector)
                .next()
                .and_then(|link| link.value().attr("href"))
                .filter(|href| !href.is_empty());
            let Some(href) = href else {
                continue;
            };
            let Some(url) = resolve_detail_url(base_url, href) else {
                continue;
            };
            scrapers.push(MunicipalityScraper {
                code: extract_text(cells[0]).trim().to_string(),
                name: extract_text(cells[1]).trim().to_string(),
                url,
            });
        }
    }
    scrapers
}
