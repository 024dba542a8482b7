use std::collections::HashMap;

use regex::Regex;
use scraper::{Html, Selector};

use crate::{
    requests::PageFetcher,
    text_manipulators::{extract_text, parse_count},
};

// The turnout table keys its cells with a `headers` attribute instead of
// a stable column position; these are the references the three counters
// carry on every page variant.
const REGISTERED_VOTERS_HEADER: &str = "sa2";
const ENVELOPES_ISSUED_HEADER: &str = "sa3";
const VALID_VOTES_HEADER: &str = "sa6";

/// Turnout counters and the per-party vote counts of one municipality.
#[derive(Debug)]
pub struct ElectionResult {
    pub registered_voters: u64,
    pub envelopes_issued: u64,
    pub valid_votes: u64,
    pub party_votes: HashMap<String, u64>,
}

/// One row of the district overview: the municipality's code and name
/// plus the absolute URL of its results page.
#[derive(Debug)]
pub struct MunicipalityScraper {
    pub code: String,
    pub name: String,
    pub url: String,
}

impl MunicipalityScraper {
    pub async fn scrape<F: PageFetcher>(&self, fetcher: &F) -> anyhow::Result<ElectionResult> {
        let html = fetcher.fetch_page(&self.url).await?;
        Ok(parse_election_result(&html))
    }
}

/// Extracts the three turnout counters and every party row from a
/// municipality results page. Operates purely on already-fetched markup.
pub fn parse_election_result(html: &str) -> ElectionResult {
    let document = Html::parse_document(html);
    ElectionResult {
        registered_voters: counter_by_header(&document, REGISTERED_VOTERS_HEADER),
        envelopes_issued: counter_by_header(&document, ENVELOPES_ISSUED_HEADER),
        valid_votes: counter_by_header(&document, VALID_VOTES_HEADER),
        party_votes: parse_party_votes(&document),
    }
}

/// Finds the cell whose `headers` attribute matches the given pattern.
/// Some page variants omit a counter entirely; that reads as zero.
fn counter_by_header(document: &Html, header_pattern: &str) -> u64 {
    let cell_selector = Selector::parse("td[headers]").unwrap();
    let pattern = Regex::new(header_pattern).unwrap();
    document
        .select(&cell_selector)
        .find(|cell| {
            cell.value()
                .attr("headers")
                .is_some_and(|headers| pattern.is_match(headers))
        })
        .map(|cell| parse_count(&extract_text(cell)))
        .unwrap_or(0)
}

fn parse_party_votes(document: &Html) -> HashMap<String, u64> {
    let table_selector = Selector::parse("table.table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    let mut party_votes = HashMap::new();
    for table in document.select(&table_selector) {
        // Results tables open with a two row header.
        for row in table.select(&row_selector).skip(2) {
            let cells: Vec<_> = row.select(&cell_selector).collect();
            if cells.len() < 3 {
                continue;
            }
            let party = extract_text(cells[1]).trim().to_string();
            if party.is_empty() {
                continue;
            }
            // A name repeated within one page keeps its last count.
            party_votes.insert(party, parse_count(&extract_text(cells[2])));
        }
    }
    party_votes
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_PAGE: &str = r#"
        <html><body>
          <table>
            <tr><td headers="sa1">1</td>
                <td headers="sa2">1&nbsp;000</td>
                <td headers="sa3">900</td>
                <td headers="sa6">890</td></tr>
          </table>
          <table class="table">
            <tr><th>number</th><th>party</th><th>votes</th></tr>
            <tr><th colspan="3">in total</th></tr>
            <tr><td>1</td><td>Party A</td><td>500</td></tr>
            <tr><td>2</td><td>Party B</td><td>390</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn counters_are_located_by_header_attribute() {
        let result = parse_election_result(DETAIL_PAGE);
        assert_eq!(result.registered_voters, 1000);
        assert_eq!(result.envelopes_issued, 900);
        assert_eq!(result.valid_votes, 890);
        assert_eq!(result.party_votes.get("Party A"), Some(&500));
        assert_eq!(result.party_votes.get("Party B"), Some(&390));
        assert_eq!(result.party_votes.len(), 2);
    }

    #[test]
    fn missing_counter_cell_reads_as_zero() {
        let page = r#"
            <html><body>
              <table><tr><td headers="sa2">1000</td></tr></table>
            </body></html>
        "#;
        let result = parse_election_result(page);
        assert_eq!(result.registered_voters, 1000);
        assert_eq!(result.envelopes_issued, 0);
        assert_eq!(result.valid_votes, 0);
    }

    #[test]
    fn tables_without_the_results_marker_are_ignored() {
        let page = r#"
            <html><body>
              <table>
                <tr><th>h</th></tr>
                <tr><th>h</th></tr>
                <tr><td>1</td><td>Not A Party</td><td>500</td></tr>
              </table>
            </body></html>
        "#;
        assert!(parse_election_result(page).party_votes.is_empty());
    }

    #[test]
    fn blank_and_short_rows_are_skipped() {
        let page = r#"
            <html><body>
              <table class="table">
                <tr><th>h</th></tr>
                <tr><th>h</th></tr>
                <tr><td>1</td><td>  </td><td>500</td></tr>
                <tr><td>2</td><td>Party B</td></tr>
                <tr><td>3</td><td>Party C</td><td>125</td></tr>
              </table>
            </body></html>
        "#;
        let votes = parse_election_result(page).party_votes;
        assert_eq!(votes.len(), 1);
        assert_eq!(votes.get("Party C"), Some(&125));
    }

    #[test]
    fn repeated_party_name_keeps_the_last_count() {
        let page = r#"
            <html><body>
              <table class="table">
                <tr><th>h</th></tr>
                <tr><th>h</th></tr>
                <tr><td>1</td><td>Party A</td><td>500</td></tr>
                <tr><td>2</td><td>Party A</td><td>390</td></tr>
              </table>
            </body></html>
        "#;
        let votes = parse_election_result(page).party_votes;
        assert_eq!(votes.get("Party A"), Some(&390));
    }
}
