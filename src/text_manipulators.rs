use scraper::ElementRef;
use url::Url;

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Parses a count the way the source site prints it: non-breaking or
/// ordinary spaces as thousands separators, a comma as the decimal
/// separator. The fractional part is dropped, not rounded. Anything
/// unparsable (footnote markers, empty cells) counts as zero votes.
pub fn parse_count(raw: &str) -> u64 {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned
        .replace(',', ".")
        .parse::<f64>()
        .map(|value| value as u64)
        .unwrap_or(0)
}

/// Resolves a detail-page `href` against the site base. Overview pages
/// link relatively within the same PL/SQL gateway.
pub fn resolve_detail_url(base_url: &str, href: &str) -> Option<String> {
    let resolved = Url::parse(base_url).ok()?.join(href).ok()?;
    Some(resolved.into())
}
