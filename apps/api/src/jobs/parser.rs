//! Posting Parser: tolerant extraction of job cards from the guest listing markup.
//!
//! The listing is an HTML fragment of `<li>` cards. Every sub-element is optional:
//! a missing heading, link or span becomes a default, never an error.

use scraper::{ElementRef, Html, Selector};

use crate::jobs::models::{JobRecord, RawPosting, DEFAULT_SOURCE};

/// Acquisition never returns more live records than this.
pub const MAX_FRAGMENTS: usize = 40;

const COMPANY_LINK: &str = r#"a[data-tracking-control-name="public_jobs_company_link"]"#;
const LABELED_LOCATION: &str = "span.job-result-card__location";

struct CardSelectors {
    card: Selector,
    titles: [Selector; 3],
    company_heading: Selector,
    company_link: Selector,
    link: Selector,
    labeled_location: Selector,
    any_span: Selector,
}

impl CardSelectors {
    fn new() -> Self {
        Self {
            card: selector("li"),
            titles: [selector("h3"), selector("h2"), selector("h1")],
            company_heading: selector("h4"),
            company_link: selector(COMPANY_LINK),
            link: selector("a[href]"),
            labeled_location: selector(LABELED_LOCATION),
            any_span: selector("span"),
        }
    }
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

/// Parses a listing payload into normalized records.
///
/// Scans at most the first `MAX_FRAGMENTS` cards; cards without a title are skipped.
pub fn parse_postings(payload: &str) -> Vec<JobRecord> {
    let document = Html::parse_fragment(payload);
    let selectors = CardSelectors::new();

    document
        .select(&selectors.card)
        .take(MAX_FRAGMENTS)
        .filter_map(|card| extract_card(card, &selectors).into_record())
        .collect()
}

fn extract_card(card: ElementRef<'_>, selectors: &CardSelectors) -> RawPosting {
    let title = selectors
        .titles
        .iter()
        .find_map(|s| first(card, s))
        .map(element_text);

    let company = first(card, &selectors.company_heading)
        .or_else(|| first(card, &selectors.company_link))
        .map(element_text);

    let link = first(card, &selectors.link)
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string());

    let location = first(card, &selectors.labeled_location)
        .or_else(|| first(card, &selectors.any_span))
        .map(element_text);

    RawPosting {
        title,
        company,
        location,
        link,
        // guest listing cards carry no description
        description: None,
        source: Some(DEFAULT_SOURCE.to_string()),
    }
}

fn first<'a>(card: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    card.select(selector).next()
}

/// Text content with each text node trimmed and blank nodes dropped. Nodes are
/// joined by a single space, so `Analyst <b>II</b>` reads "Analyst II" rather
/// than running the words together.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <li>
          <div class="base-card">
            <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/1">
              <span class="sr-only">Data Engineer</span>
            </a>
            <div class="base-search-card__info">
              <h3 class="base-search-card__title">
                Data Engineer
              </h3>
              <h4 class="base-search-card__subtitle">
                <a data-tracking-control-name="public_jobs_company_link" href="https://acme.example">Acme</a>
              </h4>
              <div class="base-search-card__metadata">
                <span class="job-search-card__location">Remote</span>
              </div>
            </div>
          </div>
        </li>
        <li>
          <h2>Analyst <b>II</b></h2>
          <a data-tracking-control-name="public_jobs_company_link" href="/company/globex">Globex</a>
          <span class="job-result-card__location">Pune, India</span>
        </li>
    "#;

    #[test]
    fn test_parses_full_card() {
        let jobs = parse_postings(LISTING);
        assert_eq!(jobs.len(), 2);

        let first = &jobs[0];
        assert_eq!(first.title, "Data Engineer");
        assert_eq!(first.company, "Acme");
        assert_eq!(first.link, "https://www.linkedin.com/jobs/view/1");
        // no labeled location: first span wins
        assert_eq!(first.location, "Data Engineer");
        assert_eq!(first.source, "LinkedIn");
        assert_eq!(first.description, "");
    }

    #[test]
    fn test_company_link_and_labeled_location_fallbacks() {
        let jobs = parse_postings(LISTING);
        let second = &jobs[1];
        assert_eq!(second.title, "Analyst II");
        assert_eq!(second.company, "Globex");
        assert_eq!(second.link, "/company/globex");
        assert_eq!(second.location, "Pune, India");
    }

    #[test]
    fn test_heading_priority_prefers_h3() {
        let jobs = parse_postings("<li><h1>Wrong</h1><h3>Right</h3></li>");
        assert_eq!(jobs[0].title, "Right");
    }

    #[test]
    fn test_missing_sub_elements_default() {
        let jobs = parse_postings("<li><h3>Solo Title</h3></li>");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "");
        assert_eq!(jobs[0].location, "");
        assert_eq!(jobs[0].link, "#");
    }

    #[test]
    fn test_untitled_cards_are_skipped() {
        let payload = "<li><h3>   </h3><h4>Acme</h4></li><li><span>no heading</span></li>";
        assert!(parse_postings(payload).is_empty());
    }

    #[test]
    fn test_non_listing_payload_yields_nothing() {
        assert!(parse_postings("").is_empty());
        assert!(parse_postings("<html><body><p>Please sign in</p></body></html>").is_empty());
    }

    #[test]
    fn test_caps_at_forty_fragments() {
        let payload: String = (0..55)
            .map(|i| format!("<li><h3>Job {i}</h3></li>"))
            .collect();
        let jobs = parse_postings(&payload);
        assert_eq!(jobs.len(), MAX_FRAGMENTS);
        assert_eq!(jobs[39].title, "Job 39");
    }

    #[test]
    fn test_cap_counts_skipped_fragments() {
        let mut payload: String = (0..40).map(|_| "<li><p>ad</p></li>".to_string()).collect();
        payload.push_str("<li><h3>Too Late</h3></li>");
        assert!(parse_postings(&payload).is_empty());
    }
}
