use once_cell::sync::Lazy;
use tracing::debug;

use super::query::{DocumentQuery, Query, QuerySpec};
use super::{non_empty, parse_page, trimmed_text};
use crate::models::PageClassification;

static NO_RESULTS: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("div")
        .class("no-results-message")
        .compile()
        .expect("Invalid no-results selector")
});

static RESULTS_INFO: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("div")
        .id("MainSearchTable_info")
        .class("dataTables_info")
        .compile()
        .expect("Invalid results-info selector")
});

// The data-value alone also shows up in the environmental table, hence the class.
static PART_NUMBER_CELL: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("td")
        .class("sticky-col")
        .attr("data-value", "Part Number")
        .compile()
        .expect("Invalid part-number cell selector")
});

static PART_NUMBER_TEXT: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("span")
        .class("part-number")
        .compile()
        .expect("Invalid part-number selector")
});

/// Detect which kind of page the markup shows.
///
/// The checks overlap in real pages, so their order decides: a no-results
/// message beats a results counter, which beats a part-number cell.
pub fn classify(markup: &str) -> PageClassification {
    let document = parse_page(markup);

    if document.find_first(&NO_RESULTS).is_some() {
        debug!("Page matched {}", NO_RESULTS.css());
        return PageClassification::NoResults;
    }

    if document.find_first(&RESULTS_INFO).is_some() {
        debug!("Page matched {}", RESULTS_INFO.css());
        return PageClassification::ListOfItems;
    }

    let part_number = document
        .find_first(&PART_NUMBER_CELL)
        .and_then(|cell| cell.find_first(&PART_NUMBER_TEXT).map(|span| trimmed_text(&span)))
        .and_then(|text| non_empty(&text));

    match part_number {
        Some(id) => {
            debug!("Page is a direct item page for {}", id);
            PageClassification::DirectItem(id)
        }
        None => PageClassification::Unknown,
    }
}
