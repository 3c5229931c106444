use once_cell::sync::Lazy;
use scraper::ElementRef;
use tracing::debug;

use super::query::{DocumentQuery, Query, QuerySpec};
use super::{non_empty, parse_page, parse_row, stripped_text};
use crate::models::{EnvironmentalField, EnvironmentalRecord};

const SERIES_MARKER: &str = "Series:";

static CELL: Lazy<Query> = Lazy::new(|| QuerySpec::tag("td").compile().expect("Invalid cell selector"));

static ROHS_DATE: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("span")
        .class("desc")
        .compile()
        .expect("Invalid RoHS date selector")
});

static DOCUMENT_LINK: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("a")
        .class("link")
        .compile()
        .expect("Invalid document link selector")
});

static SERIES: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("span")
        .class("series-short-desc")
        .compile()
        .expect("Invalid series selector")
});

static SIDE_DATASHEET_LINK: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("a")
        .class("side-link")
        .class("datasheet-link")
        .compile()
        .expect("Invalid datasheet link selector")
});

// The vendor spells the table class this way.
static ENVIRONMENTAL_ROW: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("tr")
        .inside(QuerySpec::tag("tbody"))
        .inside(QuerySpec::tag("table").class("envirnonmental-table"))
        .compile()
        .expect("Invalid environmental row selector")
});

/// How a cell's `data-value` maps onto a record field.
enum CellRule {
    Text(EnvironmentalField),
    RohsDate,
    Link(EnvironmentalField),
}

fn rule_for(data_value: &str) -> Option<CellRule> {
    let rule = match data_value {
        "Part Number" => CellRule::Text(EnvironmentalField::PartNumber),
        "Part Description" => CellRule::Text(EnvironmentalField::PartDescription),
        "REACH (SVHC's)" => CellRule::Text(EnvironmentalField::ReachStatus),
        "Pb-Free" => CellRule::Text(EnvironmentalField::PbFree),
        "Halogen Free" => CellRule::Text(EnvironmentalField::HalogenFree),
        "RoHS" => CellRule::RohsDate,
        "RoHS (2015/863/EU) Certificate" => CellRule::Link(EnvironmentalField::RohsCertificateLink),
        "REACH (SVHC's) Declaration" => CellRule::Link(EnvironmentalField::ReachDeclarationLink),
        "IPC-Material Declaration" => CellRule::Link(EnvironmentalField::IpcMaterialDeclarationLink),
        _ => return None,
    };
    Some(rule)
}

fn link_href(cell: &ElementRef<'_>) -> Option<String> {
    cell.find_first(&DOCUMENT_LINK)
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Scrape the environmental table row, plus series and datasheet link when
/// the full page is given.
///
/// Fields that cannot be found are left out of the record.
pub fn extract(row_markup: &str, page_markup: &str) -> EnvironmentalRecord {
    let mut record = EnvironmentalRecord::default();
    let row = parse_row(row_markup);

    for cell in row.find_all(&CELL) {
        let data_value = cell.value().attr("data-value").unwrap_or("").trim();

        match rule_for(data_value) {
            Some(CellRule::Text(field)) => record.insert(field, Some(stripped_text(&cell))),
            Some(CellRule::RohsDate) => record.insert(
                EnvironmentalField::RohsDate,
                cell.find_first(&ROHS_DATE).map(|span| stripped_text(&span)),
            ),
            Some(CellRule::Link(field)) => record.insert(field, link_href(&cell)),
            None => {}
        }
    }

    if !page_markup.is_empty() {
        let page = parse_page(page_markup);

        record.insert(
            EnvironmentalField::Series,
            page.find_first(&SERIES)
                .and_then(|span| series_name(&stripped_text(&span))),
        );

        record.insert(
            EnvironmentalField::DatasheetLink,
            page.find_first(&SIDE_DATASHEET_LINK)
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string),
        );
    }

    debug!("Extracted {} environmental fields", record.len());
    record
}

/// The text after the last `Series:` marker.
fn series_name(text: &str) -> Option<String> {
    text.rsplit_once(SERIES_MARKER)
        .and_then(|(_, name)| non_empty(name))
}

/// Outer HTML of the first body row of the environmental table, in document
/// order.
pub fn find_environmental_row(page_markup: &str) -> Option<String> {
    let page = parse_page(page_markup);
    page.find_first(&ENVIRONMENTAL_ROW).map(|row| row.html())
}
