use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::SessionError;
use crate::models::{EnvironmentalField, EnvironmentalRecord, NavigationOutcome, OutputRow};
use crate::parsers::{classify, extract, extract_datasheet_link};
use crate::session::{CatalogSession, SessionFactory};
use crate::storage::{write_remaining_parts, PartList, RecordSink};

/// Where the part numbers for a run come from.
#[derive(Debug, Clone)]
pub enum PartSource {
    File { path: PathBuf, list: PartList },
    Manual(String),
}

impl PartSource {
    fn part_numbers(&self) -> Vec<String> {
        match self {
            PartSource::File { list, .. } => list.part_numbers.clone(),
            PartSource::Manual(part) => vec![part.clone()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub with_record: usize,
    pub without_record: usize,
}

/// Search for one part and scrape its environmental data.
///
/// Every failure along the way is logged and yields `None`.
pub async fn scrape_record(session: &mut dyn CatalogSession, part_number: &str) -> Option<EnvironmentalRecord> {
    match navigate_and_extract(session, part_number).await {
        Ok(record) => record,
        Err(e) => {
            error!("Browser session failed for {}: {}", part_number, e);
            None
        }
    }
}

async fn navigate_and_extract(
    session: &mut dyn CatalogSession,
    part_number: &str,
) -> Result<Option<EnvironmentalRecord>, SessionError> {
    session.search(part_number).await?;

    let page = session.page_source().await?;
    let outcome = classify(&page).outcome();
    debug!("Navigation outcome for {}: {}", part_number, outcome);

    match &outcome {
        NavigationOutcome::List => {
            if !session.open_first_result().await? {
                error!("First search result did not load for {}", part_number);
                return Ok(None);
            }
            scrape_current_page(session).await
        }
        NavigationOutcome::Failed => {
            info!("No part found or unknown redirect for {}", part_number);
            Ok(None)
        }
        NavigationOutcome::Item(detected) => {
            info!("Landed on direct item page. Detected part: {}", detected);
            if !outcome.matches_part(part_number) {
                warn!(
                    "Detected part '{}' does not match expected '{}'. Skipping...",
                    detected, part_number
                );
                return Ok(None);
            }
            scrape_current_page(session).await
        }
    }
}

async fn scrape_current_page(session: &mut dyn CatalogSession) -> Result<Option<EnvironmentalRecord>, SessionError> {
    let Some(row) = session.environmental_row().await? else {
        error!("Couldn't locate environmental table row");
        return Ok(None);
    };

    let page = session.page_source().await?;
    let mut record = extract(&row, &page);
    if record.is_empty() {
        warn!("Environmental row had no recognizable fields");
    }

    if !record.contains(EnvironmentalField::DatasheetLink) {
        record.insert(EnvironmentalField::DatasheetLink, extract_datasheet_link(&page));
    }

    debug!("{}", serde_json::to_string_pretty(&record).unwrap_or_default());
    Ok(Some(record))
}

/// Scrape every part from `source`, one fresh session per part.
pub async fn run(
    config: &Config,
    mut source: PartSource,
    factory: &dyn SessionFactory,
    sink: &mut dyn RecordSink,
) -> Result<RunSummary> {
    let parts = source.part_numbers();
    let mut summary = RunSummary::default();

    for (index, part_number) in parts.iter().enumerate() {
        info!("Starting scrape for: {}", part_number);

        let record = match factory.open().await {
            Ok(mut session) => {
                let record = scrape_record(session.as_mut(), part_number).await;
                match session.close().await {
                    Ok(()) => info!("Browser closed."),
                    Err(e) => warn!("Failed to close browser session: {}", e),
                }
                record
            }
            Err(e) => {
                error!("Could not open browser session for {}: {}", part_number, e);
                None
            }
        };

        sink.write_row(&OutputRow::new(part_number, record.as_ref()))?;

        summary.processed += 1;
        if record.is_some() {
            summary.with_record += 1;
        } else {
            summary.without_record += 1;
        }

        if let PartSource::File { path, list } = &mut source {
            if config.modify_input {
                info!("Removing processed part '{}' from input CSV", part_number);
                match write_remaining_parts(path.as_path(), list, part_number) {
                    Ok(remaining) => *list = remaining,
                    Err(e) => error!("Failed to update input file: {:#}", e),
                }
            }
        }

        if matches!(source, PartSource::Manual(_)) {
            info!("Manual mode: finished single scrape.");
            break;
        }

        if index + 1 < parts.len() && config.delay_between_parts_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.delay_between_parts_ms)).await;
        }
    }

    info!(
        "Processed {} parts ({} with data, {} without)",
        summary.processed, summary.with_record, summary.without_record
    );
    Ok(summary)
}
