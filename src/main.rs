use anyhow::{bail, Result};
use std::io::{self, Write};
use tracing::info;

mod config;
mod error;
mod models;
mod parsers;
mod pipeline;
mod session;
mod storage;

use crate::config::Config;
use crate::pipeline::PartSource;
use crate::session::SnapshotFactory;
use crate::storage::{read_part_numbers, timestamped_output_path, CsvOutput};

fn init_logging(json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("compliance_scraper=info".parse()?);

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    Ok(())
}

fn prompt_part_number() -> Result<String> {
    print!("Enter a part number to search for: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let part = line.trim().to_string();
    if part.is_empty() {
        bail!("No part number entered");
    }
    Ok(part)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(config.json_logs)?;

    info!("Starting Compliance Scraper");

    let source = if config.manual_mode {
        PartSource::Manual(prompt_part_number()?)
    } else {
        PartSource::File {
            path: config.input_file.clone(),
            list: read_part_numbers(&config.input_file)?,
        }
    };

    let output_path = timestamped_output_path(&config.output_dir, &config.output_prefix);
    let mut output = CsvOutput::create(output_path)?;

    let factory = SnapshotFactory::new(config.snapshot_dir.clone(), config.base_url.clone());
    let summary = pipeline::run(&config, source, &factory, &mut output).await?;

    info!(
        "Wrote {} rows to {} ({} with environmental data)",
        output.rows_written(),
        output.path().display(),
        summary.with_record
    );
    Ok(())
}
