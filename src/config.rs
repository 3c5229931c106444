use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = "compliance_scraper";
const ENV_PREFIX: &str = "COMPLIANCE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog home page a session starts from.
    pub base_url: String,
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub snapshot_dir: PathBuf,
    /// Ask for a single part number on stdin instead of reading the input file.
    pub manual_mode: bool,
    /// Remove each processed part from the input file.
    pub modify_input: bool,
    pub delay_between_parts_ms: u64,
    pub json_logs: bool,
}

impl Config {
    /// Defaults, then `compliance_scraper.toml` if present, then
    /// `COMPLIANCE_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::builder()?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = config::Config::builder()
            .set_default("base_url", "https://www.littelfuse.com/")?
            .set_default("input_file", "input.csv")?
            .set_default("output_dir", ".")?
            .set_default("output_prefix", "output")?
            .set_default("snapshot_dir", "snapshots")?
            .set_default("manual_mode", false)?
            .set_default("modify_input", false)?
            .set_default("delay_between_parts_ms", 5000_i64)?
            .set_default("json_logs", false)?;

        Ok(builder)
    }
}
