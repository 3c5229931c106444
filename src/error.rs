use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid selector '{css}': {message}")]
    InvalidSelector { css: String, message: String },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No saved {page} page for part '{part}' at {path}")]
    PageMissing {
        part: String,
        page: &'static str,
        path: PathBuf,
    },

    #[error("No page loaded yet, search for a part first")]
    NoPageLoaded,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
