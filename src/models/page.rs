use super::{STATUS_LIST_OF_ITEMS, STATUS_NAVIGATION_FAILED};
use std::fmt;

/// What kind of page the browser landed on after a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageClassification {
    NoResults,
    ListOfItems,
    DirectItem(String),
    Unknown,
}

/// The outcome the pipeline branches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Failed,
    List,
    Item(String),
}

impl PageClassification {
    /// Collapses the classification into a navigation outcome.
    ///
    /// `NoResults` and `Unknown` are indistinguishable to callers.
    pub fn outcome(&self) -> NavigationOutcome {
        match self {
            PageClassification::NoResults | PageClassification::Unknown => NavigationOutcome::Failed,
            PageClassification::ListOfItems => NavigationOutcome::List,
            PageClassification::DirectItem(id) => NavigationOutcome::Item(id.clone()),
        }
    }
}

impl NavigationOutcome {
    /// True when a direct item page shows the part that was searched for.
    pub fn matches_part(&self, expected: &str) -> bool {
        match self {
            NavigationOutcome::Item(id) => id.to_lowercase() == expected.trim().to_lowercase(),
            _ => false,
        }
    }
}

impl fmt::Display for NavigationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationOutcome::Failed => write!(f, "{}", STATUS_NAVIGATION_FAILED),
            NavigationOutcome::List => write!(f, "{}", STATUS_LIST_OF_ITEMS),
            NavigationOutcome::Item(id) => write!(f, "{}", id),
        }
    }
}
