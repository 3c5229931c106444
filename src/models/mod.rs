pub mod page;
pub mod record;

pub use page::*;
pub use record::*;

// Status strings matching the catalog script's navigation results
pub const STATUS_NAVIGATION_FAILED: &str = "NAVIGATION_FAILED";
pub const STATUS_LIST_OF_ITEMS: &str = "LIST_OF_ITEMS";
