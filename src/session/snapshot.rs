use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::SessionError;
use crate::session::{CatalogSession, SessionFactory};

const SEARCH_PAGE: &str = "search.html";
const FIRST_RESULT_PAGE: &str = "first_result.html";

/// Replays pages saved from the catalog site.
///
/// For part `P` the page shown after searching is `<root>/P/search.html` and
/// the page behind the first list entry is `<root>/P/first_result.html`.
pub struct SnapshotSession {
    root: PathBuf,
    part_dir: Option<PathBuf>,
    current: Option<String>,
}

impl SnapshotSession {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            part_dir: None,
            current: None,
        }
    }

    fn dir_for(&self, part_number: &str) -> PathBuf {
        let name = part_number.trim().replace(['/', '\\'], "_");
        self.root.join(name)
    }
}

async fn read_page(path: &Path) -> Result<Option<String>, SessionError> {
    match tokio::fs::read_to_string(path).await {
        Ok(html) => Ok(Some(html)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl CatalogSession for SnapshotSession {
    async fn search(&mut self, part_number: &str) -> Result<(), SessionError> {
        let dir = self.dir_for(part_number);
        let path = dir.join(SEARCH_PAGE);

        let html = read_page(&path).await?.ok_or_else(|| SessionError::PageMissing {
            part: part_number.to_string(),
            page: "search",
            path: path.clone(),
        })?;

        info!("Typed and submitted: '{}'", part_number);
        debug!("Loaded {}", path.display());
        self.part_dir = Some(dir);
        self.current = Some(html);
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, SessionError> {
        self.current.clone().ok_or(SessionError::NoPageLoaded)
    }

    async fn open_first_result(&mut self) -> Result<bool, SessionError> {
        let dir = self.part_dir.as_ref().ok_or(SessionError::NoPageLoaded)?;
        let path = dir.join(FIRST_RESULT_PAGE);

        match read_page(&path).await? {
            Some(html) => {
                info!("Clicking on the first search result...");
                self.current = Some(html);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.part_dir = None;
        self.current = None;
        Ok(())
    }
}

/// Hands out [`SnapshotSession`]s over one snapshot directory, saved from the
/// catalog at `base_url`.
pub struct SnapshotFactory {
    root: PathBuf,
    base_url: String,
}

impl SnapshotFactory {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SessionFactory for SnapshotFactory {
    async fn open(&self) -> Result<Box<dyn CatalogSession>, SessionError> {
        info!("Opening {} from {}", self.base_url, self.root.display());
        Ok(Box::new(SnapshotSession::new(self.root.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn snapshot_root() -> TempDir {
        let root = TempDir::new().unwrap();
        let part = root.path().join("SMBJ5.0A");
        fs::create_dir_all(&part).unwrap();
        fs::write(part.join(SEARCH_PAGE), "<div class=\"list\"></div>").unwrap();
        fs::write(
            part.join(FIRST_RESULT_PAGE),
            r#"<table class="envirnonmental-table"><tbody><tr><td data-value="Pb-Free">Yes</td></tr></tbody></table>"#,
        )
        .unwrap();
        root
    }

    #[test]
    fn replays_search_and_first_result() {
        let root = snapshot_root();
        let mut session = SnapshotSession::new(root.path());

        tokio_test::block_on(async {
            session.search("SMBJ5.0A").await.unwrap();
            assert_eq!(session.page_source().await.unwrap(), "<div class=\"list\"></div>");
            assert_eq!(session.environmental_row().await.unwrap(), None);

            assert!(session.open_first_result().await.unwrap());
            let row = session.environmental_row().await.unwrap().unwrap();
            assert!(row.contains("Pb-Free"));
        });
    }

    #[test]
    fn missing_search_page() {
        let root = snapshot_root();
        let mut session = SnapshotSession::new(root.path());

        let err = tokio_test::block_on(session.search("0451005.MRL")).unwrap_err();
        assert!(matches!(err, SessionError::PageMissing { page: "search", .. }));
    }

    #[test]
    fn no_first_result() {
        let root = snapshot_root();
        fs::remove_file(root.path().join("SMBJ5.0A").join(FIRST_RESULT_PAGE)).unwrap();
        let mut session = SnapshotSession::new(root.path());

        tokio_test::block_on(async {
            session.search("SMBJ5.0A").await.unwrap();
            assert!(!session.open_first_result().await.unwrap());
        });
    }

    #[test]
    fn page_source_before_search() {
        let mut session = SnapshotSession::new("/nonexistent");
        let err = tokio_test::block_on(session.page_source()).unwrap_err();
        assert!(matches!(err, SessionError::NoPageLoaded));
    }

    #[test]
    fn factory_sessions_share_root() {
        let root = snapshot_root();
        let factory = SnapshotFactory::new(root.path(), "https://www.littelfuse.com/");

        tokio_test::block_on(async {
            let mut session = factory.open().await.unwrap();
            session.search("SMBJ5.0A").await.unwrap();
            assert!(session.open_first_result().await.unwrap());
            assert!(session.environmental_row().await.unwrap().is_some());
        });
    }

    #[test]
    fn part_numbers_with_slashes_stay_in_root() {
        let session = SnapshotSession::new("/snapshots");
        assert_eq!(session.dir_for("AB/12\\C"), PathBuf::from("/snapshots/AB_12_C"));
    }
}
