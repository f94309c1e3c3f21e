use crate::youtube_rs::CatalogError;

/// One item of a list response, before validation.
///
/// The catalog occasionally omits fields (deleted or private videos), so every
/// field is optional here and checked when converting to a `PlaylistEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: Option<String>,
    pub video_id: Option<String>,
    pub title: Option<String>,
}

/// A single page of a playlist listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    /// `None` when the response carried no `items` field at all.
    pub items: Option<Vec<CatalogItem>>,
    pub next_page_token: Option<String>,
}

/// Port trait wrapping the catalog operations used by the sync logic.
///
/// Implementations live in `services::youtube::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
        max_results: u32,
    ) -> Result<CatalogPage, CatalogError>;

    async fn insert(&self, playlist_id: &str, video_id: &str) -> Result<(), CatalogError>;

    async fn delete(&self, entry_id: &str) -> Result<(), CatalogError>;
}
