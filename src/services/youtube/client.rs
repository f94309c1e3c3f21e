use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use url::Url;

use crate::ports::catalog::{CatalogClient, CatalogItem, CatalogPage};
use crate::youtube_rs::playlist_items::{
    PlaylistItem, delete_playlist_item, insert_playlist_item, list_playlist_items,
};
use crate::youtube_rs::{CatalogError, Credential};

/// Authenticated handle to the YouTube Data API.
pub struct YoutubeHttpAdapter {
    client: Client,
    base_url: Url,
    credential: Credential,
}

impl YoutubeHttpAdapter {
    pub fn new(base_url: &str, credential: Credential, timeout: Duration) -> Result<Self> {
        // Url::join drops the last path segment unless it ends in a slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .wrap_err_with(|| format!("Invalid YouTube API base url: {base_url}"))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .wrap_err("Failed to build http client")?;

        Ok(Self {
            client,
            base_url,
            credential,
        })
    }
}

impl From<PlaylistItem> for CatalogItem {
    fn from(item: PlaylistItem) -> Self {
        CatalogItem {
            id: item.id,
            video_id: item.content_details.and_then(|details| details.video_id),
            title: item.snippet.and_then(|snippet| snippet.title),
        }
    }
}

#[async_trait::async_trait]
impl CatalogClient for YoutubeHttpAdapter {
    async fn list_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
        max_results: u32,
    ) -> Result<CatalogPage, CatalogError> {
        let response = list_playlist_items(
            &self.client,
            &self.base_url,
            &self.credential,
            playlist_id,
            page_token.as_deref(),
            max_results,
        )
        .await?;

        Ok(CatalogPage {
            items: response
                .items
                .map(|items| items.into_iter().map(CatalogItem::from).collect()),
            next_page_token: response.next_page_token,
        })
    }

    async fn insert(&self, playlist_id: &str, video_id: &str) -> Result<(), CatalogError> {
        insert_playlist_item(
            &self.client,
            &self.base_url,
            &self.credential,
            playlist_id,
            video_id,
        )
        .await
    }

    async fn delete(&self, entry_id: &str) -> Result<(), CatalogError> {
        delete_playlist_item(&self.client, &self.base_url, &self.credential, entry_id).await
    }
}
