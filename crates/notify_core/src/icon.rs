use std::time::Duration;

use async_trait::async_trait;
use notify_domain::notifications::LargeIcon;
use reqwest::Url;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("icon request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("icon server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("icon could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    #[error("icon decode task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("icon fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Loads the bitmap shown as a notification's large icon.
#[async_trait]
pub trait IconSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<LargeIcon, IconError>;
}

/// Downloads icons over HTTP and decodes them off the async workers.
#[derive(Debug, Clone, Default)]
pub struct HttpIconSource {
    client: reqwest::Client,
}

impl HttpIconSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IconSource for HttpIconSource {
    async fn fetch(&self, url: &Url) -> Result<LargeIcon, IconError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IconError::Status(status));
        }
        let bytes = response.bytes().await?;
        let source = url.to_string();
        tokio::task::spawn_blocking(move || decode(source, &bytes)).await?
    }
}

pub(crate) fn decode(source: String, bytes: &[u8]) -> Result<LargeIcon, IconError> {
    let rgba = image::load_from_memory(bytes)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LargeIcon {
        source,
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Payload entry as an icon URL. Only absolute http(s) URLs qualify.
pub fn icon_url(entry: Option<&str>) -> Option<Url> {
    let url = Url::parse(entry?).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}
