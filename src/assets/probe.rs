// src/assets/probe.rs
// =============================================================================
// Finds out how big a remote image is.
//
// The probe is a seam (trait) so extraction can be tested without a network.
// The HTTP implementation downloads the image and lets the `image` crate read
// just its header; any failure along the way means "unknown", never an error.
// =============================================================================

use async_trait::async_trait;
use image::ImageReader;
use reqwest::Client;
use std::io::Cursor;
use url::Url;

use super::types::Dimensions;

#[async_trait]
pub trait SizeProbe: Send + Sync {
    /// Width and height of the image at `url`, or `None` if it can't be told.
    async fn probe(&self, url: &Url) -> Option<Dimensions>;
}

/// Probes images over HTTP using the crawl's shared client.
#[derive(Debug, Clone)]
pub struct HttpSizeProbe {
    client: Client,
}

impl HttpSizeProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SizeProbe for HttpSizeProbe {
    async fn probe(&self, url: &Url) -> Option<Dimensions> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Size probe request for {} failed: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Size probe for {} got HTTP {}", url, response.status());
            return None;
        }

        let bytes = response.bytes().await.ok()?;
        match dimensions_of(&bytes) {
            Some(dims) => Some(dims),
            None => {
                tracing::debug!("Could not decode image header at {}", url);
                None
            }
        }
    }
}

// Reads width/height from encoded image bytes without decoding pixels.
fn dimensions_of(bytes: &[u8]) -> Option<Dimensions> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;
    Some(Dimensions::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        img.write_with_encoder(encoder).unwrap();
        buf
    }

    #[test]
    fn test_dimensions_of_png() {
        assert_eq!(dimensions_of(&make_png(12, 7)), Some(Dimensions::new(12, 7)));
    }

    #[test]
    fn test_dimensions_of_garbage() {
        assert_eq!(dimensions_of(b"definitely not an image"), None);
    }

    #[tokio::test]
    async fn test_http_probe_reads_served_image() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/content/z1/large"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(make_png(32, 18)))
            .mount(&server)
            .await;

        let probe = HttpSizeProbe::new(Client::new());
        let url = Url::parse(&format!("{}/content/z1/large", server.uri())).unwrap();
        assert_eq!(probe.probe(&url).await, Some(Dimensions::new(32, 18)));
    }

    #[tokio::test]
    async fn test_http_probe_missing_image_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let probe = HttpSizeProbe::new(Client::new());
        let url = Url::parse(&format!("{}/content/z1/small", server.uri())).unwrap();
        assert_eq!(probe.probe(&url).await, None);
    }
}
