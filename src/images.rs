//! Image URL checks for new tasks.
//!
//! A task keeps its image URL only when the URL answers with an `image/*`
//! content type. HEAD is tried first; some hosts reject it, so a GET follows.

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

pub trait ImageValidator {
    fn is_loadable(&self, url: &str) -> bool;
}

/// Only accepts well-formed http(s) URLs
pub fn parse_image_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url),
        _ => None,
    }
}

pub struct HttpImageValidator {
    client: Option<Client>,
}

impl HttpImageValidator {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("taskitto/", env!("CARGO_PKG_VERSION")))
            .build();
        match client {
            Ok(client) => Self {
                client: Some(client),
            },
            Err(e) => {
                tracing::warn!(error = %e, "http client unavailable, images will be dropped");
                Self { client: None }
            }
        }
    }
}

fn is_image_response(response: &Response) -> bool {
    response.status().is_success()
        && response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(false)
}

impl ImageValidator for HttpImageValidator {
    fn is_loadable(&self, raw: &str) -> bool {
        let Some(url) = parse_image_url(raw) else {
            return false;
        };
        let Some(client) = &self.client else {
            return false;
        };

        match client.head(url.clone()).send() {
            Ok(response) if is_image_response(&response) => return true,
            Ok(response) => {
                tracing::debug!(%url, status = %response.status(), "HEAD did not confirm image")
            }
            Err(e) => tracing::debug!(%url, error = %e, "HEAD failed"),
        }

        match client.get(url.clone()).send() {
            Ok(response) => is_image_response(&response),
            Err(e) => {
                tracing::info!(%url, error = %e, "image URL unreachable");
                false
            }
        }
    }
}

/// No network access; any well-formed http(s) URL passes
#[derive(Debug, Default)]
pub struct OfflineImageValidator;

impl ImageValidator for OfflineImageValidator {
    fn is_loadable(&self, url: &str) -> bool {
        parse_image_url(url).is_some()
    }
}
