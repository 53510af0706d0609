//! # MedCare Providers
//!
//! HTTP implementations of [`medcare_core::SummaryProvider`] used to augment preventive tip
//! searches:
//! - [`WikipediaProvider`]: Wikipedia REST page summary
//! - [`MedlinePlusProvider`]: MedlinePlus health-topics web service
//!
//! Both share one `reqwest::Client` carrying the configured timeout.

#![warn(rust_2018_idioms)]

mod medlineplus;
mod wikipedia;

pub use medlineplus::MedlinePlusProvider;
pub use wikipedia::WikipediaProvider;

use std::sync::Arc;

use medcare_core::{CoreConfig, ProviderKind, SummaryProvider};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid provider base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Builds the HTTP client shared by all providers.
pub fn http_client(cfg: &CoreConfig) -> Result<reqwest::Client, LookupError> {
    let client = reqwest::Client::builder()
        .timeout(cfg.provider_timeout())
        .user_agent(concat!("medcare/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Builds the providers enabled in `cfg`, in configured order.
pub fn build_providers(cfg: &CoreConfig) -> Result<Vec<Arc<dyn SummaryProvider>>, LookupError> {
    let client = http_client(cfg)?;

    cfg.providers()
        .iter()
        .map(|kind| -> Result<Arc<dyn SummaryProvider>, LookupError> {
            tracing::info!("enabling {} summary provider", kind);
            Ok(match kind {
                ProviderKind::Wikipedia => {
                    Arc::new(WikipediaProvider::new(client.clone(), cfg.wikipedia_url())?)
                }
                ProviderKind::MedlinePlus => {
                    Arc::new(MedlinePlusProvider::new(client.clone(), cfg.medlineplus_url())?)
                }
            })
        })
        .collect()
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<reqwest::Url, LookupError> {
    let url = reqwest::Url::parse(base_url.trim_end_matches('/'))
        .map_err(|_| LookupError::InvalidBaseUrl(base_url.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(LookupError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(url)
}
