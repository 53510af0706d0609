use async_trait::async_trait;
use medcare_core::constants::FALLBACK_IMAGE_URL;
use medcare_core::{ProviderError, Summary, SummaryProvider};

use crate::{parse_base_url, LookupError};

/// MedlinePlus health-topics search.
///
/// The service answers with XML that is not parsed; a successful, non-empty answer yields a
/// pointer entry telling the reader to consult MedlinePlus.
pub struct MedlinePlusProvider {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl MedlinePlusProvider {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, LookupError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn query_url(&self) -> Result<reqwest::Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["ws", "query"]);
        Ok(url)
    }

    async fn fetch(&self, query: &str) -> Result<Option<Summary>, LookupError> {
        let body = self
            .client
            .get(self.query_url()?)
            .query(&[("db", "healthTopics"), ("term", query)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if body.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(Summary {
            title: format!("Info on {query}"),
            description: "See MedlinePlus for trusted medical guidance.".into(),
            category: "MedlinePlus".into(),
            image: FALLBACK_IMAGE_URL.into(),
        }))
    }
}

#[async_trait]
impl SummaryProvider for MedlinePlusProvider {
    fn name(&self) -> &str {
        "medlineplus"
    }

    async fn lookup(&self, query: &str) -> Result<Option<Summary>, ProviderError> {
        Ok(self.fetch(query).await?)
    }
}
