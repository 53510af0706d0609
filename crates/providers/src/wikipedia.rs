use async_trait::async_trait;
use medcare_core::constants::FALLBACK_IMAGE_URL;
use medcare_core::{ProviderError, Summary, SummaryProvider};
use serde::Deserialize;

use crate::{parse_base_url, LookupError};

/// Wikipedia REST `page/summary` lookup.
///
/// Contributes an entry only when the page summary carries an `extract`.
pub struct WikipediaProvider {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

#[derive(Deserialize)]
struct PageSummary {
    title: Option<String>,
    extract: Option<String>,
    thumbnail: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    source: Option<String>,
}

impl WikipediaProvider {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, LookupError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn summary_url(&self, query: &str) -> Result<reqwest::Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["page", "summary", query]);
        Ok(url)
    }

    async fn fetch(&self, query: &str) -> Result<Option<Summary>, LookupError> {
        let page: PageSummary = self
            .client
            .get(self.summary_url(query)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(page
            .extract
            .filter(|extract| !extract.trim().is_empty())
            .map(|extract| Summary {
                title: page
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| query.to_string()),
                description: extract,
                category: "Wikipedia".into(),
                image: page
                    .thumbnail
                    .and_then(|t| t.source)
                    .unwrap_or_else(|| FALLBACK_IMAGE_URL.to_string()),
            }))
    }
}

#[async_trait]
impl SummaryProvider for WikipediaProvider {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn lookup(&self, query: &str) -> Result<Option<Summary>, ProviderError> {
        Ok(self.fetch(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dead_upstream, spawn_upstream};
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn summary(Path(title): Path<String>) -> Result<Json<Value>, StatusCode> {
        match title.as_str() {
            "Hand washing" => Ok(Json(json!({
                "title": "Hand washing",
                "extract": "Hand washing is the act of cleaning one's hands.",
                "thumbnail": { "source": "https://upload.example/hands.jpg" }
            }))),
            "Bare" => Ok(Json(json!({ "extract": "No title or image here." }))),
            "Stub" => Ok(Json(json!({ "title": "Stub", "extract": "" }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn provider() -> WikipediaProvider {
        let base = spawn_upstream(Router::new().route("/page/summary/:title", get(summary))).await;
        WikipediaProvider::new(reqwest::Client::new(), &base).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_maps_page_summary() {
        let found = provider().await.lookup("Hand washing").await.unwrap().unwrap();
        assert_eq!(found.title, "Hand washing");
        assert_eq!(found.category, "Wikipedia");
        assert!(found.description.starts_with("Hand washing is"));
        assert_eq!(found.image, "https://upload.example/hands.jpg");
    }

    #[tokio::test]
    async fn test_lookup_falls_back_to_query_and_placeholder() {
        let found = provider().await.lookup("Bare").await.unwrap().unwrap();
        assert_eq!(found.title, "Bare");
        assert_eq!(found.image, FALLBACK_IMAGE_URL);
    }

    #[tokio::test]
    async fn test_lookup_without_extract_contributes_nothing() {
        assert_eq!(provider().await.lookup("Stub").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_lookup_reports_http_errors() {
        assert!(provider().await.lookup("Missing page").await.is_err());

        let dead = WikipediaProvider::new(reqwest::Client::new(), &dead_upstream().await).unwrap();
        assert!(dead.lookup("anything").await.is_err());
    }

    #[test]
    fn test_summary_url_encodes_query() {
        let provider =
            WikipediaProvider::new(reqwest::Client::new(), "https://en.wikipedia.org/api/rest_v1/")
                .unwrap();
        let url = provider.summary_url("hand washing/soap").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/hand%20washing%2Fsoap"
        );
    }
}
