use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::cache::ResponseCache;
use super::normalize::{normalize_posts, normalize_taxonomies, PostSummary, Taxonomy};
use super::CmsError;
use crate::config::CmsConfig;

/// Thin Strapi REST client. Cloning is cheap; clones share the response cache.
#[derive(Debug, Clone)]
pub struct CmsClient {
    config: CmsConfig,
    http: Client,
    cache: Arc<ResponseCache>,
}

impl CmsClient {
    pub fn new(config: CmsConfig) -> Self {
        let cache = Arc::new(ResponseCache::new(config.cache_ttl));
        Self {
            config,
            http: Client::new(),
            cache,
        }
    }

    async fn fetch(&self, collection: &str, query: &[(&str, &str)]) -> Result<Value, CmsError> {
        let key = query.iter().fold(collection.to_string(), |mut key, (k, v)| {
            key.push_str(&format!("&{k}={v}"));
            key
        });
        if let Some(body) = self.cache.get(&key, Instant::now()) {
            return Ok(body);
        }

        let url = format!("{}/api/{}", self.config.base_url, collection);
        let mut req = self.http.get(&url).query(query);
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await.map_err(|e| {
            warn!(%url, error = %e, "CMS request failed");
            CmsError::Request(e.to_string())
        })?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%url, %status, "CMS returned an error status");
            return Err(CmsError::Status(status.as_u16()));
        }
        let body = resp
            .json::<Value>()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))?;
        debug!(%url, "fetched CMS collection");

        if !self.cache.store(key, &body, Instant::now()) {
            debug!(%url, cached = self.cache.len(), "CMS response not cached");
        }
        Ok(body)
    }

    pub async fn get_categories(&self) -> Result<Vec<Taxonomy>, CmsError> {
        let body = self.fetch("categories", &[("populate", "posts")]).await?;
        Ok(normalize_taxonomies(&body))
    }

    pub async fn get_tags(&self) -> Result<Vec<Taxonomy>, CmsError> {
        let body = self.fetch("tags", &[("populate", "posts")]).await?;
        Ok(normalize_taxonomies(&body))
    }

    pub async fn get_tag_by_slug(&self, slug: &str) -> Result<Taxonomy, CmsError> {
        let body = self
            .fetch(
                "tags",
                &[("filters[slug][$eq]", slug), ("populate", "posts")],
            )
            .await?;
        normalize_taxonomies(&body)
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::NotFound(format!("tag '{slug}'")))
    }

    pub async fn get_posts(&self) -> Result<Vec<PostSummary>, CmsError> {
        let body = self
            .fetch(
                "posts",
                &[
                    ("populate[0]", "category"),
                    ("populate[1]", "tags"),
                    ("sort", "publishedAt:desc"),
                ],
            )
            .await?;
        Ok(normalize_posts(&body))
    }

    pub async fn get_posts_by_tag(&self, slug: &str) -> Result<Vec<PostSummary>, CmsError> {
        let body = self
            .fetch(
                "posts",
                &[
                    ("filters[tags][slug][$eq]", slug),
                    ("populate[0]", "category"),
                    ("populate[1]", "tags"),
                    ("sort", "publishedAt:desc"),
                ],
            )
            .await?;
        Ok(normalize_posts(&body))
    }
}
