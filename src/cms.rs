//! Headless CMS (Strapi) access. Responses are normalized here, once, into
//! the shapes the rest of the site works with.

#[cfg(any(feature = "ssr", test))]
mod cache;
#[cfg(feature = "ssr")]
mod client;
mod normalize;

#[cfg(feature = "ssr")]
pub use client::CmsClient;
pub use normalize::{
    collection_items, normalize_post, normalize_posts, normalize_taxonomies, normalize_taxonomy,
    slugify, PostSummary, Taxonomy, TaxonomyRef,
};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CmsError {
    #[error("CMS request failed: {0}")]
    Request(String),
    #[error("CMS responded with status {0}")]
    Status(u16),
    #[error("Couldn't decode CMS response: {0}")]
    Decode(String),
    #[error("{0} not found")]
    NotFound(String),
}
