use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::CategoryRecord;

/// A category or tag with the number of posts filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub name: String,
    pub slug: String,
    pub post_count: u64,
}

impl Taxonomy {
    pub fn to_record(&self) -> CategoryRecord {
        CategoryRecord::new(self.name.clone(), self.post_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRef {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Option<TaxonomyRef>,
    pub tags: Vec<TaxonomyRef>,
}

// Strapi v4 wraps entity fields in `attributes`; flat payloads don't.
fn fields(item: &Value) -> &Value {
    match item.get("attributes") {
        Some(attrs) if attrs.is_object() => attrs,
        _ => item,
    }
}

fn str_field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}

/// Items of a collection response: `{ data: [...] }` or a bare array.
pub fn collection_items(body: &Value) -> Vec<&Value> {
    match body {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(item) if item.is_object() => vec![item],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Members of a relation field, flat (`[...]`, `{...}`) or wrapped (`{ data: ... }`).
fn relation_items(value: Option<&Value>) -> Vec<&Value> {
    let Some(value) = value else {
        return Vec::new();
    };
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(item) if item.is_object() => vec![item],
            Some(_) => Vec::new(),
            None => vec![value],
        },
        _ => Vec::new(),
    }
}

/// Post count carried by a relation: a list's length, or a populated
/// `count` (`{ count }` or `{ data: { attributes: { count } } }`).
fn relation_count(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    if let Some(count) = value.get("count").and_then(Value::as_u64) {
        return Some(count);
    }
    match value.get("data") {
        Some(Value::Array(items)) => Some(items.len() as u64),
        Some(data) if data.is_object() => fields(data).get("count").and_then(Value::as_u64),
        Some(Value::Null) => Some(0),
        Some(_) => None,
        None => value.as_array().map(|items| items.len() as u64),
    }
}

pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn taxonomy_ref(item: &Value) -> TaxonomyRef {
    let f = fields(item);
    let record = CategoryRecord::from_parts(str_field(f, "name"), None);
    let slug = str_field(f, "slug")
        .map(str::to_string)
        .unwrap_or_else(|| slugify(&record.name));
    TaxonomyRef {
        name: record.name,
        slug,
    }
}

pub fn normalize_taxonomy(item: &Value) -> Taxonomy {
    let f = fields(item);
    let count = relation_count(f.get("posts"))
        .or_else(|| f.get("count").and_then(Value::as_u64));
    let record = CategoryRecord::from_parts(str_field(f, "name"), count);
    let slug = str_field(f, "slug")
        .map(str::to_string)
        .unwrap_or_else(|| slugify(&record.name));
    Taxonomy {
        name: record.name,
        slug,
        post_count: record.count,
    }
}

pub fn normalize_taxonomies(body: &Value) -> Vec<Taxonomy> {
    collection_items(body)
        .into_iter()
        .map(normalize_taxonomy)
        .collect()
}

fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("ignoring unparseable date '{raw}': {e}");
            None
        }
    }
}

pub fn normalize_post(item: &Value) -> PostSummary {
    let f = fields(item);
    let title = str_field(f, "title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Untitled")
        .to_string();
    let slug = str_field(f, "slug")
        .map(str::to_string)
        .unwrap_or_else(|| slugify(&title));
    let published_at = parse_date(
        str_field(f, "publishedAt")
            .or_else(|| str_field(f, "published_at"))
            .or_else(|| str_field(f, "createdAt")),
    );
    let category = relation_items(f.get("category"))
        .first()
        .copied()
        .map(taxonomy_ref);
    let tags = relation_items(f.get("tags"))
        .into_iter()
        .map(taxonomy_ref)
        .collect();
    PostSummary {
        title,
        slug,
        published_at,
        category,
        tags,
    }
}

pub fn normalize_posts(body: &Value) -> Vec<PostSummary> {
    let mut posts = collection_items(body)
        .into_iter()
        .map(normalize_post)
        .collect::<Vec<_>>();
    // newest first, undated last
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    posts
}
