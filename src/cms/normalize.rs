// cms/normalize.rs
//! Shapes raw CMS entries into the views the blog renders.
//!
//! Entries come in several shapes depending on CMS version and how the
//! content type was modelled (wrapped in `attributes` or flat, relations as
//! `data.attributes` or plain objects or strings). Every field is looked up
//! through an ordered list of candidates and falls back to a fixed default.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

pub const DEFAULT_AUTHOR: &str = "Trade Pilot";
pub const DEFAULT_READ_TIME: &str = "5 min read";
pub const DEFAULT_CATEGORY: &str = "General";
const EXCERPT_CHARS: usize = 220;

#[derive(Debug, Clone, PartialEq)]
pub struct MediaView {
    pub url: String,
    pub alt: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    RichText { body: String },
    Quote { title: Option<String>, body: String },
    Media(MediaView),
    Slider(Vec<MediaView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleView {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub category: String,
    pub image: Option<String>,
    pub featured: bool,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorView {
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// The entry's own fields, whether or not they are wrapped in `attributes`.
fn attributes(item: &Value) -> &Value {
    match item.get("attributes") {
        Some(attr) if attr.is_object() => attr,
        _ => item,
    }
}

/// Non-empty string at a JSON pointer.
fn text(v: &Value, pointer: &str) -> Option<String> {
    v.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_text(v: &Value, pointers: &[&str]) -> Option<String> {
    pointers.iter().find_map(|p| text(v, p))
}

/// Ids may arrive as numbers or strings.
fn id_string(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Prefix relative media paths with the CMS origin.
pub fn absolute_media_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//") {
        url.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

fn strip_markup(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_tag = false;
    for c in body.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            '#' | '>' | '*' | '_' | '`' => {}
            _ => out.push(c),
        }
    }
    out
}

fn excerpt_from_body(body: &str) -> String {
    strip_markup(body).trim().chars().take(EXCERPT_CHARS).collect()
}

/// "2025-01-15T10:00:00.000Z" becomes "15 January 2025".
pub fn format_published(raw: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%-d %B %Y").to_string());
    }
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%-d %B %Y").to_string())
}

fn media_from_attributes(base_url: &str, attr: &Value) -> Option<MediaView> {
    let url = text(attr, "/url")?;
    Some(MediaView {
        url: absolute_media_url(base_url, &url),
        alt: text(attr, "/alternativeText").unwrap_or_default(),
        caption: text(attr, "/caption"),
    })
}

/// A single media relation: `{data: {attributes: {...}}}` or a flat object.
fn media(base_url: &str, v: &Value) -> Option<MediaView> {
    match v.get("data") {
        Some(data) if data.is_object() => media_from_attributes(base_url, attributes(data)),
        _ => media_from_attributes(base_url, v),
    }
}

/// A multi-media relation: `{data: [...]}` or a plain array.
fn media_list(base_url: &str, v: &Value) -> Vec<MediaView> {
    let items = match v.get("data") {
        Some(Value::Array(items)) => items.as_slice(),
        _ => v.as_array().map(Vec::as_slice).unwrap_or(&[]),
    };
    items
        .iter()
        .filter_map(|item| media_from_attributes(base_url, attributes(item)))
        .collect()
}

fn block(base_url: &str, v: &Value) -> Option<Block> {
    match v.get("__component").and_then(Value::as_str)? {
        "shared.rich-text" => Some(Block::RichText {
            body: text(v, "/body")?,
        }),
        "shared.quote" => Some(Block::Quote {
            title: text(v, "/title"),
            body: text(v, "/body")?,
        }),
        "shared.media" => v.get("file").and_then(|f| media(base_url, f)).map(Block::Media),
        "shared.slider" => {
            let images = v.get("files").map(|f| media_list(base_url, f)).unwrap_or_default();
            (!images.is_empty()).then_some(Block::Slider(images))
        }
        _ => None,
    }
}

fn cover_image(attr: &Value) -> Option<String> {
    first_text(
        attr,
        &[
            "/cover/formats/large/url",
            "/cover/formats/medium/url",
            "/cover/formats/thumbnail/url",
            "/cover/url",
            "/cover/data/attributes/url",
            "/image/data/attributes/url",
            "/image/url",
            "/thumbnail/data/attributes/url",
        ],
    )
}

pub fn normalize_article(base_url: &str, item: &Value) -> ArticleView {
    let attr = attributes(item);

    let id = id_string(item.get("id"))
        .or_else(|| id_string(attr.get("id")))
        .unwrap_or_default();

    let raw_blocks = attr.get("blocks").and_then(Value::as_array);

    let excerpt = first_text(attr, &["/description", "/excerpt"])
        .or_else(|| {
            let first = raw_blocks?.first()?;
            first.get("body").and_then(Value::as_str).map(excerpt_from_body)
        })
        .unwrap_or_default();

    let author = first_text(attr, &["/author/data/attributes/name", "/authorName", "/author", "/author/name"])
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    let date = text(attr, "/publishedAt")
        .and_then(|raw| format_published(&raw))
        .or_else(|| text(attr, "/date"))
        .unwrap_or_default();

    let read_time = first_text(attr, &["/readTime", "/read_time", "/read"])
        .unwrap_or_else(|| DEFAULT_READ_TIME.to_string());

    let category = first_text(
        attr,
        &[
            "/category/data/attributes/name",
            "/category/name",
            "/category",
            "/categories/data/0/attributes/name",
            "/categories/0/name",
        ],
    )
    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let image = cover_image(attr).map(|url| absolute_media_url(base_url, &url));

    let slug = text(attr, "/slug").unwrap_or_else(|| id.clone());

    let blocks = raw_blocks
        .map(|blocks| blocks.iter().filter_map(|b| block(base_url, b)).collect())
        .unwrap_or_default();

    ArticleView {
        id,
        slug,
        title: text(attr, "/title").unwrap_or_default(),
        excerpt,
        author,
        date,
        read_time,
        category,
        image,
        featured: attr.get("featured").and_then(Value::as_bool).unwrap_or(false),
        blocks,
    }
}

pub fn normalize_author(base_url: &str, item: &Value) -> Option<AuthorView> {
    let attr = attributes(item);
    Some(AuthorView {
        name: text(attr, "/name")?,
        bio: first_text(attr, &["/bio", "/description"]),
        avatar: attr.get("avatar").and_then(|a| media(base_url, a)).map(|m| m.url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://cms.test";

    #[test]
    fn wrapped_entry_with_relations() {
        let item = json!({
            "id": 7,
            "attributes": {
                "title": "Kitchen guide",
                "slug": "kitchen-guide",
                "description": "Plan it right",
                "author": { "data": { "attributes": { "name": "Sarah Mitchell" } } },
                "publishedAt": "2025-01-15T10:00:00.000Z",
                "readTime": "12 min read",
                "category": { "data": { "attributes": { "name": "Home Renovation" } } },
                "cover": { "formats": { "medium": { "url": "/uploads/k.jpg" } } },
                "featured": true
            }
        });

        let a = normalize_article(BASE, &item);
        assert_eq!(a.id, "7");
        assert_eq!(a.slug, "kitchen-guide");
        assert_eq!(a.excerpt, "Plan it right");
        assert_eq!(a.author, "Sarah Mitchell");
        assert_eq!(a.date, "15 January 2025");
        assert_eq!(a.read_time, "12 min read");
        assert_eq!(a.category, "Home Renovation");
        assert_eq!(a.image.as_deref(), Some("https://cms.test/uploads/k.jpg"));
        assert!(a.featured);
    }

    #[test]
    fn flat_entry_falls_back_to_defaults() {
        let a = normalize_article(BASE, &json!({ "id": 3, "title": "Bare" }));
        assert_eq!(a.slug, "3");
        assert_eq!(a.author, DEFAULT_AUTHOR);
        assert_eq!(a.read_time, DEFAULT_READ_TIME);
        assert_eq!(a.category, DEFAULT_CATEGORY);
        assert_eq!(a.date, "");
        assert_eq!(a.image, None);
        assert!(!a.featured);
    }

    #[test]
    fn excerpt_comes_from_first_block_without_markup() {
        let long = format!("## Heading <b>bold</b> *x* {}", "a".repeat(400));
        let a = normalize_article(
            BASE,
            &json!({ "id": 1, "blocks": [{ "__component": "shared.rich-text", "body": long }] }),
        );
        assert!(a.excerpt.starts_with("Heading bold x aaa"));
        assert!(!a.excerpt.contains('<'));
        assert_eq!(a.excerpt.chars().count(), 220);
    }

    #[test]
    fn string_author_and_category() {
        let a = normalize_article(
            BASE,
            &json!({ "id": 1, "author": "Jo", "category": "Plumbing", "date": "Spring 2024" }),
        );
        assert_eq!(a.author, "Jo");
        assert_eq!(a.category, "Plumbing");
        assert_eq!(a.date, "Spring 2024");
    }

    #[test]
    fn blocks_are_shaped_and_unknown_ones_dropped() {
        let a = normalize_article(
            BASE,
            &json!({
                "id": 1,
                "blocks": [
                    { "__component": "shared.rich-text", "body": "Hello" },
                    { "__component": "shared.quote", "title": "Tip", "body": "Measure twice" },
                    { "__component": "shared.media", "file": { "data": { "attributes": { "url": "/a.png", "caption": "A" } } } },
                    { "__component": "shared.slider", "files": { "data": [ { "attributes": { "url": "https://img/b.png" } } ] } },
                    { "__component": "shared.unknown", "body": "ignored" }
                ]
            }),
        );

        assert_eq!(a.blocks.len(), 4);
        assert_eq!(a.blocks[0], Block::RichText { body: "Hello".into() });
        assert!(matches!(&a.blocks[1], Block::Quote { title: Some(t), .. } if t == "Tip"));
        match &a.blocks[2] {
            Block::Media(m) => {
                assert_eq!(m.url, "https://cms.test/a.png");
                assert_eq!(m.caption.as_deref(), Some("A"));
            }
            other => panic!("expected media, got {other:?}"),
        }
        assert!(matches!(&a.blocks[3], Block::Slider(images) if images[0].url == "https://img/b.png"));
    }

    #[test]
    fn author_entries_need_a_name() {
        assert!(normalize_author(BASE, &json!({ "id": 1 })).is_none());
        let author = normalize_author(
            BASE,
            &json!({ "attributes": { "name": "Sarah", "bio": "Designer" } }),
        )
        .unwrap();
        assert_eq!(author.bio.as_deref(), Some("Designer"));
    }
}
