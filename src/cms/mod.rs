//! Blog content from the headless CMS.

pub mod client;
pub mod error;
pub mod normalize;

pub use client::CmsClient;
pub use error::CmsError;
pub use normalize::{ArticleView, AuthorView, Block};

use std::time::Duration;

use tracing::warn;

use crate::cache::{article_key, QueryCache, ARTICLES_KEY};
use normalize::{normalize_article, normalize_author};

const AUTHORS_KEY: &str = "fetchAuthors";

/// Distinct article slugs kept at once.
const ARTICLE_CAPACITY: u64 = 256;

pub const ALL_POSTS: &str = "All Posts";

/// Category tabs shown above the article grid, in display order.
pub const CATEGORIES: &[&str] = &[
    ALL_POSTS,
    "Home Renovation",
    "Plumbing",
    "Electrical",
    "General",
    "Landscaping",
    "Heating",
    "Roofing",
];

#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Origin without trailing slash, e.g. "https://cms.example.com".
    pub base_url: String,
    pub token: Option<String>,
    pub site: String,
    pub page_size: u32,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

#[cfg(test)]
impl CmsConfig {
    /// Nothing listens on port 9, so every request fails fast.
    pub fn unreachable() -> Self {
        Self {
            base_url: "http://127.0.0.1:9".to_string(),
            token: None,
            site: "tradepilot".to_string(),
            page_size: 100,
            timeout: Duration::from_secs(1),
            cache_ttl: Duration::from_secs(60),
        }
    }
}

/// Category and search filter for the article list.
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub category: Option<String>,
    pub query: Option<String>,
}

impl BlogFilter {
    pub fn selected_category(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => ALL_POSTS,
        }
    }

    pub fn matches(&self, article: &ArticleView) -> bool {
        let category = self.selected_category();
        if category != ALL_POSTS && article.category != category {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                article.title.to_lowercase().contains(&q)
                    || article.excerpt.to_lowercase().contains(&q)
            }
            _ => true,
        }
    }

    pub fn apply(&self, articles: &[ArticleView]) -> Vec<ArticleView> {
        articles.iter().filter(|a| self.matches(a)).cloned().collect()
    }
}

/// First article flagged as featured, else the first article.
pub fn featured(articles: &[ArticleView]) -> Option<&ArticleView> {
    articles.iter().find(|a| a.featured).or_else(|| articles.first())
}

/// CMS reads behind caches. Failures are logged and read as empty; they are
/// never cached, so the next request tries again.
pub struct Blog {
    client: Option<CmsClient>,
    articles: QueryCache<Vec<ArticleView>>,
    article: QueryCache<ArticleView>,
    authors: QueryCache<Vec<AuthorView>>,
}

impl Blog {
    pub fn new(cfg: CmsConfig) -> Self {
        let ttl = cfg.cache_ttl;
        let client = match CmsClient::new(cfg) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!(error = %e, "CMS client unavailable; blog will be empty");
                None
            }
        };
        Self {
            client,
            articles: QueryCache::with_ttl(ttl),
            article: QueryCache::bounded(ARTICLE_CAPACITY, Some(ttl)),
            authors: QueryCache::with_ttl(ttl),
        }
    }

    pub fn articles(&self) -> Vec<ArticleView> {
        let Some(client) = &self.client else {
            return Vec::new();
        };
        self.articles
            .get_or_fetch(ARTICLES_KEY, || {
                let raw = client.fetch_articles()?;
                Ok::<_, CmsError>(
                    raw.iter()
                        .map(|item| normalize_article(client.base_url(), item))
                        .collect(),
                )
            })
            .unwrap_or_else(|e| {
                warn!(error = %e, "fetching articles failed");
                Vec::new()
            })
    }

    pub fn article(&self, slug: &str) -> Option<ArticleView> {
        let client = self.client.as_ref()?;
        let slug = slug.trim();
        if slug.is_empty() {
            return None;
        }
        self.article
            .get_or_fetch_some(&article_key(slug), || {
                let raw = client.fetch_article_by_slug(slug)?;
                Ok::<_, CmsError>(raw.map(|item| normalize_article(client.base_url(), &item)))
            })
            .unwrap_or_else(|e| {
                warn!(error = %e, slug, "fetching article failed");
                None
            })
    }

    pub fn authors(&self) -> Vec<AuthorView> {
        let Some(client) = &self.client else {
            return Vec::new();
        };
        self.authors
            .get_or_fetch(AUTHORS_KEY, || {
                let raw = client.fetch_authors()?;
                Ok::<_, CmsError>(
                    raw.iter()
                        .filter_map(|item| normalize_author(client.base_url(), item))
                        .collect(),
                )
            })
            .unwrap_or_else(|e| {
                warn!(error = %e, "fetching authors failed");
                Vec::new()
            })
    }

    pub fn author(&self, name: &str) -> Option<AuthorView> {
        self.authors().into_iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, category: &str, featured: bool) -> ArticleView {
        ArticleView {
            id: title.to_string(),
            slug: title.to_lowercase(),
            title: title.to_string(),
            excerpt: format!("About {title}"),
            author: normalize::DEFAULT_AUTHOR.to_string(),
            date: String::new(),
            read_time: normalize::DEFAULT_READ_TIME.to_string(),
            category: category.to_string(),
            image: None,
            featured,
            blocks: Vec::new(),
        }
    }

    #[test]
    fn filter_by_category_and_search() {
        let posts = vec![
            article("Leaky taps", "Plumbing", false),
            article("Rewiring", "Electrical", false),
            article("Boilers", "Heating", false),
        ];

        let all = BlogFilter::default().apply(&posts);
        assert_eq!(all.len(), 3);

        let plumbing = BlogFilter { category: Some("Plumbing".into()), query: None }.apply(&posts);
        assert_eq!(plumbing.len(), 1);

        let search = BlogFilter { category: None, query: Some("REWIR".into()) }.apply(&posts);
        assert_eq!(search[0].title, "Rewiring");

        let none = BlogFilter { category: Some("Plumbing".into()), query: Some("boil".into()) }.apply(&posts);
        assert!(none.is_empty());
    }

    #[test]
    fn featured_prefers_flag_then_first() {
        let posts = vec![article("A", "General", false), article("B", "General", true)];
        assert_eq!(featured(&posts).unwrap().title, "B");
        assert_eq!(featured(&posts[..1]).unwrap().title, "A");
        assert!(featured(&[]).is_none());
    }

    #[test]
    fn unreachable_cms_reads_as_empty() {
        let blog = Blog::new(CmsConfig::unreachable());
        assert!(blog.articles().is_empty());
        assert!(blog.article("kitchen-guide").is_none());
        assert!(blog.article("").is_none());
        assert!(blog.authors().is_empty());
    }
}
