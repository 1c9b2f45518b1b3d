// cms/client.rs
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::cms::{CmsConfig, CmsError};

const USER_AGENT: &str = concat!("tradepilot/", env!("CARGO_PKG_VERSION"));

/// Thin client over the CMS REST API. Returns raw entries; shaping them
/// into articles is `normalize`'s job.
pub struct CmsClient {
    client: Client,
    cfg: CmsConfig,
}

impl CmsClient {
    pub fn new(cfg: CmsConfig) -> Result<Self, CmsError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| CmsError::Network(e.to_string()))?;

        Ok(Self { client, cfg })
    }

    pub fn base_url(&self) -> &str {
        &self.cfg.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, CmsError> {
        let mut url = Url::parse(&format!("{}{}", self.cfg.base_url, path))
            .map_err(|e| CmsError::Network(format!("bad CMS url: {e}")))?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    /// GET a collection endpoint and return its `data` array.
    fn get_data(&self, url: Url) -> Result<Vec<Value>, CmsError> {
        debug!(%url, "cms request");
        let mut req = self.client.get(url.clone());
        if let Some(token) = &self.cfg.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: Value = resp
            .json()
            .map_err(|e| CmsError::JsonParse(e.to_string()))?;
        match body.get("data") {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(CmsError::UnexpectedShape(format!(
                "expected data array, got {}",
                type_name(other)
            ))),
        }
    }

    pub fn fetch_articles(&self) -> Result<Vec<Value>, CmsError> {
        let url = self.endpoint(
            "/api/articles",
            &[
                ("populate", "*".into()),
                ("filters[Site][$eq]", self.cfg.site.clone()),
                ("pagination[pageSize]", self.cfg.page_size.to_string()),
            ],
        )?;
        self.get_data(url)
    }

    /// Look an article up by slug, then by numeric id when the slug is one.
    pub fn fetch_article_by_slug(&self, slug: &str) -> Result<Option<Value>, CmsError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Ok(None);
        }

        let by_slug = self.endpoint(
            "/api/articles",
            &[
                ("filters[slug][$eq]", slug.to_string()),
                ("populate", "*".into()),
                ("sort", "updatedAt:desc".into()),
            ],
        )?;
        if let Some(first) = self.get_data(by_slug)?.into_iter().next() {
            return Ok(Some(first));
        }

        let Ok(id) = slug.parse::<i64>() else {
            return Ok(None);
        };
        let by_id = self.endpoint(
            "/api/articles",
            &[
                ("filters[id][$eq]", id.to_string()),
                ("populate", "*".into()),
                ("sort", "updatedAt:desc".into()),
            ],
        )?;
        Ok(self.get_data(by_id)?.into_iter().next())
    }

    pub fn fetch_authors(&self) -> Result<Vec<Value>, CmsError> {
        let url = self.endpoint("/api/authors", &[("populate", "*".into())])?;
        self.get_data(url)
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
