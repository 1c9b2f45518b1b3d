// router/request.rs
use std::collections::HashMap;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use astra::Request;

use crate::errors::ServerError;

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Read an `application/x-www-form-urlencoded` body.
pub fn parse_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut raw = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
    Ok(url::form_urlencoded::parse(&raw).into_owned().collect())
}

pub fn cookie(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get_all("cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

/// Numeric path segment, e.g. the `12` in `/leads/12/purchase`.
pub fn path_id(segment: &str) -> Result<i64, ServerError> {
    segment.parse().map_err(|_| ServerError::NotFound)
}

/// Percent-decoded path segment. `+` is kept as is, unlike in form bodies.
pub fn path_text(segment: &str) -> Result<String, ServerError> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|_| ServerError::BadRequest("Malformed path.".into()))
}

/// A form field that must be present and non-blank.
pub fn required<'a>(form: &'a HashMap<String, String>, key: &str, label: &str) -> Result<&'a str, ServerError> {
    match form.get(key).map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServerError::Validation(format!("{label} is required"))),
    }
}

pub fn optional(form: &HashMap<String, String>, key: &str) -> Option<String> {
    form.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
