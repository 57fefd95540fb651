//! Sougou AI Search engine implementation
//!
//! Talks to the `prosearch` endpoint. Requests are authenticated with the
//! application id, a unix timestamp and `md5(secret + timestamp)`.

use super::types::*;
use crate::config::{Credentials, UpstreamSettings};
use crate::error::{Result, SearchError};
use crate::results::SearchResult;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Sougou web search engine
#[derive(Debug, Clone)]
pub struct Sougou {
    endpoint: String,
    open_wx: bool,
    user_agent: Option<String>,
    credentials: Credentials,
}

impl Sougou {
    pub fn new(upstream: &UpstreamSettings, credentials: Credentials) -> Self {
        Self {
            endpoint: upstream.endpoint(),
            open_wx: upstream.open_wx,
            user_agent: upstream.user_agent.clone(),
            credentials,
        }
    }

    pub fn name(&self) -> &str {
        "sougou"
    }

    /// Build the HTTP request for a search
    pub fn request(&self, params: &RequestParams) -> Result<EngineRequest> {
        if !self.credentials.is_complete() {
            return Err(SearchError::MissingCredentials);
        }

        let timestamp = params.timestamp.to_string();
        let token = sign(&self.credentials.secret, params.timestamp);

        let mut request = EngineRequest::get(&self.endpoint)
            .param("keyword", params.query.as_str())
            .param("open_wx", if self.open_wx { "1" } else { "0" })
            .param("appid", self.credentials.appid.as_str())
            .param("timestamp", timestamp)
            .param("tk", token)
            .header("Accept", "application/json");

        if let Some(ref ua) = self.user_agent {
            request = request.header("User-Agent", ua.as_str());
        }

        Ok(request)
    }

    /// Parse the HTTP response into at most `max_results` results
    pub fn response(&self, response: EngineResponse, max_results: usize) -> Result<Vec<SearchResult>> {
        if !response.is_success() {
            return Err(SearchError::HttpStatus(response.status));
        }

        let payload: ProSearchResponse = response
            .json()
            .map_err(|e| SearchError::Malformed(e.to_string()))?;

        let code = payload
            .code
            .ok_or_else(|| SearchError::Malformed("missing `code` field".to_string()))?;
        if code != 0 {
            return Err(SearchError::Upstream {
                code,
                msg: payload.msg.unwrap_or_else(|| "unknown".to_string()),
            });
        }

        let docs = payload
            .data
            .and_then(|d| d.response_data)
            .map(|r| r.docs)
            .unwrap_or_default();

        debug!("{} returned {} docs", self.name(), docs.len());

        Ok(docs
            .into_iter()
            .filter_map(map_doc)
            .take(max_results)
            .collect())
    }
}

/// Compute the request token: lowercase hex of `md5(secret + timestamp)`
pub fn sign(secret: &str, timestamp: i64) -> String {
    format!("{:x}", md5::compute(format!("{}{}", secret, timestamp)))
}

#[derive(Debug, Deserialize)]
struct ProSearchResponse {
    code: Option<i64>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<ProSearchData>,
}

#[derive(Debug, Deserialize)]
struct ProSearchData {
    #[serde(default)]
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Debug, Deserialize)]
struct Doc {
    title: Option<String>,
    url: Option<String>,
    passage: Option<String>,
    score: Option<Value>,
    date: Option<Value>,
    site: Option<String>,
    favicon: Option<String>,
    #[serde(default)]
    images: Vec<Value>,
}

fn map_doc(doc: Doc) -> Option<SearchResult> {
    let url = match normalize(doc.url) {
        Some(url) if Url::parse(&url).is_ok() => url,
        other => {
            debug!("Skipping doc without absolute url: {:?}", other);
            return None;
        }
    };

    let mut result = SearchResult::new(url, normalize(doc.title).unwrap_or_default());
    result.snippet = normalize(doc.passage).unwrap_or_default();
    result.score = doc.score.as_ref().and_then(score_value);
    result.site = normalize(doc.site);
    result.date = doc.date.and_then(text_value);
    result.favicon = normalize(doc.favicon);
    result.images = doc.images.into_iter().filter_map(image_url).collect();

    Some(result)
}

fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn score_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => normalize(Some(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Images arrive either as bare URLs or as objects carrying a `url` key
fn image_url(value: Value) -> Option<String> {
    match value {
        Value::String(s) => normalize(Some(s)),
        Value::Object(map) => map
            .get("url")
            .and_then(Value::as_str)
            .and_then(|s| normalize(Some(s.to_string()))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn engine() -> Sougou {
        Sougou::new(&UpstreamSettings::default(), Credentials::new("app", "secret"))
    }

    fn ok_response(body: Value) -> EngineResponse {
        EngineResponse {
            status: 200,
            headers: HashMap::new(),
            text: body.to_string(),
            url: "http://api.tianji.woa.com/rsrc/i/prosearch".to_string(),
        }
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign("secret", 1_700_000_000), "e37729af62f40f134311cffbc230178e");
    }

    #[test]
    fn test_sougou_request() {
        let params = RequestParams::new("rust 异步").with_timestamp(1_700_000_000);
        let request = engine().request(&params).unwrap();

        assert_eq!(request.url, "http://api.tianji.woa.com/rsrc/i/prosearch");
        assert_eq!(request.param_value("keyword"), Some("rust 异步"));
        assert_eq!(request.param_value("open_wx"), Some("1"));
        assert_eq!(request.param_value("appid"), Some("app"));
        assert_eq!(request.param_value("timestamp"), Some("1700000000"));
        assert_eq!(request.param_value("tk"), Some("e37729af62f40f134311cffbc230178e"));
    }

    #[test]
    fn test_request_without_credentials() {
        let engine = Sougou::new(&UpstreamSettings::default(), Credentials::default());
        let err = engine.request(&RequestParams::new("rust")).unwrap_err();
        assert!(matches!(err, SearchError::MissingCredentials));
    }

    #[test]
    fn test_response_maps_docs_in_order() {
        let body = json!({
            "code": 0,
            "msg": "ok",
            "data": {"response_data": {"docs": [
                {
                    "title": "Tokio",
                    "url": "https://tokio.rs/",
                    "passage": "An asynchronous runtime for Rust",
                    "score": 0.91,
                    "site": "tokio.rs",
                    "date": "2024-03-01",
                    "images": ["https://tokio.rs/logo.png", {"url": "https://tokio.rs/b.png"}],
                    "favicon": ""
                },
                {"title": "No link", "url": "", "passage": "dropped"},
                {"title": "async-std", "url": "https://async.rs/", "score": "0.5"}
            ]}}
        });

        let results = engine().response(ok_response(body), 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Tokio");
        assert_eq!(results[0].snippet, "An asynchronous runtime for Rust");
        assert_eq!(results[0].score, Some(0.91));
        assert_eq!(results[0].source, "sougou");
        assert_eq!(results[0].images.len(), 2);
        assert_eq!(results[0].favicon, None);
        assert_eq!(results[1].url, "https://async.rs/");
        assert_eq!(results[1].score, Some(0.5));
        assert_eq!(results[1].site, None);
    }

    #[test]
    fn test_response_truncates() {
        let docs: Vec<Value> = (0..40)
            .map(|i| json!({"title": format!("t{}", i), "url": format!("https://e.com/{}", i)}))
            .collect();
        let body = json!({"code": 0, "data": {"response_data": {"docs": docs}}});

        let results = engine().response(ok_response(body), 30).unwrap();
        assert_eq!(results.len(), 30);
        assert_eq!(results[29].title, "t29");
    }

    #[test]
    fn test_response_empty_docs() {
        let body = json!({"code": 0, "data": {"response_data": {"docs": []}}});
        assert!(engine().response(ok_response(body), 10).unwrap().is_empty());

        let body = json!({"code": 0, "data": null});
        assert!(engine().response(ok_response(body), 10).unwrap().is_empty());
    }

    #[test]
    fn test_response_upstream_error_code() {
        let body = json!({"code": 40001, "msg": "invalid tk"});
        let err = engine().response(ok_response(body), 10).unwrap_err();
        assert!(matches!(err, SearchError::Upstream { code: 40001, .. }));
        assert!(err.to_string().contains("invalid tk"));
    }

    #[test]
    fn test_response_malformed() {
        let mut response = ok_response(json!({}));
        response.text = "<html>gateway</html>".to_string();
        let err = engine().response(response, 10).unwrap_err();
        assert!(matches!(err, SearchError::Malformed(_)));

        let err = engine().response(ok_response(json!({"msg": "x"})), 10).unwrap_err();
        assert!(matches!(err, SearchError::Malformed(_)));
    }

    #[test]
    fn test_response_http_error() {
        let mut response = ok_response(json!({"code": 0}));
        response.status = 502;
        let err = engine().response(response, 10).unwrap_err();
        assert!(matches!(err, SearchError::HttpStatus(502)));
    }
}
